use crate::model::Color;
use rand::Rng;

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    Color::new(
        rng.random_range(0..=255),
        rng.random_range(0..=255),
        rng.random_range(0..=255),
    )
}

/// Nudges every channel of `base` by up to `variance / 2` in either
/// direction, clamped to the valid channel range.
pub fn similar_color<R: Rng + ?Sized>(rng: &mut R, base: Color, variance: f64) -> Color {
    let mut jitter = |channel: u8| -> u8 {
        let offset = (rng.random::<f64>() - 0.5) * variance;
        (channel as f64 + offset).clamp(0.0, 255.0).floor() as u8
    };
    let r = jitter(base.r);
    let g = jitter(base.g);
    let b = jitter(base.b);
    Color::new(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_similar_color_stays_within_variance() {
        let mut rng = StdRng::seed_from_u64(7);
        let base = Color::new(128, 64, 200);
        for _ in 0..1000 {
            let color = similar_color(&mut rng, base, 40.0);
            assert!((color.r as i32 - 128).abs() <= 20, "{:?}", color);
            assert!((color.g as i32 - 64).abs() <= 20, "{:?}", color);
            assert!((color.b as i32 - 200).abs() <= 20, "{:?}", color);
        }
    }

    #[test]
    fn test_similar_color_clamps_at_edges() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            // channels never wrap even with a huge variance
            let dark = similar_color(&mut rng, Color::new(0, 0, 0), 300.0);
            let light = similar_color(&mut rng, Color::new(255, 255, 255), 300.0);
            assert!(dark.r <= 150 && dark.g <= 150 && dark.b <= 150, "{:?}", dark);
            assert!(light.r >= 105 && light.g >= 105 && light.b >= 105, "{:?}", light);
        }
    }

    #[test]
    fn test_zero_variance_is_identity() {
        let mut rng = StdRng::seed_from_u64(3);
        let base = Color::new(1, 2, 3);
        assert_eq!(similar_color(&mut rng, base, 0.0), base);
    }

    #[test]
    fn test_random_color_covers_channel_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let colors: Vec<Color> = (0..5000).map(|_| random_color(&mut rng)).collect();
        assert!(colors.iter().any(|c| c.r < 16));
        assert!(colors.iter().any(|c| c.r > 240));
        assert!(colors.iter().any(|c| c.b > 240));
    }
}
