use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

use super::color_math::{random_color, similar_color};
use crate::model::{Difficulty, Round};

pub const MIN_VARIANCE: i64 = 15;
pub const MAX_OPTIONS: usize = 12;
pub const EASY_MODE_VARIANCE_BONUS: i64 = 30;

/// Decoy spread for a round. Larger is easier: decoys drift further from
/// the target. Never below `MIN_VARIANCE`.
pub fn variance(difficulty: Difficulty, level: u32, easy_mode_active: bool) -> f64 {
    let mut base = difficulty.base_variance();
    if easy_mode_active {
        base += EASY_MODE_VARIANCE_BONUS;
    }
    (base - level as i64 * 2).max(MIN_VARIANCE) as f64
}

pub fn option_count(difficulty: Difficulty, level: u32) -> usize {
    (difficulty.base_option_count() + level as usize / 3).min(MAX_OPTIONS)
}

/// The caller decides (and pays the charge for) `easy_mode_active`.
pub fn generate_round<R: Rng + ?Sized>(
    rng: &mut R,
    difficulty: Difficulty,
    level: u32,
    easy_mode_active: bool,
) -> Round {
    let target = random_color(rng);
    let variance = variance(difficulty, level, easy_mode_active);
    let count = option_count(difficulty, level);

    // decoys are drawn independently and may coincide with each other or the target
    let mut options = Vec::with_capacity(count);
    options.push(target);
    for _ in 1..count {
        options.push(similar_color(rng, target, variance));
    }
    options.shuffle(rng);

    trace!(
        target: "round_generator",
        "Generated round: target {:?}, {} options, variance {}",
        target,
        count,
        variance
    );
    Round::new(target, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::UsingLogger;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_context::test_context;

    #[test]
    fn test_variance_floor() {
        for difficulty in Difficulty::all() {
            for level in 1..=100 {
                for easy in [false, true] {
                    assert!(variance(difficulty, level, easy) >= 15.0);
                }
            }
        }
        assert_eq!(variance(Difficulty::Easy, 1, false), 78.0);
        assert_eq!(variance(Difficulty::Hard, 1, false), 23.0);
        assert_eq!(variance(Difficulty::Hard, 5, false), 15.0);
        assert_eq!(variance(Difficulty::Medium, 2, true), 76.0);
    }

    #[test]
    fn test_option_count_bounds() {
        for difficulty in Difficulty::all() {
            for level in 0..=100 {
                let count = option_count(difficulty, level);
                assert!(count >= difficulty.base_option_count());
                assert!(count <= MAX_OPTIONS);
            }
        }
        assert_eq!(option_count(Difficulty::Easy, 1), 4);
        assert_eq!(option_count(Difficulty::Easy, 3), 5);
        assert_eq!(option_count(Difficulty::Medium, 7), 8);
        assert_eq!(option_count(Difficulty::Hard, 9), 12);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_round_contains_target_and_has_expected_length(_: &mut UsingLogger) {
        let mut rng = StdRng::seed_from_u64(42);
        for difficulty in Difficulty::all() {
            for level in [1, 4, 10, 40] {
                let round = generate_round(&mut rng, difficulty, level, false);
                assert_eq!(round.options.len(), option_count(difficulty, level));
                assert!(round.options.contains(&round.target));
            }
        }
    }

    #[test]
    fn test_target_position_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 6000;
        let mut counts = [0usize; 6];
        for _ in 0..trials {
            let round = generate_round(&mut rng, Difficulty::Medium, 1, false);
            let position = round
                .options
                .iter()
                .position(|c| *c == round.target)
                .expect("target present");
            counts[position] += 1;
        }
        // expected 1000 per slot; a coinciding decoy can only pull the
        // first match earlier, which is rare at this variance
        for (slot, count) in counts.iter().enumerate() {
            assert!(
                (800..=1200).contains(count),
                "slot {} picked {} times: {:?}",
                slot,
                count,
                counts
            );
        }
    }
}
