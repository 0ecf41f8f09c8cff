use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Textual notation used when showing the target color to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Rgb,
    Hex,
    Hsl,
}

impl DisplayMode {
    /// Lenient parse for values coming from the outside world; anything
    /// unrecognized renders as RGB.
    pub fn parse_or_default(value: &str) -> DisplayMode {
        match value.trim().to_ascii_lowercase().as_str() {
            "rgb" => DisplayMode::Rgb,
            "hex" => DisplayMode::Hex,
            "hsl" => DisplayMode::Hsl,
            other => {
                log::debug!(target: "color", "Unknown display mode {:?}, using rgb", other);
                DisplayMode::Rgb
            }
        }
    }
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_display_string(&self, mode: DisplayMode) -> String {
        match mode {
            DisplayMode::Rgb => format!("rgb({}, {}, {})", self.r, self.g, self.b),
            DisplayMode::Hex => format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b),
            DisplayMode::Hsl => {
                let (h, s, l) = self.to_hsl();
                format!(
                    "hsl({}, {}%, {}%)",
                    h.round() as i32,
                    s.round() as i32,
                    l.round() as i32
                )
            }
        }
    }

    /// Hue in degrees [0, 360), saturation and lightness in percent.
    pub fn to_hsl(&self) -> (f64, f64, f64) {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return (0.0, 0.0, l * 100.0);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        (h / 6.0 * 360.0, s * 100.0, l * 100.0)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_display_string(DisplayMode::Rgb))
    }
}

impl std::fmt::Debug for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_notation() {
        let color = Color::new(12, 200, 255);
        assert_eq!(color.to_display_string(DisplayMode::Rgb), "rgb(12, 200, 255)");
    }

    #[test]
    fn test_hex_notation_is_padded_and_uppercase() {
        let color = Color::new(10, 171, 0);
        assert_eq!(color.to_display_string(DisplayMode::Hex), "#0AAB00");
    }

    #[test]
    fn test_hsl_notation() {
        assert_eq!(
            Color::new(255, 0, 0).to_display_string(DisplayMode::Hsl),
            "hsl(0, 100%, 50%)"
        );
        assert_eq!(
            Color::new(0, 0, 255).to_display_string(DisplayMode::Hsl),
            "hsl(240, 100%, 50%)"
        );
        assert_eq!(
            Color::new(128, 128, 128).to_display_string(DisplayMode::Hsl),
            "hsl(0, 0%, 50%)"
        );
        // teal-ish, exercises the rounding of all three components
        assert_eq!(
            Color::new(51, 153, 170).to_display_string(DisplayMode::Hsl),
            "hsl(189, 54%, 43%)"
        );
    }

    #[test]
    fn test_unknown_mode_falls_back_to_rgb() {
        assert_eq!(DisplayMode::parse_or_default("cmyk"), DisplayMode::Rgb);
        assert_eq!(DisplayMode::parse_or_default(" HEX "), DisplayMode::Hex);
        assert_eq!(DisplayMode::parse_or_default("hsl"), DisplayMode::Hsl);
    }
}
