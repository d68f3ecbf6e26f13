use rand::Rng;

use crate::error::ConfigError;

/// Represents a 24-bit RGB color
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    /// Parse a `#rgb` or `#rrggbb` hex string. The 3-digit form duplicates
    /// each nibble (`#abc` == `#aabbcc`). Anything else is rejected.
    pub fn parse(hex: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(hex.to_string());

        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&expanded[range], 16).map_err(|_| invalid())
        };

        Ok(Self(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Normalized lowercase 6-digit form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Per-channel linear blend, factor clamped to [0, 1], channels rounded
    /// to nearest.
    pub fn lerp(start: Self, end: Self, factor: f64) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let blend = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * factor).round() as u8;
        Self(
            blend(start.0, end.0),
            blend(start.1, end.1),
            blend(start.2, end.2),
        )
    }
}

/// Uniform pick from a palette. The palette was checked non-empty at
/// configuration time, so this never panics during a tick.
pub fn random_from_palette<R: Rng>(palette: &[RgbColor], rng: &mut R) -> RgbColor {
    palette[rng.gen_range(0..palette.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_six_digit_roundtrip() {
        for hex in ["#2b4539", "#61dca3", "#61b3dc", "#000000", "#ffffff"] {
            let color = RgbColor::parse(hex).unwrap();
            assert_eq!(color.to_hex(), hex);
        }
    }

    #[test]
    fn test_parse_three_digit_duplicates_nibbles() {
        assert_eq!(RgbColor::parse("#abc").unwrap(), RgbColor(0xaa, 0xbb, 0xcc));
        assert_eq!(RgbColor::parse("#abc").unwrap().to_hex(), "#aabbcc");
        assert_eq!(RgbColor::parse("#fff").unwrap(), RgbColor(255, 255, 255));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["2b4539", "#12", "#1234", "#12345", "#1234567", "#gghhii", "", "#"] {
            assert_eq!(
                RgbColor::parse(bad),
                Err(ConfigError::InvalidColor(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_lerp_identity() {
        let c = RgbColor(97, 220, 163);
        for factor in [0.0, 0.25, 0.5, 0.99, 1.0] {
            assert_eq!(RgbColor::lerp(c, c, factor), c);
        }
    }

    #[test]
    fn test_lerp_endpoints_exact() {
        let start = RgbColor(43, 69, 57);
        let end = RgbColor(97, 179, 220);
        assert_eq!(RgbColor::lerp(start, end, 0.0), start);
        assert_eq!(RgbColor::lerp(start, end, 1.0), end);
    }

    #[test]
    fn test_lerp_clamps_factor() {
        let start = RgbColor(0, 0, 0);
        let end = RgbColor(255, 255, 255);
        assert_eq!(RgbColor::lerp(start, end, -1.0), start);
        assert_eq!(RgbColor::lerp(start, end, 2.0), end);
    }

    #[test]
    fn test_lerp_rounds_channels() {
        let start = RgbColor(0, 0, 0);
        let end = RgbColor(10, 10, 10);
        // 10 * 0.55 = 5.5 rounds to 6
        assert_eq!(RgbColor::lerp(start, end, 0.55), RgbColor(6, 6, 6));
    }

    #[test]
    fn test_random_from_palette_stays_in_palette() {
        let palette = [RgbColor(1, 2, 3), RgbColor(4, 5, 6), RgbColor(7, 8, 9)];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let picked = random_from_palette(&palette, &mut rng);
            assert!(palette.contains(&picked));
        }
    }
}
