//! 8-bit RGB colors, hex parsing, and luminance.

use serde::{Deserialize, Serialize};

use crate::error::{InvalidConfiguration, ValidationError};

/// An opaque 8-bit RGB color. Serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `#RGB` (leading `#` optional, case-insensitive).
    pub fn from_hex(input: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidColor {
            input: input.to_string(),
        };
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                // #abc == #aabbcc
                let short = |s: &str| channel(s).map(|v| v * 17);
                Ok(Self::new(
                    short(&hex[0..1])?,
                    short(&hex[1..2])?,
                    short(&hex[2..3])?,
                ))
            }
            _ => Err(invalid()),
        }
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Perceptual luminance normalized to `0.0..=1.0`.
    pub fn luminance(&self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b))
            / 255.0
    }

    pub fn is_dark(&self) -> bool {
        self.luminance() < 0.5
    }

    /// Legible foreground for text drawn on top of this color.
    pub fn text_color(&self) -> Rgb {
        if self.is_dark() {
            Rgb::WHITE
        } else {
            Rgb::BLACK
        }
    }

    pub fn with_alpha(self, alpha: f64) -> Result<Rgba, InvalidConfiguration> {
        Rgba::new(self, alpha)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Rgb {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

/// A color with opacity, used only when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl Rgba {
    pub fn new(rgb: Rgb, alpha: f64) -> Result<Self, InvalidConfiguration> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(InvalidConfiguration::OpacityOutOfRange { value: alpha });
        }
        Ok(Self { rgb, alpha })
    }

    /// `rgba(r, g, b, a)` for stylesheets.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.alpha
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Rgb::from_hex("#800020").unwrap(), Rgb::new(0x80, 0x00, 0x20));
        assert_eq!(Rgb::from_hex("ffc0cb").unwrap(), Rgb::new(255, 192, 203));
        assert_eq!(Rgb::from_hex("#fff").unwrap(), Rgb::WHITE);
        assert_eq!(Rgb::from_hex("#1a2").unwrap(), Rgb::new(0x11, 0xaa, 0x22));
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#", "#12345", "#GGGGGG", "#1234567", "#ééé"] {
            assert!(Rgb::from_hex(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn hex_output_is_uppercase() {
        assert_eq!(Rgb::new(0x4b, 0x00, 0x82).to_hex(), "#4B0082");
    }

    #[test]
    fn luminance_extremes() {
        assert_eq!(Rgb::BLACK.luminance(), 0.0);
        assert!((Rgb::WHITE.luminance() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn dark_threshold() {
        // burgundy and indigo take white text, pink and gold take black
        assert!(Rgb::new(0x80, 0x00, 0x20).is_dark());
        assert!(Rgb::new(0x4B, 0x00, 0x82).is_dark());
        assert!(!Rgb::new(0xFF, 0xC0, 0xCB).is_dark());
        assert!(!Rgb::new(0xFF, 0xD7, 0x00).is_dark());
        assert_eq!(Rgb::new(0x80, 0x00, 0x20).text_color(), Rgb::WHITE);
        assert_eq!(Rgb::new(0xFF, 0xC0, 0xCB).text_color(), Rgb::BLACK);
    }

    #[test]
    fn mid_gray_is_not_dark() {
        // 128/255 is just over the threshold
        assert!(!Rgb::new(128, 128, 128).is_dark());
        assert!(Rgb::new(127, 127, 127).is_dark());
    }

    #[test]
    fn rgba_css_and_range() {
        let pink = Rgb::new(255, 182, 193).with_alpha(0.6).unwrap();
        assert_eq!(pink.to_css(), "rgba(255, 182, 193, 0.6)");
        assert_eq!(Rgb::BLACK.with_alpha(1.0).unwrap().to_css(), "rgba(0, 0, 0, 1)");
        assert!(Rgb::BLACK.with_alpha(1.5).is_err());
        assert!(Rgb::BLACK.with_alpha(f64::NAN).is_err());
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Rgb::new(255, 127, 80)).unwrap();
        assert_eq!(json, "\"#FF7F50\"");
        let back: Rgb = serde_json::from_str("\"#ff7f50\"").unwrap();
        assert_eq!(back, Rgb::new(255, 127, 80));
        assert!(serde_json::from_str::<Rgb>("\"coral\"").is_err());
    }
}
