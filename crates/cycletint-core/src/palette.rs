//! Ordered gradient palettes.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::InvalidConfiguration;

/// The default stops, in traversal order. Entry 0 is the period color.
pub const DEFAULT_STOPS: [(&str, Rgb); 8] = [
    ("burgundy", Rgb::new(0x80, 0x00, 0x20)),
    ("pink", Rgb::new(0xFF, 0xC0, 0xCB)),
    ("cream", Rgb::new(0xFF, 0xFD, 0xD0)),
    ("coral", Rgb::new(0xFF, 0x7F, 0x50)),
    ("gold", Rgb::new(0xFF, 0xD7, 0x00)),
    ("ochre", Rgb::new(0xCC, 0x77, 0x22)),
    ("lilac", Rgb::new(0xC8, 0xA2, 0xC8)),
    ("indigo", Rgb::new(0x4B, 0x00, 0x82)),
];

/// Look up a default stop by name, case-insensitively.
pub fn named(name: &str) -> Option<Rgb> {
    DEFAULT_STOPS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, c)| *c)
}

/// Two or more colors. The first is reserved for period days; the rest are
/// walked once across the non-period days of each cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Rgb>", into = "Vec<Rgb>")]
pub struct GradientPalette {
    colors: Vec<Rgb>,
}

impl GradientPalette {
    pub fn new(colors: Vec<Rgb>) -> Result<Self, InvalidConfiguration> {
        if colors.len() < 2 {
            return Err(InvalidConfiguration::PaletteTooShort { len: colors.len() });
        }
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; a palette holds at least two colors.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    pub fn period_color(&self) -> Rgb {
        self.colors[0]
    }

    pub fn gradient_stops(&self) -> &[Rgb] {
        &self.colors[1..]
    }
}

impl Default for GradientPalette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_STOPS.iter().map(|(_, c)| *c).collect(),
        }
    }
}

impl TryFrom<Vec<Rgb>> for GradientPalette {
    type Error = InvalidConfiguration;

    fn try_from(value: Vec<Rgb>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GradientPalette> for Vec<Rgb> {
    fn from(value: GradientPalette) -> Self {
        value.colors
    }
}
