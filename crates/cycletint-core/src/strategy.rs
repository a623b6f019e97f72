//! The two annotation strategies behind one interface.
//!
//! A deployment picks one: the coarse phase model (period / fertile tinted,
//! neutral left alone) or the gradient model (every day from the start date
//! on gets a color).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::color::{Rgb, Rgba};
use crate::cycle::CycleConfig;
use crate::error::InvalidConfiguration;
use crate::gradient;
use crate::palette::GradientPalette;
use crate::phase::{classify, CyclePhase};

/// Rendering for one styled day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayStyle {
    pub background: Rgba,
    /// Picked from the background's luminance, ignoring opacity.
    pub text: Rgb,
}

impl DayStyle {
    pub fn from_background(background: Rgba) -> Self {
        Self {
            background,
            text: background.rgb.text_color(),
        }
    }
}

/// Every annotation strategy implements this trait.
/// Strategies are stateless between calls; the config comes in per call.
pub trait DayAnnotator: Send + Sync {
    /// Unique identifier (e.g. "phase", "gradient").
    fn name(&self) -> &str;

    /// Reject configurations this strategy cannot annotate with.
    /// Called once before a batch so the batch can be aborted up front.
    fn validate(&self, _config: &CycleConfig) -> Result<(), InvalidConfiguration> {
        Ok(()) // default accepts everything CycleConfig allows
    }

    /// Style for `date`, or `None` to leave it unstyled.
    fn annotate(
        &self,
        date: NaiveDate,
        config: &CycleConfig,
    ) -> Result<Option<DayStyle>, InvalidConfiguration>;
}

/// Which strategy a deployment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Phase,
    #[default]
    Gradient,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Phase => f.write_str("phase"),
            StrategyKind::Gradient => f.write_str("gradient"),
        }
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "phase" => Ok(StrategyKind::Phase),
            "gradient" => Ok(StrategyKind::Gradient),
            other => Err(format!("unknown strategy '{other}' (expected phase or gradient)")),
        }
    }
}

/// Coarse strategy: tint period and fertile days, leave neutral days alone.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseClassifier {
    pub period: Rgba,
    pub fertile: Rgba,
}

impl PhaseClassifier {
    pub fn new(period: Rgba, fertile: Rgba) -> Self {
        Self { period, fertile }
    }

    pub fn style_for(&self, phase: CyclePhase) -> Option<DayStyle> {
        match phase {
            CyclePhase::Period => Some(DayStyle::from_background(self.period)),
            CyclePhase::Fertile => Some(DayStyle::from_background(self.fertile)),
            CyclePhase::Neutral => None,
        }
    }
}

impl Default for PhaseClassifier {
    fn default() -> Self {
        // light pink / light blue at 60%
        Self {
            period: Rgba {
                rgb: Rgb::new(255, 182, 193),
                alpha: 0.6,
            },
            fertile: Rgba {
                rgb: Rgb::new(173, 216, 230),
                alpha: 0.6,
            },
        }
    }
}

impl DayAnnotator for PhaseClassifier {
    fn name(&self) -> &str {
        "phase"
    }

    fn annotate(
        &self,
        date: NaiveDate,
        config: &CycleConfig,
    ) -> Result<Option<DayStyle>, InvalidConfiguration> {
        Ok(self.style_for(classify(date, config)))
    }
}

/// Fine strategy: period color, then a walk across the palette.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientColorer {
    palette: GradientPalette,
    opacity: f64,
}

impl GradientColorer {
    pub fn new(palette: GradientPalette, opacity: f64) -> Result<Self, InvalidConfiguration> {
        // validate once; every later with_alpha call reuses this value
        Rgb::BLACK.with_alpha(opacity)?;
        Ok(Self { palette, opacity })
    }

    pub fn palette(&self) -> &GradientPalette {
        &self.palette
    }
}

impl Default for GradientColorer {
    fn default() -> Self {
        Self {
            palette: GradientPalette::default(),
            opacity: 1.0,
        }
    }
}

impl DayAnnotator for GradientColorer {
    fn name(&self) -> &str {
        "gradient"
    }

    fn validate(&self, config: &CycleConfig) -> Result<(), InvalidConfiguration> {
        config.post_period_length().map(|_| ())
    }

    fn annotate(
        &self,
        date: NaiveDate,
        config: &CycleConfig,
    ) -> Result<Option<DayStyle>, InvalidConfiguration> {
        gradient::color_for(date, config, &self.palette)?
            .map(|rgb| rgb.with_alpha(self.opacity).map(DayStyle::from_background))
            .transpose()
    }
}
