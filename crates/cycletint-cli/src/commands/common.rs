//! Helpers shared by the calculation commands.

use chrono::NaiveDate;
use clap::Args;

use cycletint_core::{
    parse_date_key, AnnotationPass, CellAnnotation, DayStyle, Settings, StrategyKind,
};

/// Per-invocation overrides of the persisted settings.
#[derive(Args, Debug, Clone, Default)]
pub struct CycleOverrides {
    /// Cycle start date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub start: Option<NaiveDate>,
    /// Days in one cycle
    #[arg(long)]
    pub cycle_length: Option<u32>,
    /// Period days at the start of each cycle
    #[arg(long)]
    pub period_length: Option<u32>,
    /// Annotation strategy (phase or gradient)
    #[arg(long)]
    pub strategy: Option<StrategyKind>,
    /// Background opacity (0.0-1.0)
    #[arg(long)]
    pub opacity: Option<f64>,
}

impl CycleOverrides {
    /// Persisted settings with these overrides on top, validated once.
    pub fn settings(&self) -> Result<Settings, Box<dyn std::error::Error>> {
        let mut settings = Settings::load()?;
        self.apply_to(&mut settings);
        settings.validate()?;
        Ok(settings)
    }

    /// Overwrite the fields given on the command line. Does not validate.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(start) = self.start {
            settings.cycle.start_date = Some(start);
        }
        if let Some(len) = self.cycle_length {
            settings.cycle.cycle_length = len;
        }
        if let Some(len) = self.period_length {
            settings.cycle.period_length = len;
        }
        if let Some(strategy) = self.strategy {
            settings.display.strategy = strategy;
        }
        if let Some(opacity) = self.opacity {
            settings.display.opacity = opacity;
        }
    }

    /// Settings plus a ready annotation pass.
    pub fn pass(&self) -> Result<(Settings, AnnotationPass), Box<dyn std::error::Error>> {
        let settings = self.settings()?;
        match AnnotationPass::prepare(&settings) {
            Ok(pass) => Ok((settings, pass)),
            Err(e) if e.is_missing_start_date() => Err(
                "no cycle start date set (cycle.start_date); run `cycletint-cli config set cycle.start_date YYYY-MM-DD` or pass --start"
                    .into(),
            ),
            Err(e) => Err(e.into()),
        }
    }
}

pub fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date_key(s).map_err(|e| e.to_string())
}

/// 24-bit ANSI background + foreground escape for a style.
pub fn ansi_paint(style: &DayStyle, text: &str) -> String {
    let bg = style.background.rgb;
    let fg = style.text;
    format!(
        "\x1b[48;2;{};{};{}m\x1b[38;2;{};{};{}m{text}\x1b[0m",
        bg.r, bg.g, bg.b, fg.r, fg.g, fg.b
    )
}

/// One human-readable line per annotated day.
pub fn describe(annotation: &CellAnnotation, cycle_length: u32) -> String {
    let position = match annotation.day_in_cycle {
        Some(day) => format!("day {:>2}/{cycle_length}", day + 1),
        None => "before start".to_string(),
    };
    let color = annotation
        .style
        .map(|s| s.background.rgb.to_hex())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{}  {:<12}  {:<7}  {}",
        annotation.cell.key, position, annotation.phase, color
    )
}
