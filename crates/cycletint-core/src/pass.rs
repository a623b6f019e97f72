//! Batch annotation over the day cells a host currently shows.

use chrono::NaiveDate;
use serde::Serialize;

use crate::cycle::CycleConfig;
use crate::date::parse_date_key;
use crate::error::{InvalidConfiguration, Result, ValidationError};
use crate::phase::{classify, CyclePhase};
use crate::storage::Settings;
use crate::strategy::{DayAnnotator, DayStyle};

/// One day as the host presents it: its raw key plus the parsed date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DayCell {
    pub key: String,
    pub date: NaiveDate,
}

impl DayCell {
    pub fn new(key: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            key: key.into(),
            date,
        }
    }

    /// Build from a host date key such as `2024-01-05`.
    pub fn from_key(key: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(key, parse_date_key(key)?))
    }
}

/// Outcome for one cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellAnnotation {
    pub cell: DayCell,
    /// `None` before the start date.
    pub day_in_cycle: Option<u32>,
    pub phase: CyclePhase,
    /// `None` leaves the cell unstyled.
    pub style: Option<DayStyle>,
}

/// A validated config and strategy, ready to annotate any number of cells.
///
/// Holding the config by value keeps it fixed for the whole batch.
pub struct AnnotationPass {
    config: CycleConfig,
    annotator: Box<dyn DayAnnotator>,
}

impl std::fmt::Debug for AnnotationPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationPass")
            .field("config", &self.config)
            .field("annotator", &self.annotator.name())
            .finish()
    }
}

impl AnnotationPass {
    /// Validate `annotator` against `config` once.
    pub fn new(
        config: CycleConfig,
        annotator: Box<dyn DayAnnotator>,
    ) -> Result<Self, InvalidConfiguration> {
        annotator.validate(&config)?;
        Ok(Self { config, annotator })
    }

    /// Read config and strategy from settings.
    ///
    /// # Errors
    ///
    /// `MissingKey("cycle.start_date")` when no start date is stored, or
    /// `InvalidConfiguration` when the strategy cannot work with the values.
    pub fn prepare(settings: &Settings) -> Result<Self> {
        let config = settings.cycle_config()?;
        let annotator = settings.annotator()?;
        Ok(Self::new(config, annotator)?)
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    pub fn strategy_name(&self) -> &str {
        self.annotator.name()
    }

    pub fn annotate(&self, cell: &DayCell) -> Result<CellAnnotation, InvalidConfiguration> {
        Ok(CellAnnotation {
            cell: cell.clone(),
            day_in_cycle: self.config.day_in_cycle(cell.date),
            phase: classify(cell.date, &self.config),
            style: self.annotator.annotate(cell.date, &self.config)?,
        })
    }

    pub fn run(&self, cells: &[DayCell]) -> Result<Vec<CellAnnotation>, InvalidConfiguration> {
        let annotations = cells
            .iter()
            .map(|cell| self.annotate(cell))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(
            strategy = self.annotator.name(),
            cells = cells.len(),
            styled = annotations.iter().filter(|a| a.style.is_some()).count(),
            "annotation pass complete"
        );
        Ok(annotations)
    }

    /// Annotate every date in `from..=to`.
    pub fn run_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CellAnnotation>, InvalidConfiguration> {
        let cells: Vec<DayCell> = from
            .iter_days()
            .take_while(|d| *d <= to)
            .map(|d| DayCell::new(crate::date::format_date(d), d))
            .collect();
        self.run(&cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{GradientColorer, PhaseClassifier};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn day_cell_from_key() {
        let cell = DayCell::from_key("2024-01-05").unwrap();
        assert_eq!(cell.key, "2024-01-05");
        assert_eq!(cell.date, d(2024, 1, 5));
        assert!(DayCell::from_key("Jan 5").is_err());
    }

    #[test]
    fn new_rejects_incompatible_strategy_up_front() {
        let cfg = CycleConfig::new(d(2024, 1, 1), 5, 5).unwrap();
        assert!(AnnotationPass::new(cfg, Box::new(GradientColorer::default())).is_err());
        assert!(AnnotationPass::new(cfg, Box::new(PhaseClassifier::default())).is_ok());
    }

    #[test]
    fn prepare_requires_start_date() {
        let err = AnnotationPass::prepare(&Settings::default()).unwrap_err();
        assert!(err.is_missing_start_date());
    }

    #[test]
    fn run_range_is_inclusive_and_ordered() {
        let pass = AnnotationPass::new(
            CycleConfig::with_defaults(d(2024, 1, 1)),
            Box::new(PhaseClassifier::default()),
        )
        .unwrap();

        let out = pass.run_range(d(2023, 12, 31), d(2024, 1, 6)).unwrap();
        assert_eq!(out.len(), 7);
        assert_eq!(out[0].day_in_cycle, None);
        assert_eq!(out[0].phase, CyclePhase::Neutral);
        assert!(out[0].style.is_none());
        assert_eq!(out[1].cell.key, "2024-01-01");
        assert_eq!(out[1].phase, CyclePhase::Period);
        assert_eq!(out[6].day_in_cycle, Some(5));
        assert_eq!(out[6].phase, CyclePhase::Neutral);
    }

    #[test]
    fn run_range_with_reversed_bounds_is_empty() {
        let pass = AnnotationPass::new(
            CycleConfig::with_defaults(d(2024, 1, 1)),
            Box::new(GradientColorer::default()),
        )
        .unwrap();
        assert!(pass.run_range(d(2024, 2, 1), d(2024, 1, 1)).unwrap().is_empty());
    }
}
