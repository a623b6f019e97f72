//! Coarse three-phase classification.
//!
//! The fertile window is anchored to the end of the cycle: ovulation is
//! estimated 14 days before the next cycle starts, and the window spans the
//! four days before it through the day after. The bounds are not clamped for
//! short cycles. Period days are checked first, so they are never reported
//! as fertile.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cycle::CycleConfig;

/// Days between estimated ovulation and the next cycle start.
const LUTEAL_DAYS: i64 = 14;
/// Fertile days before ovulation.
const FERTILE_LEAD_DAYS: i64 = 4;
/// Fertile days after ovulation.
const FERTILE_TRAIL_DAYS: i64 = 1;

/// Phase of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePhase {
    Period,
    Fertile,
    Neutral,
}

impl CyclePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CyclePhase::Period => "period",
            CyclePhase::Fertile => "fertile",
            CyclePhase::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Inclusive fertile-window bounds in day-in-cycle units.
///
/// Signed because short cycles push the raw bounds below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FertileWindow {
    pub ovulation_day: i64,
    pub start: i64,
    pub end: i64,
}

impl FertileWindow {
    pub fn for_cycle(cycle_length: u32) -> Self {
        let ovulation_day = i64::from(cycle_length) - LUTEAL_DAYS;
        Self {
            ovulation_day,
            start: ovulation_day - FERTILE_LEAD_DAYS,
            end: ovulation_day + FERTILE_TRAIL_DAYS,
        }
    }

    pub fn contains(&self, day_in_cycle: u32) -> bool {
        (self.start..=self.end).contains(&i64::from(day_in_cycle))
    }
}

/// Phase for a day already reduced to its position in the cycle.
pub fn phase_for_day(day_in_cycle: u32, config: &CycleConfig) -> CyclePhase {
    if day_in_cycle < config.period_length() {
        return CyclePhase::Period;
    }
    if FertileWindow::for_cycle(config.cycle_length()).contains(day_in_cycle) {
        return CyclePhase::Fertile;
    }
    CyclePhase::Neutral
}

/// Classify `date` under `config`. Dates before the start date are `Neutral`.
pub fn classify(date: NaiveDate, config: &CycleConfig) -> CyclePhase {
    match config.day_in_cycle(date) {
        Some(day) => phase_for_day(day, config),
        None => CyclePhase::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(cycle_length: u32, period_length: u32) -> CycleConfig {
        CycleConfig::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            cycle_length,
            period_length,
        )
        .unwrap()
    }

    #[test]
    fn window_for_28_day_cycle_is_days_10_to_15() {
        let w = FertileWindow::for_cycle(28);
        assert_eq!(w.ovulation_day, 14);
        assert_eq!((w.start, w.end), (10, 15));
        assert!(!w.contains(9));
        assert!(w.contains(10));
        assert!(w.contains(15));
        assert!(!w.contains(16));
    }

    #[test]
    fn short_cycle_window_goes_negative_without_clamping() {
        let w = FertileWindow::for_cycle(10);
        assert_eq!((w.ovulation_day, w.start, w.end), (-4, -8, -3));
        assert!(!w.contains(0));
    }

    #[test]
    fn period_takes_precedence_over_overlapping_window() {
        // cycle 20: window 2..=7 overlaps a 5-day period
        let cfg = config(20, 5);
        for day in 0..5 {
            assert_eq!(phase_for_day(day, &cfg), CyclePhase::Period);
        }
        assert_eq!(phase_for_day(5, &cfg), CyclePhase::Fertile);
        assert_eq!(phase_for_day(7, &cfg), CyclePhase::Fertile);
        assert_eq!(phase_for_day(8, &cfg), CyclePhase::Neutral);
    }

    #[test]
    fn zero_period_length_has_no_period_days() {
        let cfg = config(28, 0);
        assert_eq!(phase_for_day(0, &cfg), CyclePhase::Neutral);
    }

    #[test]
    fn phase_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&CyclePhase::Fertile).unwrap(), "\"fertile\"");
        assert_eq!(CyclePhase::Period.to_string(), "period");
    }
}
