//! Cycle configuration consumed by the calculators.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::InvalidConfiguration;

pub const DEFAULT_CYCLE_LENGTH: u32 = 28;
pub const DEFAULT_PERIOD_LENGTH: u32 = 5;

/// Start date plus lengths, immutable for the duration of a pass.
///
/// A zero cycle length is rejected at construction so the modulo in every
/// calculation is defined. A period that fills the whole cycle is allowed
/// here (every day is a period day) and only rejected by the gradient mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleConfig {
    start_date: NaiveDate,
    cycle_length: u32,
    period_length: u32,
}

impl CycleConfig {
    pub fn new(
        start_date: NaiveDate,
        cycle_length: u32,
        period_length: u32,
    ) -> Result<Self, InvalidConfiguration> {
        if cycle_length == 0 {
            return Err(InvalidConfiguration::ZeroCycleLength);
        }
        Ok(Self {
            start_date,
            cycle_length,
            period_length,
        })
    }

    /// Config with the default 28/5 lengths.
    pub fn with_defaults(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            cycle_length: DEFAULT_CYCLE_LENGTH,
            period_length: DEFAULT_PERIOD_LENGTH,
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn cycle_length(&self) -> u32 {
        self.cycle_length
    }

    pub fn period_length(&self) -> u32 {
        self.period_length
    }

    /// Zero-based day within the current cycle, `None` before the start date.
    pub fn day_in_cycle(&self, date: NaiveDate) -> Option<u32> {
        crate::date::day_in_cycle(self.start_date, date, self.cycle_length)
    }

    /// Number of non-period days per cycle, or the reason there are none.
    pub fn post_period_length(&self) -> Result<u32, InvalidConfiguration> {
        if self.period_length >= self.cycle_length {
            return Err(InvalidConfiguration::NoGradientSpan {
                cycle_length: self.cycle_length,
                period_length: self.period_length,
            });
        }
        Ok(self.cycle_length - self.period_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn zero_cycle_length_is_rejected() {
        assert_eq!(
            CycleConfig::new(start(), 0, 0),
            Err(InvalidConfiguration::ZeroCycleLength)
        );
    }

    #[test]
    fn period_filling_cycle_is_accepted_but_has_no_gradient_span() {
        let cfg = CycleConfig::new(start(), 5, 5).unwrap();
        assert_eq!(
            cfg.post_period_length(),
            Err(InvalidConfiguration::NoGradientSpan {
                cycle_length: 5,
                period_length: 5
            })
        );
    }

    #[test]
    fn defaults_are_28_and_5() {
        let cfg = CycleConfig::with_defaults(start());
        assert_eq!(cfg.cycle_length(), 28);
        assert_eq!(cfg.period_length(), 5);
        assert_eq!(cfg.post_period_length(), Ok(23));
    }
}
