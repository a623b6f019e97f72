//! Gradient color mapping.
//!
//! Period days get the palette's first entry. Every other day gets the stop
//! at its fractional position `t = post_period_day / post_period_length`
//! across the remaining entries: `palette[(floor(t * (n - 1)) + 1) mod n]`.
//! The floor is computed in integers so boundary days never land on the
//! wrong stop through float rounding.

use chrono::NaiveDate;

use crate::color::Rgb;
use crate::cycle::CycleConfig;
use crate::error::InvalidConfiguration;
use crate::palette::GradientPalette;

/// Palette index for a day already reduced to its position in the cycle.
///
/// Fails when the period leaves no days for the gradient.
pub fn palette_index(
    day_in_cycle: u32,
    config: &CycleConfig,
    palette: &GradientPalette,
) -> Result<usize, InvalidConfiguration> {
    let post_period_length = config.post_period_length()?;

    if day_in_cycle < config.period_length() {
        return Ok(0);
    }

    let post_period_day = u64::from(day_in_cycle - config.period_length());
    let steps = palette.len() as u64 - 1;
    let index = (post_period_day * steps / u64::from(post_period_length)) as usize;

    Ok((index + 1) % palette.len())
}

/// Color for `date`, or `Ok(None)` when the date precedes the start date.
///
/// The configuration is checked before the date, so a bad configuration is
/// reported for every date, including ones before the start.
pub fn color_for(
    date: NaiveDate,
    config: &CycleConfig,
    palette: &GradientPalette,
) -> Result<Option<Rgb>, InvalidConfiguration> {
    config.post_period_length()?;

    let Some(day) = config.day_in_cycle(date) else {
        return Ok(None);
    };
    let index = palette_index(day, config, palette)?;
    Ok(palette.get(index))
}
