//! TOML-based persisted settings.
//!
//! Stores:
//! - The cycle start date and lengths
//! - Which annotation strategy to use, its colors, and the CSS selector
//! - The debounce delay for recompute-on-change
//!
//! Settings are stored at `~/.config/cycletint/settings.toml`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::data_dir;
use crate::color::Rgb;
use crate::cycle::{CycleConfig, DEFAULT_CYCLE_LENGTH, DEFAULT_PERIOD_LENGTH};
use crate::error::{ConfigError, InvalidConfiguration, Result};
use crate::palette::GradientPalette;
use crate::strategy::{DayAnnotator, GradientColorer, PhaseClassifier, StrategyKind};
use crate::stylesheet::DEFAULT_SELECTOR;

/// Dot-path of the one required setting.
pub const START_DATE_KEY: &str = "cycle.start_date";

const SETTINGS_FILE: &str = "settings.toml";

/// Upper bound for `watch.debounce_ms`.
pub const MAX_DEBOUNCE_MS: u64 = 60_000;

/// Cycle tracking values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleSettings {
    /// No default: without it nothing can be calculated.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default = "default_cycle_length")]
    pub cycle_length: u32,
    #[serde(default = "default_period_length")]
    pub period_length: u32,
}

/// How annotated days are colored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default)]
    pub strategy: StrategyKind,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub palette: GradientPalette,
    /// Phase strategy only.
    #[serde(default = "default_period_color")]
    pub period_color: Rgb,
    /// Phase strategy only.
    #[serde(default = "default_fertile_color")]
    pub fertile_color: Rgb,
    /// Stylesheet selector; `{key}` is replaced by each day's key.
    #[serde(default = "default_selector")]
    pub selector: String,
}

/// Recompute-on-change behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchSettings {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

/// Application settings.
///
/// Serialized to/from TOML at `~/.config/cycletint/settings.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub cycle: CycleSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub watch: WatchSettings,
}

// Default functions
fn default_cycle_length() -> u32 {
    DEFAULT_CYCLE_LENGTH
}
fn default_period_length() -> u32 {
    DEFAULT_PERIOD_LENGTH
}
fn default_opacity() -> f64 {
    0.6
}
fn default_period_color() -> Rgb {
    Rgb::new(0xFF, 0xB6, 0xC1)
}
fn default_fertile_color() -> Rgb {
    Rgb::new(0xAD, 0xD8, 0xE6)
}
fn default_selector() -> String {
    DEFAULT_SELECTOR.to_string()
}
fn default_debounce_ms() -> u64 {
    500
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            start_date: None,
            cycle_length: default_cycle_length(),
            period_length: default_period_length(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            opacity: default_opacity(),
            palette: GradientPalette::default(),
            period_color: default_period_color(),
            fertile_color: default_fertile_color(),
            selector: default_selector(),
        }
    }
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Settings {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::InvalidValue {
            key: key.to_string(),
            message: "unknown config key".to_string(),
        };
        let bad_value = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| bad_value(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| bad_value(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(bad_value(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| bad_value(e.to_string()))?
                    }
                    // an empty value unsets an optional; required strings then fail to deserialize
                    serde_json::Value::String(_) | serde_json::Value::Null if value.is_empty() => {
                        serde_json::Value::Null
                    }
                    // strings and unset optionals (null) take the raw text
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the settings file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join(SETTINGS_FILE))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed or fails
    /// validation, or if the defaults cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let settings: Settings =
                    toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    })?;
                settings.validate()?;
                tracing::debug!(path = %path.display(), "loaded settings");
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let settings = Self::default();
                settings.save_to(path)?;
                tracing::info!(path = %path.display(), "wrote default settings");
                Ok(settings)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a value as string by dot-separated key. Unset values are `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Change a value by key in memory, keeping the previous settings if the
    /// result would not validate.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Settings =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Change a value by key and save to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// the result is invalid, or the settings cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Check everything a pass will need, once, up front.
    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        if self.cycle.cycle_length == 0 {
            return Err(InvalidConfiguration::ZeroCycleLength);
        }
        if self.watch.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(InvalidConfiguration::DebounceTooLong {
                value: self.watch.debounce_ms,
                max: MAX_DEBOUNCE_MS,
            });
        }
        let annotator = self.annotator()?;
        // strategies only look at the lengths, so any start date will do
        let start = self.cycle.start_date.unwrap_or_default();
        let config = CycleConfig::new(start, self.cycle.cycle_length, self.cycle.period_length)?;
        annotator.validate(&config)
    }

    /// The calculators' view of the cycle values.
    ///
    /// # Errors
    ///
    /// `ConfigError::MissingKey("cycle.start_date")` when no start date is
    /// stored; callers should skip the calculation entirely in that case.
    pub fn cycle_config(&self) -> Result<CycleConfig> {
        let start = self
            .cycle
            .start_date
            .ok_or_else(|| ConfigError::MissingKey(START_DATE_KEY.to_string()))?;
        Ok(CycleConfig::new(
            start,
            self.cycle.cycle_length,
            self.cycle.period_length,
        )?)
    }

    /// The configured annotation strategy.
    pub fn annotator(&self) -> Result<Box<dyn DayAnnotator>, InvalidConfiguration> {
        let display = &self.display;
        Ok(match display.strategy {
            StrategyKind::Phase => Box::new(PhaseClassifier::new(
                display.period_color.with_alpha(display.opacity)?,
                display.fertile_color.with_alpha(display.opacity)?,
            )),
            StrategyKind::Gradient => Box::new(GradientColorer::new(
                display.palette.clone(),
                display.opacity,
            )?),
        })
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.watch.debounce_ms)
    }
}
