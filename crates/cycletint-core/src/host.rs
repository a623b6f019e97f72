//! Interfaces to the host environment.
//!
//! The calculators never touch these; the recompute driver wires them
//! together. Finding day cells in a real document is the host's business.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::pass::DayCell;
use crate::storage::Settings;
use crate::stylesheet::Stylesheet;

/// Supplies the day cells currently visible in the host.
pub trait DayCellSource: Send {
    fn day_cells(&self) -> Vec<DayCell>;
}

/// Persists and retrieves settings.
pub trait SettingsStore: Send {
    fn load(&self) -> Result<Settings>;
    fn save(&self, settings: &Settings) -> Result<()>;
}

/// Receives rendered styles.
pub trait StyleSink: Send {
    /// Replace whatever was applied before.
    fn apply(&mut self, stylesheet: &Stylesheet);

    /// Remove all applied styling.
    fn clear(&mut self);
}

/// Settings in a TOML file.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default data directory location.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(Settings::path()?))
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<Settings> {
        Settings::load_from(&self.path)
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        settings.save_to(&self.path)
    }
}

/// Settings held in memory and shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    inner: Arc<Mutex<Settings>>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(Mutex::new(settings)),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Settings> {
        // a poisoned lock still holds the last settings written
        Ok(self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = settings.clone();
        Ok(())
    }
}

/// Day cells from a fixed list shared between clones.
#[derive(Debug, Clone, Default)]
pub struct StaticDayCells {
    cells: Arc<Mutex<Vec<DayCell>>>,
}

impl StaticDayCells {
    pub fn new(cells: Vec<DayCell>) -> Self {
        Self {
            cells: Arc::new(Mutex::new(cells)),
        }
    }

    /// Swap in a new set of visible cells.
    pub fn replace(&self, cells: Vec<DayCell>) {
        *self.cells.lock().unwrap_or_else(|e| e.into_inner()) = cells;
    }
}

impl DayCellSource for StaticDayCells {
    fn day_cells(&self) -> Vec<DayCell> {
        self.cells.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Keeps the last stylesheet applied; `None` after a clear.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    current: Arc<Mutex<Option<Stylesheet>>>,
    applied: Arc<Mutex<usize>>,
}

impl RecordingSink {
    pub fn current(&self) -> Option<Stylesheet> {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of `apply` calls so far.
    pub fn apply_count(&self) -> usize {
        *self.applied.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StyleSink for RecordingSink {
    fn apply(&mut self, stylesheet: &Stylesheet) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = Some(stylesheet.clone());
        *self.applied.lock().unwrap_or_else(|e| e.into_inner()) += 1;
    }

    fn clear(&mut self) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn memory_store_shares_between_clones() {
        let store = MemorySettingsStore::default();
        let other = store.clone();
        let mut s = Settings::default();
        s.cycle.start_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        other.save(&s).unwrap();
        assert_eq!(store.load().unwrap(), s);
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSettingsStore::new(dir.path().join("settings.toml"));
        let mut s = store.load().unwrap();
        s.cycle.cycle_length = 31;
        store.save(&s).unwrap();
        assert_eq!(store.load().unwrap().cycle.cycle_length, 31);
    }

    #[test]
    fn static_cells_replace() {
        let cells = StaticDayCells::default();
        assert!(cells.day_cells().is_empty());
        cells.replace(vec![DayCell::from_key("2024-01-01").unwrap()]);
        assert_eq!(cells.day_cells().len(), 1);
    }
}
