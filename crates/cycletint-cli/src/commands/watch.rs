//! Long-running stylesheet regeneration.
//!
//! Polls the date-key file and the settings file for modification and feeds
//! change notices to the core driver. Each new stylesheet is printed to
//! stdout, preceded by a comment line. Command-line cycle overrides are
//! layered over the settings file on every pass.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use clap::Args;
use tokio::sync::mpsc;

use cycletint_core::{
    ChangeNotice, CoreError, DayCell, DayCellSource, FileSettingsStore, Recomputer, Settings,
    SettingsStore, StyleSink, Stylesheet,
};

use super::common::CycleOverrides;
use super::css::read_cells;

#[derive(Args)]
pub struct WatchArgs {
    /// File with one date key per line, rewritten by the host
    file: PathBuf,
    /// How often to check the files for changes (milliseconds)
    #[arg(long, default_value_t = 250, value_parser = clap::value_parser!(u64).range(1..))]
    poll_ms: u64,
    #[command(flatten)]
    overrides: CycleOverrides,
}

/// Settings file with the invocation's overrides applied on each load.
struct OverriddenStore {
    file: FileSettingsStore,
    overrides: CycleOverrides,
}

impl SettingsStore for OverriddenStore {
    fn load(&self) -> Result<Settings, CoreError> {
        let mut settings = self.file.load()?;
        self.overrides.apply_to(&mut settings);
        settings.validate()?;
        Ok(settings)
    }

    fn save(&self, settings: &Settings) -> Result<(), CoreError> {
        self.file.save(settings)
    }
}

/// Day cells re-read from a file on every pass.
struct FileDayCells {
    path: PathBuf,
}

impl DayCellSource for FileDayCells {
    fn day_cells(&self) -> Vec<DayCell> {
        read_cells(Some(&self.path)).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "cannot read date keys");
            Vec::new()
        })
    }
}

/// Prints every stylesheet to stdout.
struct StdoutSink;

impl StyleSink for StdoutSink {
    fn apply(&mut self, stylesheet: &Stylesheet) {
        println!("/* cycletint: {} rules */", stylesheet.rule_count());
        print!("{stylesheet}");
    }

    fn clear(&mut self) {
        println!("/* cycletint: cleared */");
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

async fn poll_files(
    cells_path: PathBuf,
    settings_path: PathBuf,
    interval: Duration,
    tx: mpsc::Sender<ChangeNotice>,
) {
    let mut cells_seen = modified(&cells_path);
    let mut settings_seen = modified(&settings_path);
    let mut ticker = tokio::time::interval(interval);

    loop {
        ticker.tick().await;

        let settings_now = modified(&settings_path);
        if settings_now != settings_seen {
            settings_seen = settings_now;
            if tx.send(ChangeNotice::SettingsUpdated).await.is_err() {
                return;
            }
        }

        let cells_now = modified(&cells_path);
        if cells_now != cells_seen {
            cells_seen = cells_now;
            if tx.send(ChangeNotice::CellsChanged).await.is_err() {
                return;
            }
        }
    }
}

pub fn run(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let settings_path = Settings::path()?;
    let store = OverriddenStore {
        file: FileSettingsStore::new(&settings_path),
        overrides: args.overrides,
    };
    // fail early on broken settings rather than inside the loop
    store.load()?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let (tx, rx) = mpsc::channel(32);
        let poller = tokio::spawn(poll_files(
            args.file.clone(),
            settings_path.clone(),
            Duration::from_millis(args.poll_ms),
            tx,
        ));

        let mut driver = Recomputer::new(
            FileDayCells { path: args.file },
            store,
            StdoutSink,
        );

        tokio::select! {
            _ = driver.run(rx) => {}
            _ = tokio::signal::ctrl_c() => tracing::info!("interrupted; stopping watch"),
        }
        poller.abort();
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use cycletint_core::{InvalidConfiguration, StrategyKind};

    #[derive(Parser)]
    struct WatchCli {
        #[command(flatten)]
        args: WatchArgs,
    }

    #[test]
    fn poll_interval_must_be_positive() {
        assert!(WatchCli::try_parse_from(["watch", "keys.txt", "--poll-ms", "0"]).is_err());

        let cli = WatchCli::try_parse_from(["watch", "keys.txt", "--poll-ms", "1"]).unwrap();
        assert_eq!(cli.args.poll_ms, 1);
        let cli = WatchCli::try_parse_from(["watch", "keys.txt"]).unwrap();
        assert_eq!(cli.args.poll_ms, 250);
    }

    #[test]
    fn watch_accepts_cycle_overrides() {
        let cli = WatchCli::try_parse_from([
            "watch",
            "keys.txt",
            "--start",
            "2024-01-01",
            "--strategy",
            "phase",
        ])
        .unwrap();
        assert_eq!(
            cli.args.overrides.start,
            chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(cli.args.overrides.strategy, Some(StrategyKind::Phase));
    }

    #[test]
    fn missing_key_file_yields_no_cells() {
        let dir = tempfile::tempdir().unwrap();
        let cells = FileDayCells {
            path: dir.path().join("missing.txt"),
        };
        assert!(cells.day_cells().is_empty());
    }

    #[test]
    fn key_file_is_reread_on_every_call() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.txt");
        std::fs::write(&path, "2024-01-01\n").unwrap();
        let cells = FileDayCells { path: path.clone() };
        assert_eq!(cells.day_cells().len(), 1);

        std::fs::write(&path, "2024-01-01\n# comment\n2024-01-02\nnope\n").unwrap();
        assert_eq!(cells.day_cells().len(), 2);
    }

    #[test]
    fn overrides_are_layered_over_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = OverriddenStore {
            file: FileSettingsStore::new(dir.path().join("settings.toml")),
            overrides: CycleOverrides {
                start: chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
                cycle_length: Some(30),
                ..Default::default()
            },
        };

        let settings = store.load().unwrap();
        assert_eq!(settings.cycle.start_date, chrono::NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(settings.cycle.cycle_length, 30);
        // the file itself keeps its own values
        let on_disk = Settings::load_from(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(on_disk.cycle.start_date, None);
        assert_eq!(on_disk.cycle.cycle_length, 28);
    }

    #[test]
    fn overrides_that_break_the_gradient_fail_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = OverriddenStore {
            file: FileSettingsStore::new(dir.path().join("settings.toml")),
            overrides: CycleOverrides {
                period_length: Some(28),
                ..Default::default()
            },
        };
        assert!(matches!(
            store.load(),
            Err(CoreError::InvalidConfiguration(
                InvalidConfiguration::NoGradientSpan { .. }
            ))
        ));
    }
}
