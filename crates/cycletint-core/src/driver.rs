//! Recompute-on-change driver.
//!
//! The calculators hold no state; this is the only place that reacts to the
//! host. Every pass reads settings fresh from the store, so an edit is never
//! masked by a cached copy.
//!
//! Notices arrive on a `tokio::sync::mpsc` channel:
//! - `SettingsUpdated` recomputes immediately.
//! - `CellsChanged` is debounced; each further notice restarts the timer.
//!
//! The loop ends when every sender has been dropped.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::error::{CoreError, Result};
use crate::host::{DayCellSource, SettingsStore, StyleSink};
use crate::pass::AnnotationPass;
use crate::stylesheet::Stylesheet;

/// Used when settings cannot be read to learn the configured delay.
const FALLBACK_DEBOUNCE: Duration = Duration::from_millis(500);

/// Something in the host changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeNotice {
    /// The visible day cells changed.
    CellsChanged,
    /// The user saved new settings.
    SettingsUpdated,
}

/// What a single recompute did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    Applied { cells: usize, rules: usize },
    /// No start date stored yet; styles were cleared.
    SkippedNoStartDate,
}

/// Owns the host collaborators and re-runs annotation passes.
pub struct Recomputer<C, S, K> {
    cells: C,
    store: S,
    sink: K,
}

impl<C, S, K> Recomputer<C, S, K>
where
    C: DayCellSource,
    S: SettingsStore,
    K: StyleSink,
{
    pub fn new(cells: C, store: S, sink: K) -> Self {
        Self { cells, store, sink }
    }

    /// Run one pass: load settings, annotate visible cells, apply the sheet.
    ///
    /// # Errors
    ///
    /// Settings that fail to load or an invalid configuration. The sink is
    /// cleared first in both cases so no stale styles remain.
    pub fn recompute(&mut self) -> Result<PassOutcome> {
        let settings = match self.store.load() {
            Ok(settings) => settings,
            Err(e) => {
                self.sink.clear();
                return Err(e);
            }
        };

        let pass = match AnnotationPass::prepare(&settings) {
            Ok(pass) => pass,
            Err(e) if e.is_missing_start_date() => {
                tracing::warn!("no cycle start date set; skipping pass");
                self.sink.clear();
                return Ok(PassOutcome::SkippedNoStartDate);
            }
            Err(e) => {
                self.sink.clear();
                return Err(e);
            }
        };

        let cells = self.cells.day_cells();
        let annotations = match pass.run(&cells) {
            Ok(annotations) => annotations,
            Err(e) => {
                self.sink.clear();
                return Err(CoreError::from(e));
            }
        };

        let sheet = Stylesheet::render(&annotations, &settings.display.selector);
        self.sink.apply(&sheet);

        Ok(PassOutcome::Applied {
            cells: cells.len(),
            rules: sheet.rule_count(),
        })
    }

    fn recompute_logged(&mut self, reason: &str) {
        tracing::info!(reason, "recomputing day styles");
        match self.recompute() {
            Ok(outcome) => tracing::debug!(?outcome, "recompute finished"),
            Err(e) => tracing::error!(error = %e, "recompute failed"),
        }
    }

    fn debounce_delay(&self) -> Duration {
        self.store
            .load()
            .map(|s| s.debounce())
            .unwrap_or(FALLBACK_DEBOUNCE)
    }

    /// Run an initial pass, then one per (debounced) notice until the
    /// channel closes. Failed passes are logged and the loop continues.
    pub async fn run(&mut self, mut notices: mpsc::Receiver<ChangeNotice>) {
        self.recompute_logged("initial");

        while let Some(notice) = notices.recv().await {
            match notice {
                ChangeNotice::SettingsUpdated => self.recompute_logged("settings updated"),
                ChangeNotice::CellsChanged => {
                    let delay = self.debounce_delay();
                    loop {
                        tokio::select! {
                            _ = tokio::time::sleep(delay) => break,
                            next = notices.recv() => match next {
                                Some(ChangeNotice::CellsChanged) => continue,
                                // settings change flushes the pending pass now
                                Some(ChangeNotice::SettingsUpdated) | None => break,
                            },
                        }
                    }
                    self.recompute_logged("day cells changed");
                }
            }
        }

        tracing::debug!("change channel closed; driver stopped");
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }
}
