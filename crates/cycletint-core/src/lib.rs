//! # cycletint Core Library
//!
//! Works out which phase of a recurring cycle a calendar date falls into and
//! turns that into a color for the host calendar to paint.
//!
//! ## Architecture
//!
//! - **Calculators**: pure functions of (date, config). [`classify`] gives the
//!   coarse period / fertile / neutral phase; [`color_for`] walks a
//!   [`GradientPalette`] across the non-period days.
//! - **Strategies**: [`PhaseClassifier`] and [`GradientColorer`] wrap the two
//!   models behind [`DayAnnotator`]; a deployment picks one.
//! - **Passes**: [`AnnotationPass`] validates a config once, then annotates
//!   every visible [`DayCell`]; [`Stylesheet`] renders the result as CSS.
//! - **Storage**: TOML-based [`Settings`].
//! - **Driver**: [`Recomputer`] re-runs passes on debounced change notices.
//!
//! The calculators never read settings, touch the host, or hold state; they
//! can be called from any number of threads at once.

pub mod color;
pub mod cycle;
pub mod date;
pub mod driver;
pub mod error;
pub mod gradient;
pub mod host;
pub mod palette;
pub mod pass;
pub mod phase;
pub mod storage;
pub mod strategy;
pub mod stylesheet;

pub use color::{Rgb, Rgba};
pub use cycle::CycleConfig;
pub use date::{format_date, parse_date_key};
pub use driver::{ChangeNotice, PassOutcome, Recomputer};
pub use error::{ConfigError, CoreError, InvalidConfiguration, ValidationError};
pub use gradient::color_for;
pub use host::{DayCellSource, FileSettingsStore, MemorySettingsStore, SettingsStore, StyleSink};
pub use palette::GradientPalette;
pub use pass::{AnnotationPass, CellAnnotation, DayCell};
pub use phase::{classify, CyclePhase, FertileWindow};
pub use storage::Settings;
pub use strategy::{DayAnnotator, DayStyle, GradientColorer, PhaseClassifier, StrategyKind};
pub use stylesheet::Stylesheet;
