//! Stylesheet output for a list of host date keys.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;

use cycletint_core::{DayCell, Stylesheet};

use super::common::CycleOverrides;

#[derive(Args)]
pub struct CssArgs {
    /// File with one date key per line (reads stdin when omitted)
    file: Option<PathBuf>,
    /// Selector template; {key} is replaced by each date key
    #[arg(long)]
    selector: Option<String>,
    #[command(flatten)]
    overrides: CycleOverrides,
}

/// Parse date keys, skipping blank lines and `#` comments.
/// Keys that are not dates are logged and skipped.
pub fn parse_cells(text: &str) -> Vec<DayCell> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| match DayCell::from_key(line) {
            Ok(cell) => Some(cell),
            Err(e) => {
                tracing::warn!(key = line, error = %e, "skipping date key");
                None
            }
        })
        .collect()
}

pub fn read_cells(file: Option<&Path>) -> std::io::Result<Vec<DayCell>> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(parse_cells(&text))
}

pub fn run(args: CssArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (settings, pass) = args.overrides.pass()?;
    let cells = read_cells(args.file.as_deref())?;

    let annotations = pass.run(&cells)?;
    let selector = args.selector.as_deref().unwrap_or(&settings.display.selector);
    print!("{}", Stylesheet::render(&annotations, selector));
    Ok(())
}
