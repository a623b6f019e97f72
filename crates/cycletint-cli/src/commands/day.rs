//! Single-day and date-range queries.

use chrono::{Local, NaiveDate};
use clap::Args;
use serde::Serialize;

use cycletint_core::{format_date, CellAnnotation, DayCell};

use super::common::{describe, parse_date_arg, CycleOverrides};

#[derive(Args)]
pub struct DayArgs {
    /// Date to check (YYYY-MM-DD, defaults to today)
    #[arg(value_parser = parse_date_arg)]
    date: Option<NaiveDate>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    overrides: CycleOverrides,
}

#[derive(Args)]
pub struct RangeArgs {
    /// First date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    from: NaiveDate,
    /// Last date, inclusive (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    to: NaiveDate,
    /// Output as JSON
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    overrides: CycleOverrides,
}

/// JSON shape of one day.
#[derive(Serialize)]
struct DayReport<'a> {
    date: &'a str,
    day_in_cycle: Option<u32>,
    cycle_length: u32,
    phase: &'a str,
    color: Option<String>,
    text_color: Option<String>,
}

impl<'a> DayReport<'a> {
    fn new(annotation: &'a CellAnnotation, cycle_length: u32) -> Self {
        Self {
            date: &annotation.cell.key,
            day_in_cycle: annotation.day_in_cycle,
            cycle_length,
            phase: annotation.phase.as_str(),
            color: annotation.style.map(|s| s.background.rgb.to_hex()),
            text_color: annotation.style.map(|s| s.text.to_hex()),
        }
    }
}

pub fn run_day(args: DayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_, pass) = args.overrides.pass()?;
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());

    let annotation = pass.annotate(&DayCell::new(format_date(date), date))?;
    let cycle_length = pass.config().cycle_length();

    if args.json {
        let report = DayReport::new(&annotation, cycle_length);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", describe(&annotation, cycle_length));
    }
    Ok(())
}

pub fn run_range(args: RangeArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.to < args.from {
        return Err(format!("--to ({}) is before --from ({})", args.to, args.from).into());
    }
    let (_, pass) = args.overrides.pass()?;
    let annotations = pass.run_range(args.from, args.to)?;
    let cycle_length = pass.config().cycle_length();

    if args.json {
        let reports: Vec<DayReport> = annotations
            .iter()
            .map(|a| DayReport::new(a, cycle_length))
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for annotation in &annotations {
            println!("{}", describe(annotation, cycle_length));
        }
    }
    Ok(())
}
