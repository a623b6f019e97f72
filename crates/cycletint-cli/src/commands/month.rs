//! Terminal month view.

use chrono::{Datelike, Local, NaiveDate};
use clap::Args;

use cycletint_core::{CellAnnotation, CyclePhase, ValidationError};

use super::common::{ansi_paint, CycleOverrides};

#[derive(Args)]
pub struct MonthArgs {
    /// Month to show (YYYY-MM, defaults to the current month)
    #[arg(value_parser = parse_month)]
    month: Option<NaiveDate>,
    /// Mark phases with letters instead of colors
    #[arg(long)]
    no_color: bool,
    #[command(flatten)]
    overrides: CycleOverrides,
}

fn parse_month(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidValue {
            field: "month".to_string(),
            message: format!("'{s}' is not YYYY-MM"),
        }
        .to_string()
    })
}

fn last_day_of_month(first: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}

fn cell_text(annotation: &CellAnnotation, no_color: bool) -> String {
    let day = annotation.cell.date.day();
    if no_color {
        let mark = match annotation.phase {
            CyclePhase::Period => 'P',
            CyclePhase::Fertile => 'F',
            CyclePhase::Neutral => ' ',
        };
        return format!("{day:>2}{mark} ");
    }
    match &annotation.style {
        Some(style) => format!("{} ", ansi_paint(style, &format!("{day:>3}"))),
        None => format!("{day:>3} "),
    }
}

/// Monday-first grid, one row per week.
fn render(annotations: &[CellAnnotation], no_color: bool) -> String {
    let mut out = String::from("Mo  Tu  We  Th  Fr  Sa  Su\n");
    let Some(first) = annotations.first() else {
        return out;
    };

    let lead = first.cell.date.weekday().num_days_from_monday() as usize;
    let mut line = "    ".repeat(lead);
    let mut column = lead;

    for annotation in annotations {
        line.push_str(&cell_text(annotation, no_color));
        column += 1;
        if column == 7 {
            out.push_str(line.trim_end());
            out.push('\n');
            line.clear();
            column = 0;
        }
    }
    if !line.is_empty() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub fn run(args: MonthArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (settings, pass) = args.overrides.pass()?;

    let today = Local::now().date_naive();
    let first = args
        .month
        .or_else(|| today.with_day(1))
        .ok_or("cannot determine the current month")?;
    let last = last_day_of_month(first).ok_or("month is out of range")?;

    let annotations = pass.run_range(first, last)?;

    println!("{}  ({} strategy)", first.format("%B %Y"), settings.display.strategy);
    print!("{}", render(&annotations, args.no_color));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cycletint_core::{AnnotationPass, CycleConfig, PhaseClassifier};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parse_month_accepts_year_month() {
        assert_eq!(parse_month("2024-02"), Ok(d(2024, 2, 1)));
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("February").is_err());
    }

    #[test]
    fn last_day_handles_leap_years_and_december() {
        assert_eq!(last_day_of_month(d(2024, 2, 1)), Some(d(2024, 2, 29)));
        assert_eq!(last_day_of_month(d(2023, 2, 1)), Some(d(2023, 2, 28)));
        assert_eq!(last_day_of_month(d(2024, 12, 1)), Some(d(2024, 12, 31)));
    }

    #[test]
    fn plain_grid_for_january_2024() {
        // 2024-01-01 is a Monday
        let pass = AnnotationPass::new(
            CycleConfig::with_defaults(d(2024, 1, 1)),
            Box::new(PhaseClassifier::default()),
        )
        .unwrap();
        let annotations = pass.run_range(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let grid = render(&annotations, true);
        let lines: Vec<&str> = grid.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], " 1P  2P  3P  4P  5P  6   7");
        assert!(lines[2].starts_with(" 8   9   10  11F 12F"));
        assert_eq!(lines[5], "29P 30P 31P");
    }

    #[test]
    fn grid_pads_leading_weekdays() {
        // 2024-02-01 is a Thursday
        let pass = AnnotationPass::new(
            CycleConfig::with_defaults(d(2024, 1, 1)),
            Box::new(PhaseClassifier::default()),
        )
        .unwrap();
        let annotations = pass.run_range(d(2024, 2, 1), d(2024, 2, 4)).unwrap();
        let grid = render(&annotations, true);
        let expected = format!("{} 1P  2P  3   4", " ".repeat(12));
        assert_eq!(grid.lines().nth(1), Some(expected.as_str()));
    }
}
