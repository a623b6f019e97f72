//! CSS rendering of an annotation pass.

use crate::pass::CellAnnotation;

/// Placeholder replaced by each cell's key in a selector template.
pub const KEY_PLACEHOLDER: &str = "{key}";

/// Default selector: any element carrying the day's key as a data attribute.
pub const DEFAULT_SELECTOR: &str = "[data-date-key=\"{key}\"]";

/// A rendered stylesheet, one rule per styled cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    rules: Vec<String>,
}

impl Stylesheet {
    /// Render every styled annotation. Unstyled cells produce no rule.
    pub fn render(annotations: &[CellAnnotation], selector_template: &str) -> Self {
        let rules = annotations
            .iter()
            .filter_map(|a| {
                let style = a.style?;
                let selector = selector_template.replace(KEY_PLACEHOLDER, &escape_css_string(&a.cell.key));
                Some(format!(
                    "{selector} {{\n  background-color: {} !important;\n  color: {} !important;\n}}",
                    style.background.to_css(),
                    style.text.to_hex()
                ))
            })
            .collect();
        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl std::fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}

// keys land inside a quoted attribute selector
fn escape_css_string(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Rgb, Rgba};
    use crate::pass::DayCell;
    use crate::phase::CyclePhase;
    use crate::strategy::DayStyle;
    use chrono::NaiveDate;

    fn annotation(key: &str, style: Option<DayStyle>) -> CellAnnotation {
        CellAnnotation {
            cell: DayCell::new(key, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            day_in_cycle: Some(0),
            phase: CyclePhase::Period,
            style,
        }
    }

    fn burgundy() -> DayStyle {
        DayStyle::from_background(Rgba {
            rgb: Rgb::new(0x80, 0x00, 0x20),
            alpha: 0.6,
        })
    }

    #[test]
    fn renders_one_rule_per_styled_cell() {
        let sheet = Stylesheet::render(
            &[annotation("2024-01-01", Some(burgundy())), annotation("2024-01-02", None)],
            DEFAULT_SELECTOR,
        );
        assert_eq!(sheet.rule_count(), 1);
        assert_eq!(
            sheet.to_string(),
            "[data-date-key=\"2024-01-01\"] {\n  background-color: rgba(128, 0, 32, 0.6) !important;\n  color: #FFFFFF !important;\n}\n"
        );
    }

    #[test]
    fn empty_pass_renders_empty_sheet() {
        let sheet = Stylesheet::render(&[], DEFAULT_SELECTOR);
        assert!(sheet.is_empty());
        assert_eq!(sheet.to_string(), "");
    }

    #[test]
    fn custom_template_and_escaping() {
        let sheet = Stylesheet::render(
            &[annotation("a\"b", Some(burgundy()))],
            "td[data-key=\"{key}\"] > .header",
        );
        assert!(sheet.to_string().starts_with("td[data-key=\"a\\\"b\"] > .header {"));
    }
}
