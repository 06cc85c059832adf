//! Terminal rendering for datebook types.
//!
//! Extension traits that add colored output to datebook-core types using
//! owo_colors.

use datebook_core::app::AnnotatedCell;
use datebook_core::grid::WEEKDAY_LABELS;
use datebook_core::{BookingEntry, DateKey};
use owo_colors::OwoColorize;

/// Width of one day column, not counting the separating space.
const CELL_WIDTH: usize = 4;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for BookingEntry {
    fn render(&self) -> String {
        let date = self.date.date().format("%a %b %-d %Y").to_string();
        format!("{}  {}", date.bold(), self.reason)
    }
}

/// Render a month: header, weekday labels, then one line per week row.
///
/// Booked days are highlighted and the selected day, if any, is reversed.
pub fn render_month(
    header: &str,
    rows: &[Vec<AnnotatedCell<'_>>],
    selected: Option<&DateKey>,
) -> String {
    let width = (CELL_WIDTH + 1) * WEEKDAY_LABELS.len() - 1;
    let mut lines = Vec::with_capacity(rows.len() + 2);

    lines.push(format!("{:^width$}", header).bold().to_string());
    lines.push(
        WEEKDAY_LABELS
            .iter()
            .map(|label| format!("{:>CELL_WIDTH$}", label))
            .collect::<Vec<_>>()
            .join(" ")
            .dimmed()
            .to_string(),
    );

    for row in rows {
        let line: String = row
            .iter()
            .map(|cell| render_cell(cell, selected))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(line);
    }

    lines.join("\n")
}

fn render_cell(cell: &AnnotatedCell<'_>, selected: Option<&DateKey>) -> String {
    match cell {
        AnnotatedCell::Empty => " ".repeat(CELL_WIDTH),
        AnnotatedCell::Day { day, key, reason } => {
            let text = format!("{:>CELL_WIDTH$}", day);
            if selected == Some(key) {
                text.reversed().to_string()
            } else if reason.is_some() {
                text.black().on_cyan().to_string()
            } else {
                text
            }
        }
    }
}

/// One line per booking, or a dimmed placeholder when there are none.
pub fn render_agenda(entries: &[&BookingEntry]) -> String {
    if entries.is_empty() {
        return "  No bookings".dimmed().to_string();
    }

    entries
        .iter()
        .map(|entry| format!("  {}", entry.render()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use datebook_core::app::CalendarApp;
    use datebook_core::storage::MemoryStore;
    use datebook_core::BookingStore;

    fn strip_ansi(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_render_month_layout() {
        let store = BookingStore::load(MemoryStore::new());
        let app = CalendarApp::new(store, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()).unwrap();
        let rows = app.annotated_grid().unwrap();

        let rendered = strip_ansi(&render_month(&app.header(), &rows, None));
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 2 + 5);
        assert!(lines[0].contains("January, 2023"));
        assert!(lines[1].contains("Sun") && lines[1].contains("Sat"));
        assert!(lines[2].trim_start().starts_with("1"));
        assert!(lines[6].trim_end().ends_with("31"));
    }

    #[test]
    fn test_render_agenda() {
        let entry = BookingEntry {
            date: DateKey::parse("2023-1-2").unwrap(),
            reason: "Dentist".into(),
        };

        let rendered = strip_ansi(&render_agenda(&[&entry]));
        assert_eq!(rendered, "  Mon Jan 2 2023  Dentist");
        assert_eq!(strip_ansi(&render_agenda(&[])), "  No bookings");
    }
}
