use chrono::{DateTime, Utc};
use clap::ValueEnum;
use comfy_table::{Cell, Color, Table};
use pinergy_core::timestamp;
use serde::Serialize;

mod account;
mod info;
mod topup;
mod usage;

/// Placeholder cell for rows cut from a long listing.
const ELLIPSIS: &str = "…";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    #[default]
    PlainText,
}

#[derive(Debug, Default)]
pub struct Output {
    format: Format,
}

/// Plain-text rendering of a command result.
pub trait Report {
    fn render(&self) -> String;

    fn report(&self) {
        println!("{}", self.render());
    }
}

impl Output {
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    pub fn write<T: Serialize + Report>(&self, value: &T) {
        match self.format {
            Format::Json => match serde_json::to_string_pretty(value) {
                Ok(json) => println!("{json}"),
                Err(err) => eprintln!("Failed to serialize to JSON: {err}"),
            },
            Format::PlainText => value.report(),
        }
    }

    pub fn error(&self, message: &str) {
        match self.format {
            Format::Json => eprintln!("{}", serde_json::json!({ "error": message })),
            Format::PlainText => eprintln!("Error: {message}"),
        }
    }
}

/// A table with the shared preset and blue headers.
fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    let _ = table.load_preset(comfy_table::presets::UTF8_FULL);
    let _ = table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    let _ = table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Blue))
            .collect::<Vec<_>>(),
    );
    table
}

fn titled(title: &str, table: &Table) -> String {
    format!("{title}\n{table}")
}

/// Adds at most `limit` rows, then one ellipsis row if anything was cut.
fn add_limited<I>(table: &mut Table, rows: I, total: usize, limit: usize, width: usize)
where
    I: IntoIterator<Item = Vec<String>>,
{
    for row in rows.into_iter().take(limit) {
        let _ = table.add_row(row);
    }
    if total > limit {
        let _ = table.add_row(vec![ELLIPSIS; width]);
    }
}

fn euro(amount: f64) -> String {
    format!("€{amount:.2}")
}

/// `YYYY-MM-DD` for a positive unix timestamp, empty otherwise.
fn date(seconds: i64) -> String {
    timestamp(seconds)
        .map(|at: DateTime<Utc>| at.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_render_as_calendar_days() {
        assert_eq!(date(1_700_000_000), "2023-11-14");
        assert_eq!(date(0), "");
        assert_eq!(date(-5), "");
    }

    #[test]
    fn euro_amounts_have_two_decimals() {
        assert_eq!(euro(12.5), "€12.50");
        assert_eq!(euro(0.0), "€0.00");
    }

    #[test]
    fn limited_rows_end_with_ellipsis() {
        let mut t = table(&["A", "B"]);
        let rows = (0..20).map(|i| vec![i.to_string(), "x".to_string()]);
        add_limited(&mut t, rows, 20, 15, 2);
        assert_eq!(t.row_iter().count(), 16);
        assert!(t.to_string().contains(ELLIPSIS));
    }

    #[test]
    fn short_listings_have_no_ellipsis() {
        let mut t = table(&["A"]);
        add_limited(&mut t, vec![vec!["1".to_string()]], 1, 15, 1);
        assert_eq!(t.row_iter().count(), 1);
        assert!(!t.to_string().contains(ELLIPSIS));
    }

    #[test]
    fn default_format_is_plain_text() {
        assert_eq!(Format::default(), Format::PlainText);
    }
}
