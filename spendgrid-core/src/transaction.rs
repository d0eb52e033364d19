//! Typed transaction rows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Day-first layouts seen in card statements, tried in order.
/// Two-digit years go first: `%Y` would read `25` as year 25.
const DAY_FIRST_FORMATS: &[&str] = &[
    "%d/%m/%y",
    "%d-%m-%y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %b %Y",
    "%d-%b-%Y",
    "%d %B %Y",
    "%Y-%m-%d",
];

/// One statement line item, built from a single grid row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Date cell as extracted; parsed lazily
    pub date: String,
    pub description: String,
    /// Amount as printed on the statement (spends are positive)
    pub amount: f64,
}

impl Transaction {
    pub fn new(date: impl Into<String>, description: impl Into<String>, amount: f64) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            amount,
        }
    }

    /// Interpret the date cell day-first (`01/02/2025` is 1 Feb 2025)
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_day_first(&self.date)
    }

    /// Date as `"01 Feb 2025"`, or blank when the cell is not a date
    pub fn display_date(&self) -> String {
        self.parsed_date()
            .map(|d| d.format("%d %b %Y").to_string())
            .unwrap_or_default()
    }
}

/// Parse a date cell with day-first interpretation.
///
/// Extra text after a leading `dd/mm/yyyy` (a time, a second date on a
/// merged cell) is ignored.
pub fn parse_day_first(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DAY_FIRST_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    let head = s.split_whitespace().next()?;
    if head != s {
        return parse_day_first(head);
    }
    None
}
