//! Statement month keys (`YYYY-MM`)

use chrono::Month;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Calendar month a statement document covers.
///
/// Ordering is chronological (year, then month), which is also the
/// lexicographic order of the `YYYY-MM` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return Err(Error::InvalidMonthKey(format!("{year}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// Build from a three-letter English month abbreviation (`"jan"`, `"Feb"`)
    pub fn from_abbr(abbr: &str, year: i32) -> Result<Self> {
        let month = abbr
            .parse::<Month>()
            .ok()
            .filter(|_| abbr.len() == 3)
            .ok_or_else(|| Error::InvalidMonthKey(format!("{abbr} {year}")))?;
        Self::new(year, month.number_from_month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Short display label, e.g. `"Jan 2025"`
    pub fn label(&self) -> String {
        let name = Month::try_from(self.month as u8)
            .map(|m| &m.name()[..3])
            .unwrap_or("???");
        format!("{} {}", name, self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidMonthKey(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}
