//! Column role inference.
//!
//! Extracted tables have no trustworthy header, so each role is scored per
//! column from the cell contents:
//!
//! - **date**: share of cells starting with `dd/mm/yyyy` (or `-`
//!   separators). The first column above `date_threshold` wins.
//! - **description**: number of cells containing a merchant keyword. The
//!   rightmost column with at least one hit wins.
//! - **amount**: share of cells that parse as numbers once thousands
//!   separators are removed. The rightmost column above `amount_threshold`
//!   wins.
//!
//! A role with no qualifying column falls back to the statement template's
//! default index and is reported as [`RoleSource::Defaulted`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use spendgrid_core::{Error, RawGrid, Result, Role, parse_amount};
use std::sync::OnceLock;
use tracing::{debug, warn};

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}[-/]\d{2}[-/]\d{4}").expect("invalid date regex"))
}

/// Score thresholds; a column qualifies when its fraction is strictly greater
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    pub date_threshold: f64,
    pub amount_threshold: f64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            date_threshold: 0.5,
            amount_threshold: 0.7,
        }
    }
}

/// Fallback column indices for one statement template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleDefaults {
    pub date: usize,
    pub description: usize,
    pub amount: usize,
}

impl Default for RoleDefaults {
    fn default() -> Self {
        Self {
            date: 0,
            description: 1,
            amount: 6,
        }
    }
}

impl RoleDefaults {
    pub fn index_for(&self, role: Role) -> usize {
        match role {
            Role::Date => self.date,
            Role::Description => self.description,
            Role::Amount => self.amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleSource {
    /// A column met the role's scoring test
    Inferred,
    /// Nothing qualified; the template default was used
    Defaulted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleChoice {
    pub index: usize,
    pub source: RoleSource,
}

/// One column index per role, computed once per document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoles {
    pub date: RoleChoice,
    pub description: RoleChoice,
    pub amount: RoleChoice,
}

impl ColumnRoles {
    pub fn get(&self, role: Role) -> RoleChoice {
        match role {
            Role::Date => self.date,
            Role::Description => self.description,
            Role::Amount => self.amount,
        }
    }

    /// Roles that fell back to a template default
    pub fn defaulted(&self) -> Vec<Role> {
        [Role::Date, Role::Description, Role::Amount]
            .into_iter()
            .filter(|r| self.get(*r).source == RoleSource::Defaulted)
            .collect()
    }

    /// True when every role was inferred from the data
    pub fn is_confident(&self) -> bool {
        self.defaulted().is_empty()
    }
}

/// Per-column scores, indexed by column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnScores {
    pub date_fraction: Vec<f64>,
    pub keyword_hits: Vec<usize>,
    pub numeric_fraction: Vec<f64>,
}

/// Assigns date/description/amount roles to the columns of a normalized grid
#[derive(Debug, Clone)]
pub struct RoleInferrer {
    keywords: Vec<String>,
    config: InferenceConfig,
    defaults: RoleDefaults,
}

impl RoleInferrer {
    /// `keywords` are the merchant keywords that mark a description column;
    /// matching is case-insensitive.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_uppercase())
                .filter(|k| !k.is_empty())
                .collect(),
            config: InferenceConfig::default(),
            defaults: RoleDefaults::default(),
        }
    }

    pub fn with_config(mut self, config: InferenceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_defaults(mut self, defaults: RoleDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn score(&self, grid: &RawGrid) -> ColumnScores {
        let width = grid.width();
        let rows = grid.row_count();
        let fraction = |n: usize| if rows == 0 { 0.0 } else { n as f64 / rows as f64 };

        let mut scores = ColumnScores::default();
        for col in 0..width {
            let mut dates = 0;
            let mut hits = 0;
            let mut numeric = 0;
            for cell in grid.column(col) {
                let trimmed = cell.trim();
                if date_re().is_match(trimmed) {
                    dates += 1;
                }
                let upper = trimmed.to_uppercase();
                if self.keywords.iter().any(|k| upper.contains(k.as_str())) {
                    hits += 1;
                }
                if parse_amount(cell).is_some() {
                    numeric += 1;
                }
            }
            scores.date_fraction.push(fraction(dates));
            scores.keyword_hits.push(hits);
            scores.numeric_fraction.push(fraction(numeric));
        }
        scores
    }

    /// Infer the column roles of `grid`.
    ///
    /// Errors with [`Error::RoleUnassigned`] when a role had to fall back to
    /// a default index the grid does not have.
    pub fn infer(&self, grid: &RawGrid) -> Result<ColumnRoles> {
        let scores = self.score(grid);
        debug!(?scores, "column scores");

        let date = scores
            .date_fraction
            .iter()
            .position(|&f| f > self.config.date_threshold);
        let description = scores.keyword_hits.iter().rposition(|&hits| hits > 0);
        let amount = scores
            .numeric_fraction
            .iter()
            .rposition(|&f| f > self.config.amount_threshold);

        let width = grid.width();
        let roles = ColumnRoles {
            date: self.choose(Role::Date, date, width)?,
            description: self.choose(Role::Description, description, width)?,
            amount: self.choose(Role::Amount, amount, width)?,
        };

        let defaulted = roles.defaulted();
        if !defaulted.is_empty() {
            warn!(?defaulted, "no column qualified for some roles; using template defaults");
        }
        Ok(roles)
    }

    fn choose(&self, role: Role, inferred: Option<usize>, width: usize) -> Result<RoleChoice> {
        if let Some(index) = inferred {
            return Ok(RoleChoice {
                index,
                source: RoleSource::Inferred,
            });
        }
        let index = self.defaults.index_for(role);
        if index >= width {
            return Err(Error::RoleUnassigned { role, index, width });
        }
        Ok(RoleChoice {
            index,
            source: RoleSource::Defaulted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inferrer() -> RoleInferrer {
        RoleInferrer::new(["SWIGGY", "ZOMATO", "BLINKIT"])
    }

    /// Seven-column layout the template defaults were written for
    fn statement_grid() -> RawGrid {
        RawGrid::from_rows(vec![
            vec!["01/02/2025", "SWIGGY ORDER", "REF1", "", "", "", "450.50"],
            vec!["02/02/2025", "ZOMATO FOOD", "REF2", "", "", "", "300.00"],
            vec!["03/02/2025", "AMAZON", "REF3", "", "", "", "1,299.00"],
        ])
    }

    #[test]
    fn test_infers_roles_on_statement_layout() {
        let roles = inferrer().infer(&statement_grid()).unwrap();
        assert_eq!(roles.date.index, 0);
        assert_eq!(roles.description.index, 1);
        assert_eq!(roles.amount.index, 6);
        assert!(roles.is_confident());
    }

    #[test]
    fn test_date_column_needs_majority() {
        let grid = RawGrid::from_rows(vec![
            vec!["x", "01-02-2025", "02/02/2025", "SWIGGY", "10"],
            vec!["y", "02-02-2025", "", "ZOMATO", "20"],
            vec!["z", "n/a", "", "BLINKIT", "30"],
        ]);
        let roles = inferrer().infer(&grid).unwrap();
        assert_eq!(roles.date.index, 1);
        assert_eq!(roles.date.source, RoleSource::Inferred);
    }

    #[test]
    fn test_first_qualifying_date_column_wins() {
        let grid = RawGrid::from_rows(vec![
            vec!["01/02/2025", "03/02/2025", "SWIGGY", "10"],
            vec!["02/02/2025", "04/02/2025", "ZOMATO", "20"],
        ]);
        assert_eq!(inferrer().infer(&grid).unwrap().date.index, 0);
    }

    #[test]
    fn test_date_pattern_is_anchored_at_start() {
        let grid = RawGrid::from_rows(vec![
            vec!["Txn 01/02/2025", "01/02/2025 10:15", "SWIGGY", "10"],
            vec!["Txn 02/02/2025", "02/02/2025 11:40", "ZOMATO", "20"],
        ]);
        assert_eq!(inferrer().infer(&grid).unwrap().date.index, 1);
    }

    #[test]
    fn test_description_rightmost_keyword_column_wins() {
        // Both column 1 and column 3 mention merchants; the later one is used.
        let grid = RawGrid::from_rows(vec![
            vec!["01/02/2025", "SWIGGY", "x", "UPI-ZOMATO", "10"],
            vec!["02/02/2025", "SWIGGY", "y", "CARD PAYMENT", "20"],
            vec!["03/02/2025", "BLINKIT", "z", "FUEL", "30"],
        ]);
        let roles = inferrer().infer(&grid).unwrap();
        assert_eq!(roles.description.index, 3);
        assert_eq!(roles.description.source, RoleSource::Inferred);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let grid = RawGrid::from_rows(vec![
            vec!["01/02/2025", "ref", "  swiggy instamart ", "10"],
            vec!["02/02/2025", "ref", "fuel", "20"],
        ]);
        assert_eq!(inferrer().infer(&grid).unwrap().description.index, 2);
    }

    #[test]
    fn test_amount_rightmost_numeric_column_wins() {
        let grid = RawGrid::from_rows(vec![
            vec!["01/02/2025", "SWIGGY", "1001", "450.50", "1,000.00", "Dr"],
            vec!["02/02/2025", "ZOMATO", "1002", "300.00", "1,300.00", "Dr"],
            vec!["03/02/2025", "BLINKIT", "1003", "120.00", "1,420.00", "Dr"],
        ]);
        let roles = inferrer().infer(&grid).unwrap();
        assert_eq!(roles.amount.index, 4);
    }

    #[test]
    fn test_amount_threshold_is_strict() {
        // Column 2 parses in 7 of 10 rows: exactly 0.7 does not qualify.
        let rows: Vec<Vec<String>> = (0..10)
            .map(|i| {
                let amount = if i < 7 { format!("{i}.00") } else { "N/A".to_string() };
                vec![format!("0{}/02/2025", i % 9 + 1), "SWIGGY".to_string(), amount]
            })
            .collect();
        let grid = RawGrid::from_rows(rows);
        let scores = inferrer().score(&grid);
        assert!((scores.numeric_fraction[2] - 0.7).abs() < 1e-9);

        let err = inferrer().infer(&grid).unwrap_err();
        assert!(matches!(
            err,
            Error::RoleUnassigned { role: Role::Amount, index: 6, width: 3 }
        ));
    }

    #[test]
    fn test_defaults_are_reported() {
        let grid = RawGrid::from_rows(vec![
            vec!["Feb", "AMAZON", "a", "b", "c", "d", "99.00"],
            vec!["Feb", "UBER", "a", "b", "c", "d", "12.00"],
        ]);
        let roles = inferrer().infer(&grid).unwrap();
        assert_eq!(roles.date, RoleChoice { index: 0, source: RoleSource::Defaulted });
        assert_eq!(roles.description, RoleChoice { index: 1, source: RoleSource::Defaulted });
        assert_eq!(roles.amount.source, RoleSource::Inferred);
        assert_eq!(roles.defaulted(), vec![Role::Date, Role::Description]);
        assert!(!roles.is_confident());
    }

    #[test]
    fn test_builtin_amount_default_on_wide_grid() {
        // Seven columns, nothing numeric enough: amount falls back to column 6.
        let grid = RawGrid::from_rows(vec![
            vec!["01/02/2025", "SWIGGY ORDER", "a", "b", "c", "d", "450.50"],
            vec!["02/02/2025", "ZOMATO FOOD", "a", "b", "c", "d", "N/A"],
            vec!["03/02/2025", "BLINKIT", "a", "b", "c", "d", "--"],
        ]);
        let roles = inferrer().infer(&grid).unwrap();
        assert_eq!(roles.amount, RoleChoice { index: 6, source: RoleSource::Defaulted });
        assert_eq!(roles.date.source, RoleSource::Inferred);
        assert_eq!(roles.defaulted(), vec![Role::Amount]);
    }

    #[test]
    fn test_custom_template_defaults() {
        let grid = RawGrid::from_rows(vec![vec!["x", "y", "z"], vec!["x", "y", "z"]]);
        let roles = inferrer()
            .with_defaults(RoleDefaults { date: 0, description: 1, amount: 2 })
            .infer(&grid)
            .unwrap();
        assert_eq!(roles.amount, RoleChoice { index: 2, source: RoleSource::Defaulted });
    }

    #[test]
    fn test_empty_grid_cannot_be_assigned() {
        let err = inferrer().infer(&RawGrid::new()).unwrap_err();
        assert!(matches!(err, Error::RoleUnassigned { role: Role::Date, width: 0, .. }));
    }
}
