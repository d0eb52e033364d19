//! Transaction extraction from a grid with known column roles

use serde::{Deserialize, Serialize};
use spendgrid_core::{RawGrid, Transaction, parse_amount};
use tracing::debug;

use crate::roles::ColumnRoles;

/// Row counts from one extraction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub rows: usize,
    pub extracted: usize,
    /// Rows dropped because the amount cell was not numeric
    pub unparsable_amounts: usize,
}

/// Build one [`Transaction`] per grid row whose amount cell parses.
///
/// Output order follows row order. Date and description cells are kept as
/// extracted (trimmed); case folding happens at merchant matching time.
pub fn extract_transactions(grid: &RawGrid, roles: &ColumnRoles) -> (Vec<Transaction>, ExtractionStats) {
    let mut stats = ExtractionStats {
        rows: grid.row_count(),
        ..Default::default()
    };
    let mut out = Vec::with_capacity(grid.row_count());

    for (i, row) in grid.rows().iter().enumerate() {
        let cell = |idx: usize| row.get(idx).map(|s| s.trim()).unwrap_or("");

        let raw_amount = cell(roles.amount.index);
        let amount = match parse_amount(raw_amount) {
            Some(a) => a,
            None => {
                debug!(row = i, amount = raw_amount, "dropping row with unparsable amount");
                stats.unparsable_amounts += 1;
                continue;
            }
        };

        out.push(Transaction::new(
            cell(roles.date.index),
            cell(roles.description.index),
            amount,
        ));
    }

    stats.extracted = out.len();
    (out, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{RoleChoice, RoleSource};

    fn roles(date: usize, description: usize, amount: usize) -> ColumnRoles {
        let pick = |index| RoleChoice {
            index,
            source: RoleSource::Inferred,
        };
        ColumnRoles {
            date: pick(date),
            description: pick(description),
            amount: pick(amount),
        }
    }

    #[test]
    fn test_extracts_in_row_order() {
        let grid = RawGrid::from_rows(vec![
            vec!["01/02/2025", "Swiggy Order", "1,450.50"],
            vec!["02/02/2025", "ZOMATO FOOD", "300.00"],
        ]);
        let (txns, stats) = extract_transactions(&grid, &roles(0, 1, 2));

        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0], Transaction::new("01/02/2025", "Swiggy Order", 1450.5));
        assert_eq!(txns[1].amount, 300.0);
        assert_eq!(stats.extracted, 2);
        assert_eq!(stats.unparsable_amounts, 0);
    }

    #[test]
    fn test_unparsable_amounts_are_dropped() {
        let grid = RawGrid::from_rows(vec![
            vec!["Date", "Description", "Amount"],
            vec!["01/02/2025", "SWIGGY", "N/A"],
            vec!["02/02/2025", "ZOMATO", "--"],
            vec!["03/02/2025", "BLINKIT", "99.00"],
        ]);
        let (txns, stats) = extract_transactions(&grid, &roles(0, 1, 2));

        assert_eq!(txns.len(), 1);
        assert!(txns.len() <= grid.row_count());
        assert_eq!(txns[0].description, "BLINKIT");
        assert_eq!(stats, ExtractionStats { rows: 4, extracted: 1, unparsable_amounts: 3 });
    }

    #[test]
    fn test_description_keeps_original_case() {
        let grid = RawGrid::from_rows(vec![vec!["01/02/2025", "  swiggy ", "10"]]);
        let (txns, _) = extract_transactions(&grid, &roles(0, 1, 2));
        assert_eq!(txns[0].description, "swiggy");
    }
}
