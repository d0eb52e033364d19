//! Grid normalizer: merge a document's tables into one row set

use spendgrid_core::{Error, RawGrid, Result};
use std::collections::HashMap;
use tracing::debug;

/// Concatenate `tables` in extraction order into a single grid.
///
/// The grid width is the most common row length (ties go to the wider
/// length); rows of any other length are excluded, as are rows whose first
/// cell is blank. Fails with [`Error::EmptyExtraction`] when there are no
/// tables at all.
pub fn normalize_tables(tables: &[RawGrid]) -> Result<RawGrid> {
    if tables.is_empty() {
        return Err(Error::EmptyExtraction);
    }

    let all_rows = tables.iter().flat_map(|t| t.rows().iter());
    let width = dominant_width(all_rows.clone());

    let mut grid = RawGrid::new();
    let mut ragged = 0usize;
    let mut blank_key = 0usize;

    for row in all_rows {
        if row.len() != width {
            ragged += 1;
            continue;
        }
        if row.first().is_none_or(|c| c.trim().is_empty()) {
            blank_key += 1;
            continue;
        }
        grid.push_row(row.clone());
    }

    debug!(
        tables = tables.len(),
        width,
        kept = grid.row_count(),
        ragged,
        blank_key,
        "normalized extracted tables"
    );

    Ok(grid)
}

fn dominant_width<'a>(rows: impl Iterator<Item = &'a Vec<String>>) -> usize {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for row in rows.filter(|r| !r.is_empty()) {
        *counts.entry(row.len()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by_key(|&(width, count)| (count, width))
        .map(|(width, _)| width)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collection_is_empty_extraction() {
        assert!(matches!(normalize_tables(&[]), Err(Error::EmptyExtraction)));
    }

    #[test]
    fn test_concatenates_in_order_and_drops_blank_keys() {
        let page1 = RawGrid::from_rows(vec![
            vec!["01/02/2025", "SWIGGY", "100"],
            vec!["", "continued", ""],
        ]);
        let page2 = RawGrid::from_rows(vec![
            vec!["03/02/2025", "ZOMATO", "200"],
            vec!["  ", "x", "1"],
        ]);

        let grid = normalize_tables(&[page1, page2]).unwrap();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.cell(0, 1), Some("SWIGGY"));
        assert_eq!(grid.cell(1, 1), Some("ZOMATO"));
    }

    #[test]
    fn test_ragged_rows_are_excluded() {
        let table = RawGrid::from_rows(vec![
            vec!["Statement summary"],
            vec!["01/02/2025", "SWIGGY", "100"],
            vec!["02/02/2025", "BLINKIT", "50"],
            vec!["Total", "150"],
        ]);

        let grid = normalize_tables(&[table]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.row_count(), 2);
    }

    #[test]
    fn test_width_tie_prefers_wider_rows() {
        let table = RawGrid::from_rows(vec![vec!["a", "b"], vec!["c", "d", "e"]]);
        let grid = normalize_tables(&[table]).unwrap();
        assert_eq!(grid.rows(), &[vec!["c".to_string(), "d".into(), "e".into()]]);
    }

    #[test]
    fn test_tables_without_rows_give_empty_grid() {
        let grid = normalize_tables(&[RawGrid::new()]).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.width(), 0);
    }
}
