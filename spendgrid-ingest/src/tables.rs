//! Read extracted statement tables from CSV exports.
//!
//! A statement document is either a single `.csv` file (one table) or a
//! directory whose `.csv` files, sorted by name, are the document's tables
//! in extraction order.

use spendgrid_core::{Error, RawGrid, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn is_table_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// Read one CSV table without interpreting any header row.
/// Rows are kept ragged; the normalizer decides which to keep.
pub fn read_table_csv(path: impl AsRef<Path>) -> Result<RawGrid> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(path.as_ref())?;

    let mut grid = RawGrid::new();
    for record in rdr.records() {
        let record = record?;
        grid.push_row(record.iter().map(str::to_string).collect());
    }
    Ok(grid)
}

/// Read every table belonging to one statement document
pub fn read_document_tables(path: impl AsRef<Path>) -> Result<Vec<RawGrid>> {
    let path = path.as_ref();
    if path.is_dir() {
        let mut files: Vec<PathBuf> = fs::read_dir(path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| is_table_file(p))
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(Error::EmptyExtraction);
        }

        debug!(document = %path.display(), tables = files.len(), "reading table directory");
        files.iter().map(read_table_csv).collect()
    } else {
        Ok(vec![read_table_csv(path)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_ragged_csv() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("table.csv");
        fs::write(&file, "Statement\n01/02/2025,\"SWIGGY, BANGALORE\",450.50\n").unwrap();

        let grid = read_table_csv(&file).unwrap();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.rows()[0].len(), 1);
        assert_eq!(grid.cell(1, 1), Some("SWIGGY, BANGALORE"));
    }

    #[test]
    fn test_directory_tables_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("page-2.csv"), "b\n").unwrap();
        fs::write(dir.path().join("page-1.csv"), "a\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored\n").unwrap();

        let tables = read_document_tables(dir.path()).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].cell(0, 0), Some("a"));
        assert_eq!(tables[1].cell(0, 0), Some("b"));
    }

    #[test]
    fn test_directory_without_tables_is_empty_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_document_tables(dir.path()).unwrap_err();
        assert!(matches!(err, Error::EmptyExtraction));
    }
}
