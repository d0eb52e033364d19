//! Find statement documents in a folder and date them from their names.
//!
//! Expected names: `Jan_2025_StandardChartered.csv` (one table) or
//! `Jan_2025_StandardChartered/` (a folder of per-page tables).

use anyhow::{Context, Result};
use regex::Regex;
use spendgrid_core::MonthKey;
use spendgrid_ingest::is_table_file;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::warn;

fn name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z]{3})_(\d{4})_").expect("invalid statement name regex"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementDoc {
    pub name: String,
    pub path: PathBuf,
    pub month: MonthKey,
}

/// Month key from a statement name, `None` when the name does not follow
/// the `<Mon>_<YYYY>_...` pattern or the month is not a real month
pub fn month_from_name(name: &str) -> Option<MonthKey> {
    let caps = name_re().captures(name)?;
    let year: i32 = caps[2].parse().ok()?;
    MonthKey::from_abbr(&caps[1], year).ok()
}

/// Statement documents under `dir`, sorted by name
pub fn scan_statements(dir: &Path) -> Result<Vec<StatementDoc>> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("read {}", dir.display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_dir() || is_table_file(p))
        .collect();
    entries.sort();

    let mut docs = Vec::new();
    for path in entries {
        let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };
        match month_from_name(&name) {
            Some(month) => docs.push(StatementDoc { name, path, month }),
            None => warn!(document = %name, "name does not match <Mon>_<YYYY>_*; skipping"),
        }
    }
    Ok(docs)
}
