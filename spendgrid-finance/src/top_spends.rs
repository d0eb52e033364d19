//! Largest transactions of a month

use serde::Serialize;
use spendgrid_core::{Transaction, format_amount};

/// Display-ready row of the top spends table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopSpendRow {
    /// `"01 Feb 2025"`, blank when the date cell could not be parsed
    pub date: String,
    pub description: String,
    /// Thousands-separated, two decimals
    pub amount: String,
}

/// The `k` largest transactions by amount, descending. Equal amounts keep
/// their statement order.
pub fn top_transactions(txns: &[Transaction], k: usize) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = txns.iter().collect();
    sorted.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    sorted.truncate(k);
    sorted
}

/// [`top_transactions`] formatted for display, descriptions cut to
/// `description_width` characters
pub fn top_spend_rows(txns: &[Transaction], k: usize, description_width: usize) -> Vec<TopSpendRow> {
    top_transactions(txns, k)
        .into_iter()
        .map(|t| TopSpendRow {
            date: t.display_date(),
            description: t.description.chars().take(description_width).collect(),
            amount: format_amount(t.amount),
        })
        .collect()
}
