//! Per-document merchant totals

use serde::{Deserialize, Serialize};
use spendgrid_core::{Transaction, round_cents};

use crate::merchant_rules::MerchantRules;

/// Running spend for one merchant. `total` is unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantTotal {
    pub label: String,
    pub total: f64,
    pub count: usize,
}

/// Spend per merchant for one statement, in rule order.
///
/// Every merchant of the rule table is present, with zero when nothing
/// matched. Transactions matching no rule are tallied separately and never
/// feed a merchant total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantTotals {
    merchants: Vec<MerchantTotal>,
    unmatched: f64,
    unmatched_count: usize,
}

impl MerchantTotals {
    /// All-zero totals for the merchants of `rules`
    pub fn zeroed(rules: &MerchantRules) -> Self {
        Self {
            merchants: rules
                .labels()
                .into_iter()
                .map(|label| MerchantTotal {
                    label,
                    total: 0.0,
                    count: 0,
                })
                .collect(),
            unmatched: 0.0,
            unmatched_count: 0,
        }
    }

    pub fn merchants(&self) -> &[MerchantTotal] {
        &self.merchants
    }

    /// Unrounded running sum for `label` (0.0 for unknown labels)
    pub fn total(&self, label: &str) -> f64 {
        self.merchants
            .iter()
            .find(|m| m.label == label)
            .map(|m| m.total)
            .unwrap_or(0.0)
    }

    /// Reported total for `label`: the running sum rounded once to cents
    pub fn reported(&self, label: &str) -> f64 {
        round_cents(self.total(label))
    }

    pub fn count(&self, label: &str) -> usize {
        self.merchants
            .iter()
            .find(|m| m.label == label)
            .map(|m| m.count)
            .unwrap_or(0)
    }

    pub fn unmatched(&self) -> f64 {
        round_cents(self.unmatched)
    }

    pub fn unmatched_count(&self) -> usize {
        self.unmatched_count
    }

}

/// Categorize `txns` with `rules` and sum amounts per merchant
pub fn aggregate(txns: &[Transaction], rules: &MerchantRules) -> MerchantTotals {
    let mut totals = MerchantTotals::zeroed(rules);
    for txn in txns {
        match rules.match_index(&txn.description) {
            Some(i) => {
                let entry = &mut totals.merchants[i];
                entry.total += txn.amount;
                entry.count += 1;
            }
            None => {
                totals.unmatched += txn.amount;
                totals.unmatched_count += 1;
            }
        }
    }
    totals
}
