//! Month-ordered merchant totals across statements

use serde::Serialize;
use spendgrid_core::MonthKey;
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::aggregate::MerchantTotals;

/// Merchant totals keyed by statement month, iterated chronologically.
/// One entry per successfully analyzed document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlySeries {
    months: BTreeMap<MonthKey, MerchantTotals>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MerchantAmount {
    pub merchant: String,
    pub amount: f64,
}

/// One line of the monthly summary table; amounts are rounded to cents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummaryRow {
    pub month: MonthKey,
    pub label: String,
    pub merchants: Vec<MerchantAmount>,
    pub unmatched: f64,
    pub unmatched_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub merchant: String,
    pub values: Vec<f64>,
}

/// Chart-ready data: one x label per month, one line per merchant
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub months: Vec<String>,
    pub series: Vec<Series>,
}

impl MonthlySeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a month's totals. A second document for the same month
    /// replaces the first; the replaced totals are returned.
    pub fn insert(&mut self, month: MonthKey, totals: MerchantTotals) -> Option<MerchantTotals> {
        let previous = self.months.insert(month, totals);
        if previous.is_some() {
            warn!(%month, "month already recorded; keeping the later statement");
        }
        previous
    }

    pub fn get(&self, month: &MonthKey) -> Option<&MerchantTotals> {
        self.months.get(month)
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Most recent month recorded
    pub fn latest(&self) -> Option<MonthKey> {
        self.months.keys().next_back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MonthKey, &MerchantTotals)> {
        self.months.iter()
    }

    /// Per-month rounded totals for `merchants`, oldest month first
    pub fn summary(&self, merchants: &[String]) -> Vec<MonthlySummaryRow> {
        self.months
            .iter()
            .map(|(month, totals)| MonthlySummaryRow {
                month: *month,
                label: month.label(),
                merchants: merchants
                    .iter()
                    .map(|m| MerchantAmount {
                        merchant: m.clone(),
                        amount: totals.reported(m),
                    })
                    .collect(),
                unmatched: totals.unmatched(),
                unmatched_count: totals.unmatched_count(),
            })
            .collect()
    }

    /// One series per merchant over all months. Merchants with no spend in
    /// any month are left out.
    pub fn chart_series(&self, merchants: &[String]) -> ChartSeries {
        let months = self.months.keys().map(MonthKey::label).collect();
        let mut series = Vec::new();

        for merchant in merchants {
            let values: Vec<f64> = self.months.values().map(|t| t.reported(merchant)).collect();
            if values.iter().any(|v| *v > 0.0) {
                series.push(Series {
                    merchant: merchant.clone(),
                    values,
                });
            } else {
                info!(merchant = %merchant, "no spend in any month; leaving out of chart");
            }
        }

        ChartSeries { months, series }
    }
}
