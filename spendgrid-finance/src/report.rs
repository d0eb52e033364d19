//! Final report handed to presentation (text tables, JSON, chart CSV)

use serde::Serialize;
use spendgrid_core::MonthKey;

use crate::monthly::{ChartSeries, MonthlySummaryRow};
use crate::top_spends::TopSpendRow;

/// A document that contributed nothing to the series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDocument {
    pub name: String,
    pub month: MonthKey,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopSpends {
    pub month: MonthKey,
    pub label: String,
    pub rows: Vec<TopSpendRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub merchants: Vec<String>,
    pub summary: Vec<MonthlySummaryRow>,
    pub chart: ChartSeries,
    pub top_spends: Option<TopSpends>,
    pub failed: Vec<FailedDocument>,
}
