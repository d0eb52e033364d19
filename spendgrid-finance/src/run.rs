//! Accumulates statement documents into a monthly report.
//!
//! Documents are fed one at a time, in filename order. A failing document
//! is recorded and skipped; it never stops the run.

use spendgrid_core::{MonthKey, RawGrid, Result, Transaction};
use tracing::{info, warn};

use crate::monthly::MonthlySeries;
use crate::report::{FailedDocument, MonthlyReport, TopSpends};
use crate::statement::StatementAnalyzer;
use crate::top_spends::top_spend_rows;

pub struct StatementRun<'a> {
    analyzer: &'a StatementAnalyzer,
    series: MonthlySeries,
    /// Transactions of the most recent month seen so far
    latest: Option<(MonthKey, Vec<Transaction>)>,
    failed: Vec<FailedDocument>,
}

impl<'a> StatementRun<'a> {
    pub fn new(analyzer: &'a StatementAnalyzer) -> Self {
        Self {
            analyzer,
            series: MonthlySeries::new(),
            latest: None,
            failed: Vec::new(),
        }
    }

    /// Analyze one document. `tables` is whatever the table extractor
    /// produced for it, including its own failure. Returns whether the
    /// document made it into the series.
    pub fn process(&mut self, name: &str, month: MonthKey, tables: Result<Vec<RawGrid>>) -> bool {
        let analysis = match tables.and_then(|t| self.analyzer.analyze(&t)) {
            Ok(a) => a,
            Err(e) => {
                warn!(document = name, %month, error = %e, "failed to analyze statement");
                self.failed.push(FailedDocument {
                    name: name.to_string(),
                    month,
                    reason: e.to_string(),
                });
                return false;
            }
        };

        for m in analysis.totals.merchants() {
            info!(document = name, %month, merchant = %m.label, total = analysis.totals.reported(&m.label), "monthly spend");
        }

        if self.latest.as_ref().is_none_or(|(k, _)| month >= *k) {
            self.latest = Some((month, analysis.transactions));
        }
        self.series.insert(month, analysis.totals);
        true
    }

    pub fn series(&self) -> &MonthlySeries {
        &self.series
    }

    pub fn failed(&self) -> &[FailedDocument] {
        &self.failed
    }

    /// Build the report, or `None` when no document produced data
    pub fn finish(self, top_n: usize, description_width: usize) -> Option<MonthlyReport> {
        if self.series.is_empty() {
            return None;
        }

        let merchants = self.analyzer.rules().labels();
        let top_spends = self.latest.map(|(month, txns)| TopSpends {
            month,
            label: month.label(),
            rows: top_spend_rows(&txns, top_n, description_width),
        });

        Some(MonthlyReport {
            summary: self.series.summary(&merchants),
            chart: self.series.chart_series(&merchants),
            merchants,
            top_spends,
            failed: self.failed,
        })
    }
}
