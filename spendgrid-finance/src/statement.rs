//! Per-document pipeline: tables -> grid -> roles -> transactions -> totals

use serde::Serialize;
use spendgrid_core::{RawGrid, Result, Transaction};
use spendgrid_ingest::{
    ColumnRoles, ExtractionStats, InferenceConfig, RoleDefaults, RoleInferrer, extract_transactions,
    normalize_tables,
};
use tracing::info;

use crate::aggregate::{MerchantTotals, aggregate};
use crate::merchant_rules::MerchantRules;

/// Everything learned from one statement document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementAnalysis {
    pub roles: ColumnRoles,
    pub stats: ExtractionStats,
    pub transactions: Vec<Transaction>,
    pub totals: MerchantTotals,
}

/// Analyzes statement documents with one rule table and statement template
#[derive(Debug, Clone)]
pub struct StatementAnalyzer {
    rules: MerchantRules,
    inferrer: RoleInferrer,
}

impl StatementAnalyzer {
    pub fn new(rules: MerchantRules, inference: InferenceConfig, defaults: RoleDefaults) -> Self {
        let inferrer = RoleInferrer::new(rules.keywords())
            .with_config(inference)
            .with_defaults(defaults);
        Self { rules, inferrer }
    }

    pub fn rules(&self) -> &MerchantRules {
        &self.rules
    }

    pub fn inferrer(&self) -> &RoleInferrer {
        &self.inferrer
    }

    /// Run the full pipeline over the tables extracted from one document
    pub fn analyze(&self, tables: &[RawGrid]) -> Result<StatementAnalysis> {
        let grid = normalize_tables(tables)?;
        let roles = self.inferrer.infer(&grid)?;
        let (transactions, stats) = extract_transactions(&grid, &roles);
        let totals = aggregate(&transactions, &self.rules);

        info!(
            rows = stats.rows,
            transactions = stats.extracted,
            dropped = stats.unparsable_amounts,
            date_col = roles.date.index,
            description_col = roles.description.index,
            amount_col = roles.amount.index,
            "analyzed statement"
        );

        Ok(StatementAnalysis {
            roles,
            stats,
            transactions,
            totals,
        })
    }
}

impl Default for StatementAnalyzer {
    fn default() -> Self {
        Self::new(
            MerchantRules::default(),
            InferenceConfig::default(),
            RoleDefaults::default(),
        )
    }
}
