//! spendgrid-finance: merchant categorization, monthly aggregation and reports

pub mod aggregate;
pub mod merchant_rules;
pub mod monthly;
pub mod report;
pub mod run;
pub mod statement;
pub mod top_spends;

pub use aggregate::{MerchantTotal, MerchantTotals, aggregate};
pub use merchant_rules::{MerchantRule, MerchantRules};
pub use monthly::{ChartSeries, MerchantAmount, MonthlySeries, MonthlySummaryRow, Series};
pub use report::{FailedDocument, MonthlyReport, TopSpends};
pub use run::StatementRun;
pub use statement::{StatementAnalysis, StatementAnalyzer};
pub use top_spends::{TopSpendRow, top_spend_rows, top_transactions};
