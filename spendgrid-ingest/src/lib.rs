//! spendgrid-ingest: turn extracted statement tables into typed transactions.
//!
//! Pipeline per document: [`normalize_tables`] -> [`RoleInferrer::infer`] ->
//! [`extract_transactions`].

pub mod extract;
pub mod normalize;
pub mod roles;
pub mod tables;

pub use extract::{ExtractionStats, extract_transactions};
pub use normalize::normalize_tables;
pub use roles::{ColumnRoles, ColumnScores, InferenceConfig, RoleChoice, RoleDefaults, RoleInferrer, RoleSource};
pub use tables::{is_table_file, read_document_tables, read_table_csv};
