//! spendgrid-core: shared types for statement table analysis

pub mod error;
pub mod grid;
pub mod money;
pub mod month;
pub mod transaction;

pub use error::{Error, Result};
pub use grid::{RawGrid, Role};
pub use money::{format_amount, parse_amount, round_cents};
pub use month::MonthKey;
pub use transaction::Transaction;
