//! Error types for statement analysis

use thiserror::Error;

use crate::grid::Role;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no tables were extracted from the document")]
    EmptyExtraction,

    #[error("could not assign the {role} column (fallback index {index}, grid has {width} columns); manual inspection needed")]
    RoleUnassigned { role: Role, index: usize, width: usize },

    #[error("invalid month key: {0}")]
    InvalidMonthKey(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
