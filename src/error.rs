//! Error types for the reward points engine.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, RewardsError>;

/// Errors that can occur while loading, filtering, or presenting transactions.
///
/// Malformed per-record data (bad prices, bad dates) never surfaces here; it
/// degrades silently inside the calculator, filter, and aggregator.
#[derive(Error, Debug)]
pub enum RewardsError {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input is not a JSON array of transactions
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to write a CSV report
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A date argument could not be parsed
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The window starts after it ends
    #[error("Invalid date range: {from} is after {to}")]
    InvalidDateRange { from: NaiveDate, to: NaiveDate },

    /// Sort requested on a column the table does not declare
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    /// Page size outside the supported options
    #[error("Invalid page size {0}")]
    InvalidPageSize(usize),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: reward-points <transactions.json> [FROM] [TO]")]
    MissingArgument,
}
