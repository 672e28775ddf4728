//! Result and error types for the calculator engine.

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors that can occur across the calculator engines.
///
/// Every variant is recoverable: the triggering operation is aborted,
/// prior state is left unchanged, and the message is suitable for
/// direct display to the user.
#[derive(Debug, Error)]
pub enum CalcError {
    /// Division (or modulo) by zero attempted
    #[error("Cannot divide by zero")]
    DivisionByZero,

    /// Input outside the domain of the requested operation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed expression text
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    /// Empty expression provided
    #[error("Empty expression")]
    EmptyExpression,

    /// Unit not known to the requested conversion category
    #[error("Unsupported unit '{unit}' for {category}")]
    UnknownUnit {
        /// The offending unit key
        unit: String,
        /// The category it was looked up in
        category: String,
    },

    /// Currency rates have not been loaded yet
    #[error("Currency rates not loaded")]
    RatesUnavailable,

    /// Currency rate fetch failed
    #[error("Rate fetch failed: {0}")]
    RateFetch(String),

    /// View window bounds rejected
    #[error("Invalid view window: {0}")]
    InvalidWindow(String),

    /// Underlying storage I/O failure
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Persisted state could not be encoded or decoded
    #[error("State format error: {0}")]
    StateFormat(#[from] serde_json::Error),
}
