/// Error types for the asylum case library
use thiserror::Error;

/// Main error type for case-data operations
#[derive(Error, Debug)]
pub enum CaseError {
    /// HTTP request failed (connection, timeout, TLS)
    #[error("HTTP request failed: {0}")]
    HttpRequest(String),

    /// The service answered with a non-success status
    #[error("{endpoint} returned HTTP {status}")]
    HttpStatus { endpoint: String, status: u16 },

    /// Failed to parse a JSON response body
    #[error("Failed to parse response: {0}")]
    ResponseParse(#[from] serde_json::Error),

    /// Failed to read or write CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A year range whose bounds are out of order
    #[error("Invalid year range: {from} is after {to}")]
    InvalidYearRange { from: i32, to: i32 },

    /// A view name that is not one of the known visualizations
    #[error("Unknown view: {0}")]
    UnknownView(String),
}

#[cfg(feature = "api")]
impl From<reqwest::Error> for CaseError {
    fn from(err: reqwest::Error) -> Self {
        CaseError::HttpRequest(err.to_string())
    }
}

/// Type alias for Results using CaseError
pub type Result<T> = std::result::Result<T, CaseError>;
