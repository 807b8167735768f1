use asylum_cases::service::Endpoint;
use asylum_cases::CaseError;
use thiserror::Error;

/// Failure of a fetch, as recorded in the store.
///
/// `Clone` so one failure can be handed to every caller joined on the same
/// in-flight request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Either summary request was rejected, timed out or returned an
    /// unreadable body
    #[error("{endpoint} request failed: {reason}")]
    NetworkFailure { endpoint: Endpoint, reason: String },
}

impl QueryError {
    pub fn network(endpoint: Endpoint, err: CaseError) -> Self {
        QueryError::NetworkFailure {
            endpoint,
            reason: err.to_string(),
        }
    }
}
