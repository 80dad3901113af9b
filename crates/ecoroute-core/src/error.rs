//! Error types shared by the core pipeline and provider clients.

use thiserror::Error;

/// Failure of a single call to an external provider.
///
/// Provider errors are recovered where they happen: a failed AQI sample
/// becomes "no reading", a failed directions call fails the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("provider transport error: {0}")]
    Transport(String),
    #[error("provider request timed out")]
    Timeout,
    #[error("provider HTTP {0}")]
    Status(u16),
    #[error("provider rejected request: {0}")]
    Upstream(String),
    #[error("malformed provider payload: {0}")]
    Payload(String),
    #[error("provider returned no data")]
    NoData,
    #[error("provider misconfigured: {0}")]
    Configuration(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("no usable routes")]
    Empty,
}
