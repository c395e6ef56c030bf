use std::time::Duration;

use thiserror::Error;

/// Failure of a backend request, rendered inline by the views.
///
/// Every variant displays a non-empty message in the wording browser HTTP
/// clients use, so views never need a fallback string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, CORS rejection and the like.
    /// The payload carries diagnostic detail for the console only.
    #[error("Network Error")]
    Network(String),
    #[error("timeout of {}ms exceeded", .0.as_millis())]
    Timeout(Duration),
    /// Any response outside 2xx; client and server errors are not told apart.
    #[error("Request failed with status code {status}")]
    Status { status: u16 },
    #[error("Invalid response body: {0}")]
    Decode(String),
}
