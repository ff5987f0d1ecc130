use thiserror::Error;

/// Failures at the wire boundary. Callers log these and degrade; nothing in
/// this layer retries or surfaces them as user-facing errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success response, with the status code and response body.
    #[error("Request failed {status}: {body}")]
    Status { status: u16, body: String },
    /// Transport or decode failure underneath the request.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
