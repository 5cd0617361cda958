//! Display push error types.

/// Errors from pushing colors to the clock.
///
/// These never stop the poll loop; they are logged as warnings.
#[derive(Debug, thiserror::Error)]
pub enum DisplayPushError {
    /// HTTP request failed (clock offline, timeout, etc.)
    #[error("could not connect to display: {0}")]
    Http(#[from] reqwest::Error),

    /// Clock answered with a non-success status
    #[error("display API error {status}: {message}")]
    Api { status: u16, message: String },
}
