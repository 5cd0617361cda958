//! OJP client error types.

/// Errors from talking to the OJP trip-planning service.
///
/// `Http`, `Api` and `Unauthorized` mean the request itself failed; `Xml`
/// means a response arrived but was not well-formed XML.
#[derive(Debug, thiserror::Error)]
pub enum OjpError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// API key rejected (401 or 403)
    #[error("unauthorized ({status}), check OJP_API_KEY: {message}")]
    Unauthorized { status: u16, message: String },

    /// Response body is not well-formed XML
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// API key cannot be sent as an HTTP header
    #[error("invalid API key format")]
    InvalidApiKey,
}

/// Failure to turn a stop name into a location reference.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    /// The response named neither a stop place nor a stop point.
    #[error("could not resolve stop reference for '{stop_name}'")]
    NotFound { stop_name: String },

    /// The lookup request failed or its response could not be read.
    #[error("failed to resolve stop '{stop_name}': {source}")]
    Request {
        stop_name: String,
        #[source]
        source: OjpError,
    },
}

impl ResolutionError {
    /// The stop name that could not be resolved.
    pub fn stop_name(&self) -> &str {
        match self {
            ResolutionError::NotFound { stop_name } => stop_name,
            ResolutionError::Request { stop_name, .. } => stop_name,
        }
    }
}
