use thiserror::Error;

/// Top-level error type for the `vyos-api` crate.
///
/// Only client construction can fail with this type. Once a [`VyosClient`]
/// exists, every call returns an [`ApiResponse`] and failures are captured
/// in its `error` field instead.
///
/// [`VyosClient`]: crate::VyosClient
/// [`ApiResponse`]: crate::ApiResponse
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// Hostname is empty or contains characters a URL host cannot hold.
    #[error("Invalid hostname '{hostname}'")]
    InvalidHostname { hostname: String },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Transport ───────────────────────────────────────────────────
    /// TLS handshake setup or certificate loading error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The underlying HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl Error {
    /// Returns `true` if the error stems from user-supplied connection
    /// settings rather than the local TLS or HTTP stack.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidHostname { .. } | Self::InvalidUrl(_))
    }
}
