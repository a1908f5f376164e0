//! Error types for the adapters crate.

/// Errors raised by the outbound collaborators.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AdapterError {
    /// Transport-level failure talking to the upstream (connect, TLS, timeout).
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered with a non-success status.
    #[error("upstream {url} answered HTTP {status}")]
    UnexpectedStatus { url: String, status: u16 },

    /// The configured upstream URL could not be parsed.
    #[error("invalid upstream url: {0}")]
    InvalidUrl(String),
}
