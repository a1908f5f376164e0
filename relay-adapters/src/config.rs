//! Outbound HTTP client configuration.

use std::time::Duration;

/// Default per-request timeout for upstream fetches.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for [`crate::HttpBodyFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct FetchConfig {
    /// Whole-request timeout, connect included.
    pub timeout: Duration,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl FetchConfig {
    /// Default config with the given timeout.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout, ..Self::default() }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FETCH_TIMEOUT,
            user_agent: concat!("relay/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}
