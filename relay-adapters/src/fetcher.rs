//! Outbound "GET and return the body" collaborator.

use async_trait::async_trait;

use crate::{AdapterError, FetchConfig};

/// Fetches the body of a URL.
///
/// Implementations must be `Send + Sync` so a single instance can be shared
/// by every request handler.
#[async_trait]
pub trait BodyFetcher: Send + Sync {
    /// GET `url` and return its body, or `None` if the response had none.
    ///
    /// # Errors
    /// Returns [`AdapterError::Http`] on transport failure and
    /// [`AdapterError::UnexpectedStatus`] on a non-2xx response.
    async fn get_body(&self, url: &str) -> Result<Option<String>, AdapterError>;
}

/// [`BodyFetcher`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpBodyFetcher {
    client: reqwest::Client,
}

impl HttpBodyFetcher {
    /// Build a fetcher from `config`.
    ///
    /// # Errors
    /// Returns [`AdapterError::Http`] if the TLS backend cannot be initialised.
    pub fn new(config: &FetchConfig) -> Result<Self, AdapterError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl BodyFetcher for HttpBodyFetcher {
    async fn get_body(&self, url: &str) -> Result<Option<String>, AdapterError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|e| AdapterError::InvalidUrl(format!("{url}: {e}")))?;

        let resp = self.client.get(parsed).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AdapterError::UnexpectedStatus {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        tracing::debug!(%url, status = status.as_u16(), bytes = body.len(), "upstream fetch complete");
        Ok(if body.is_empty() { None } else { Some(body) })
    }
}
