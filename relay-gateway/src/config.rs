//! Gateway configuration read from `RELAY_*` environment variables.

use std::time::Duration;

use relay_adapters::FetchConfig;

use crate::error::GatewayError;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_UPSTREAM_URL: &str = "https://www.google.com";
pub const DEFAULT_LOOKUP_NAME: &str = "abid";
pub const DEFAULT_WORKER_POOL_SIZE: usize = 64;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Runtime settings for the gateway binary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GatewayConfig {
    /// `RELAY_LISTEN_ADDR`
    pub listen_addr: String,

    /// `RELAY_UPSTREAM_URL`: fetched by `/` and `/callback`.
    pub upstream_url: String,

    /// `RELAY_LOOKUP_NAME`: key looked up by `/repository`.
    pub lookup_name: String,

    /// `RELAY_WORKER_POOL_SIZE`
    pub worker_pool_size: usize,

    /// `RELAY_FETCH_TIMEOUT_SECS`
    pub fetch_timeout: Duration,

    /// `RELAY_SEED_USERS`: load the demo users at startup.
    pub seed_users: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_owned(),
            upstream_url: DEFAULT_UPSTREAM_URL.to_owned(),
            lookup_name: DEFAULT_LOOKUP_NAME.to_owned(),
            worker_pool_size: DEFAULT_WORKER_POOL_SIZE,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            seed_users: false,
        }
    }
}

impl GatewayConfig {
    /// Read the config from the process environment.
    ///
    /// # Errors
    /// See [`GatewayConfig::from_lookup`].
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup, applying defaults for
    /// missing keys.
    ///
    /// # Errors
    /// Returns [`GatewayError::Config`] if a numeric or boolean value cannot
    /// be parsed, or if the pool size or timeout is zero.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let worker_pool_size = match lookup("RELAY_WORKER_POOL_SIZE") {
            Some(raw) => parse_positive("RELAY_WORKER_POOL_SIZE", &raw)?,
            None => defaults.worker_pool_size,
        };
        let fetch_timeout = match lookup("RELAY_FETCH_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_positive("RELAY_FETCH_TIMEOUT_SECS", &raw)?),
            None => defaults.fetch_timeout,
        };
        let seed_users = match lookup("RELAY_SEED_USERS") {
            Some(raw) => parse_flag("RELAY_SEED_USERS", &raw)?,
            None => defaults.seed_users,
        };

        Ok(Self {
            listen_addr: lookup("RELAY_LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            upstream_url: lookup("RELAY_UPSTREAM_URL").unwrap_or(defaults.upstream_url),
            lookup_name: lookup("RELAY_LOOKUP_NAME").unwrap_or(defaults.lookup_name),
            worker_pool_size,
            fetch_timeout,
            seed_users,
        })
    }

    /// Outbound client settings derived from this config.
    #[must_use]
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig::with_timeout(self.fetch_timeout)
    }
}

fn parse_positive<T>(key: &str, raw: &str) -> Result<T, GatewayError>
where
    T: std::str::FromStr + PartialEq + Default,
    T::Err: std::fmt::Display,
{
    let value: T = raw
        .trim()
        .parse()
        .map_err(|e| GatewayError::Config(format!("{key}={raw:?}: {e}")))?;
    if value == T::default() {
        return Err(GatewayError::Config(format!("{key} must be greater than zero")));
    }
    Ok(value)
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, GatewayError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(GatewayError::Config(format!("{key}={other:?}: expected a boolean"))),
    }
}
