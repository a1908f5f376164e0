//! Collaborators the relay gateway delegates to: an outbound HTTP body
//! fetcher and a user repository.
//!
//! Both are exposed as `async_trait` seams so handlers can be tested
//! against stubs.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod fetcher;
pub mod repository;

pub use config::{FetchConfig, DEFAULT_FETCH_TIMEOUT};
pub use error::AdapterError;
pub use fetcher::{BodyFetcher, HttpBodyFetcher};
pub use repository::{MemoryUserRepository, UserRepository};
