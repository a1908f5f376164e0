//! HTTP gateway for the relay demo service.
//!
//! Exposes an upstream passthrough, the callback-bridged upstream check, and
//! a single-key user lookup. Collaborator I/O runs on a bounded worker pool.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod pool;
pub mod routes;
