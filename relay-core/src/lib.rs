//! Core types for the relay demo service.
//!
//! Defines the [`User`] record, the crate error type, and the bridge that
//! turns a synchronous success/error callback into a single awaitable
//! result with cancellation propagation.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod bridge;
pub mod callback;
pub mod error;
pub mod id;
pub mod user;

pub use bridge::{suspend_cancellable, Continuation, Suspended};
pub use callback::{bridge, signal_body_presence, Callback, ResumingCallback, FAILURE_MESSAGE, SUCCESS_VALUE};
pub use error::CoreError;
pub use id::ContinuationId;
pub use user::User;
