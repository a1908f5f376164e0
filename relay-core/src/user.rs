//! The single entity served by the repository endpoint.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A user record, identified by its `name`.
///
/// Deserialization never validates: missing fields fall back to `""` and `0`
/// so records round-trip through the datastore untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: i32,
}

impl User {
    /// Create a user, rejecting an empty name.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidUser`] if `name` is empty or whitespace.
    pub fn new(name: impl Into<String>, age: i32) -> Result<Self, CoreError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::InvalidUser {
                reason: "name must not be empty".to_owned(),
            });
        }
        Ok(Self { name, age })
    }
}
