//! User datastore abstraction and its in-memory implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use relay_core::User;

/// Key-value store of [`User`] records keyed by `name`.
///
/// # Cancel Safety
/// All methods are cancel safe; each call is a single atomic map operation.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look up a user by name. Returns `None` if absent.
    async fn find_by_name(&self, name: &str) -> Option<User>;

    /// Insert or replace the user stored under `user.name`.
    ///
    /// Returns the previously stored record, if any.
    async fn save(&self, user: User) -> Option<User>;

    /// All stored users, ordered by name.
    async fn find_all(&self) -> Vec<User>;

    /// Number of stored users.
    async fn count(&self) -> usize;
}

/// Thread-safe in-memory [`UserRepository`].
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `users`.
    ///
    /// Later entries with a duplicate name replace earlier ones.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users.into_iter().map(|u| (u.name.clone(), u)).collect();
        Self { users: RwLock::new(users) }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_name(&self, name: &str) -> Option<User> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let found = self
            .users
            .read()
            .expect("user repository read lock poisoned")
            .get(name)
            .cloned();
        found
    }

    async fn save(&self, user: User) -> Option<User> {
        tracing::debug!(name = %user.name, "saving user");
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let previous = self
            .users
            .write()
            .expect("user repository write lock poisoned")
            .insert(user.name.clone(), user);
        previous
    }

    async fn find_all(&self) -> Vec<User> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut users: Vec<User> = self
            .users
            .read()
            .expect("user repository read lock poisoned")
            .values()
            .cloned()
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        users
    }

    async fn count(&self) -> usize {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let len = self.users.read().expect("user repository read lock poisoned").len();
        len
    }
}
