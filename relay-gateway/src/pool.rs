//! Bounded pool for collaborator I/O.
//!
//! Handlers submit upstream fetches and repository lookups here instead of
//! awaiting them inline. At most `size` jobs run at once; the rest wait for
//! a permit.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::error::GatewayError;

/// Semaphore-bounded set of tokio tasks.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    size: usize,
}

impl WorkerPool {
    /// Create a pool that runs at most `size` jobs concurrently.
    ///
    /// # Errors
    /// Returns [`GatewayError::Config`] if `size` is zero or exceeds
    /// [`Semaphore::MAX_PERMITS`].
    pub fn new(size: usize) -> Result<Self, GatewayError> {
        if size == 0 || size > Semaphore::MAX_PERMITS {
            return Err(GatewayError::Config(format!(
                "worker pool size must be in 1..={}, got {size}",
                Semaphore::MAX_PERMITS
            )));
        }
        Ok(Self { permits: Arc::new(Semaphore::new(size)), size })
    }

    /// Maximum number of concurrently running jobs.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Permits not currently held by a running job.
    #[must_use]
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Run `work` on its own task once a permit is free and await its output.
    ///
    /// The permit is held by the spawned task, so dropping this future does
    /// not release capacity until the job itself finishes.
    ///
    /// # Errors
    /// Returns [`GatewayError::Worker`] if the job panics or is aborted.
    pub async fn dispatch<F, T>(&self, work: F) -> Result<T, GatewayError>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|e| GatewayError::Worker(format!("worker pool closed: {e}")))?;

        let handle = tokio::spawn(async move {
            let _permit = permit;
            work.await
        });

        handle.await.map_err(|e| GatewayError::Worker(e.to_string()))
    }
}
