//! One-shot resolution cell bridging push-style completion into a future.
//!
//! [`suspend_cancellable`] hands a [`Continuation`] to a synchronous block and
//! returns a [`Suspended`] future. The first call to [`Continuation::resume`]
//! or [`Continuation::resume_with_error`] decides the outcome; later calls
//! are ignored and logged.
//!
//! Dropping the [`Suspended`] future before it resolves cancels the
//! continuation and runs the hook registered through
//! [`Continuation::invoke_on_cancellation`], if any.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::{ContinuationId, CoreError};

type Outcome<T> = Result<T, CoreError>;
type CancelHook = Box<dyn FnOnce() + Send>;

struct Cell<T> {
    /// `Some` until the continuation is resolved or cancelled.
    sender: Option<oneshot::Sender<Outcome<T>>>,
    on_cancel: Option<CancelHook>,
    cancelled: bool,
}

struct Shared<T> {
    id: ContinuationId,
    cell: Mutex<Cell<T>>,
}

impl<T> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, Cell<T>> {
        // The cell holds no invariant a panicking holder could break.
        self.cell.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn complete(&self, outcome: Outcome<T>) -> bool {
        let (sender, released_hook) = {
            let mut cell = self.lock();
            (cell.sender.take(), cell.on_cancel.take())
        };
        drop(released_hook);

        let Some(sender) = sender else {
            tracing::warn!(
                continuation = %self.id,
                "continuation is no longer active; ignoring resumption"
            );
            return false;
        };
        // A failed send means the waiter was dropped while this resolution
        // was in flight; the outcome is discarded but the resumption still won.
        if sender.send(outcome).is_err() {
            tracing::debug!(continuation = %self.id, "waiter dropped during resolution");
        } else {
            tracing::debug!(continuation = %self.id, "continuation resolved");
        }
        true
    }

    fn cancel(&self) {
        let hook = {
            let mut cell = self.lock();
            if cell.sender.take().is_none() {
                return;
            }
            cell.cancelled = true;
            cell.on_cancel.take()
        };
        tracing::debug!(continuation = %self.id, "waiter abandoned; continuation cancelled");
        if let Some(hook) = hook {
            hook();
        }
    }
}

/// Resume handle for a suspended waiter.
///
/// Cloning yields another handle to the same cell; only the first resumption
/// across all clones takes effect.
pub struct Continuation<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Continuation<T> {
    fn clone(&self) -> Self {
        Self { shared: Arc::clone(&self.shared) }
    }
}

impl<T> std::fmt::Debug for Continuation<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Continuation")
            .field("id", &self.shared.id)
            .field("active", &self.is_active())
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

impl<T> Continuation<T> {
    /// Identifier of the bridged call this continuation belongs to.
    #[must_use]
    pub fn id(&self) -> ContinuationId {
        self.shared.id
    }

    /// Resolve the waiter with `value`.
    ///
    /// Returns `false` if the continuation was already resolved or cancelled,
    /// in which case `value` is discarded.
    pub fn resume(&self, value: T) -> bool {
        self.shared.complete(Ok(value))
    }

    /// Fail the waiter with `error`.
    ///
    /// Returns `false` if the continuation was already resolved or cancelled.
    pub fn resume_with_error(&self, error: CoreError) -> bool {
        self.shared.complete(Err(error))
    }

    /// Register `hook` to run if the waiter is abandoned before resolution.
    ///
    /// If the continuation is already cancelled the hook runs immediately; if
    /// it is already resolved the hook is dropped. Registering a second hook
    /// replaces the first.
    pub fn invoke_on_cancellation<F>(&self, hook: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut cell = self.shared.lock();
        if cell.cancelled {
            drop(cell);
            hook();
            return;
        }
        if cell.sender.is_some() {
            cell.on_cancel = Some(Box::new(hook));
        }
    }

    /// `true` while neither a resumption nor a cancellation has happened.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.shared.lock().sender.is_some()
    }

    /// `true` once the waiter was abandoned before resolution.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.shared.lock().cancelled
    }
}

/// Future returned by [`suspend_cancellable`].
///
/// # Cancel Safety
/// Dropping this future before it resolves cancels the continuation and runs
/// its cancellation hook exactly once.
#[must_use = "a suspended continuation does nothing unless awaited"]
pub struct Suspended<T> {
    shared: Arc<Shared<T>>,
    receiver: oneshot::Receiver<Outcome<T>>,
}

impl<T> Suspended<T> {
    /// Identifier of the bridged call this future waits on.
    #[must_use]
    pub fn id(&self) -> ContinuationId {
        self.shared.id
    }
}

impl<T> Future for Suspended<T> {
    type Output = Outcome<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => Poll::Ready(Err(CoreError::ContinuationLost)),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T> Drop for Suspended<T> {
    fn drop(&mut self) {
        self.shared.cancel();
    }
}

/// Run `block` with a fresh [`Continuation`] and return a future for its result.
///
/// `block` runs synchronously before this function returns, so any
/// resumption it performs inline happens-before the returned future is
/// first polled. If nothing ever resumes the continuation the future stays
/// pending forever.
pub fn suspend_cancellable<T, F>(block: F) -> Suspended<T>
where
    F: FnOnce(Continuation<T>),
{
    let (sender, receiver) = oneshot::channel();
    let shared = Arc::new(Shared {
        id: ContinuationId::new(),
        cell: Mutex::new(Cell { sender: Some(sender), on_cancel: None, cancelled: false }),
    });
    let suspended = Suspended { shared: Arc::clone(&shared), receiver };

    block(Continuation { shared });
    suspended
}
