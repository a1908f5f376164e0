//! Success/error callback contract and its adapter onto a continuation.

use crate::bridge::{suspend_cancellable, Continuation, Suspended};
use crate::CoreError;

/// Value a bridged call resolves with when the callback reports success.
pub const SUCCESS_VALUE: &str = "success";

/// Message carried by [`CoreError::BridgeFailure`] when the callback reports an error.
pub const FAILURE_MESSAGE: &str = "error";

/// Push-style completion interface. Exactly one method should fire per call.
pub trait Callback {
    fn success(&self);
    fn error(&self);
}

/// [`Callback`] that resumes a continuation with fixed outcomes.
#[derive(Debug)]
pub struct ResumingCallback {
    continuation: Continuation<&'static str>,
}

impl ResumingCallback {
    #[must_use]
    pub fn new(continuation: Continuation<&'static str>) -> Self {
        Self { continuation }
    }
}

impl Callback for ResumingCallback {
    fn success(&self) {
        tracing::info!(continuation = %self.continuation.id(), "callback reported success; resuming");
        self.continuation.resume(SUCCESS_VALUE);
    }

    fn error(&self) {
        tracing::info!(continuation = %self.continuation.id(), "callback reported error; failing waiter");
        self.continuation.resume_with_error(CoreError::BridgeFailure {
            message: FAILURE_MESSAGE.to_owned(),
        });
    }
}

/// Bridge one callback-style `operation` into a future.
///
/// `operation` receives the callback and runs to completion before this
/// function returns. The future resolves with [`SUCCESS_VALUE`] on
/// `success()` and fails with a [`CoreError::BridgeFailure`] on `error()`.
///
/// The operation has no way to be interrupted, so no cancellation hook is
/// registered; abandoning the future only tears down the wait.
pub fn bridge<Op>(operation: Op) -> Suspended<&'static str>
where
    Op: FnOnce(&dyn Callback),
{
    suspend_cancellable(|continuation| {
        let callback = ResumingCallback::new(continuation);
        operation(&callback);
    })
}

/// Report whether an upstream response carried a body.
///
/// A present, non-empty body fires `success()`; an absent or empty body
/// fires `error()`.
pub fn signal_body_presence(body: Option<&str>, callback: &dyn Callback) {
    match body {
        Some(text) if !text.is_empty() => callback.success(),
        _ => callback.error(),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::time::Duration;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<&'static str>>,
    }

    impl Callback for Recorder {
        fn success(&self) {
            self.calls.borrow_mut().push("success");
        }

        fn error(&self) {
            self.calls.borrow_mut().push("error");
        }
    }

    #[test]
    fn signal_body_presence_fires_exactly_one_signal() {
        let cases: [(Option<&str>, &str); 4] = [
            (Some("<html></html>"), "success"),
            (Some(" "), "success"),
            (Some(""), "error"),
            (None, "error"),
        ];
        for (body, expected) in cases {
            let recorder = Recorder::default();
            signal_body_presence(body, &recorder);
            assert_eq!(*recorder.calls.borrow(), vec![expected], "body {body:?}");
        }
    }

    #[tokio::test]
    async fn bridge_success_resolves_with_fixed_value() {
        let result = bridge(|cb| signal_body_presence(Some("body"), cb)).await;
        assert_eq!(result, Ok("success"));
    }

    #[tokio::test]
    async fn bridge_absent_body_fails_with_error_message() {
        let result = bridge(|cb| signal_body_presence(None, cb)).await;
        match result {
            Err(CoreError::BridgeFailure { message }) => assert_eq!(message, "error"),
            other => panic!("expected BridgeFailure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn bridge_error_display_is_fixed_message() {
        let err = match bridge(|cb| cb.error()).await {
            Err(e) => e,
            Ok(v) => panic!("expected failure, got {v}"),
        };
        assert_eq!(err.to_string(), FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn bridge_first_signal_wins() {
        let result = bridge(|cb| {
            cb.success();
            cb.error();
        })
        .await;
        assert_eq!(result, Ok("success"), "error after success must not change the outcome");

        let result = bridge(|cb| {
            cb.error();
            cb.success();
        })
        .await;
        assert!(
            matches!(result, Err(CoreError::BridgeFailure { .. })),
            "success after error must not change the outcome"
        );
    }

    #[tokio::test]
    async fn bridge_without_signal_hangs() {
        let waiter = bridge(|_cb| {});
        let outcome = tokio::time::timeout(Duration::from_millis(50), waiter).await;
        assert!(outcome.is_err(), "a silent operation must leave the wait pending");
    }

    proptest::proptest! {
        #[test]
        fn proptest_bridge_outcome_tracks_body_presence(body in proptest::option::of(".{0,64}")) {
            let rt = match tokio::runtime::Builder::new_current_thread().enable_time().build() {
                Ok(rt) => rt,
                Err(e) => panic!("failed to build runtime: {e}"),
            };
            let present = body.as_deref().is_some_and(|b| !b.is_empty());
            let result = rt.block_on(bridge(|cb| signal_body_presence(body.as_deref(), cb)));
            proptest::prop_assert_eq!(result.is_ok(), present);
            if present {
                proptest::prop_assert_eq!(result, Ok(SUCCESS_VALUE));
            }
        }
    }
}
