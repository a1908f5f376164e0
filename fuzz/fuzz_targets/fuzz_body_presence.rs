//! Fuzz target: `signal_body_presence` fires exactly one signal.
//!
//! Whatever the upstream body looks like, the callback must see exactly one
//! of `success()` / `error()`, and `success()` only for a non-empty body.

#![no_main]

use std::cell::Cell;

use libfuzzer_sys::fuzz_target;
use relay_core::{signal_body_presence, Callback};

#[derive(Default)]
struct Counter {
    successes: Cell<u32>,
    errors: Cell<u32>,
}

impl Callback for Counter {
    fn success(&self) {
        self.successes.set(self.successes.get() + 1);
    }

    fn error(&self) {
        self.errors.set(self.errors.get() + 1);
    }
}

fuzz_target!(|data: &[u8]| {
    // First byte selects between an absent body and the remaining bytes.
    let Some((&flag, rest)) = data.split_first() else {
        return;
    };
    let text = String::from_utf8_lossy(rest);
    let body = (flag & 1 == 1).then_some(text.as_ref());

    let counter = Counter::default();
    signal_body_presence(body, &counter);

    assert_eq!(counter.successes.get() + counter.errors.get(), 1);
    let present = body.is_some_and(|b| !b.is_empty());
    assert_eq!(counter.successes.get() == 1, present);
});
