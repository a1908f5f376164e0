//! Fuzz target: JSON deserialization of `User`.
//!
//! Arbitrary bytes fed to the record parser must never panic, and any record
//! that parses must serialize back to JSON that parses to the same record.

#![no_main]

use libfuzzer_sys::fuzz_target;
use relay_core::User;

fuzz_target!(|data: &[u8]| {
    let Ok(user) = serde_json::from_slice::<User>(data) else {
        return;
    };
    let Ok(encoded) = serde_json::to_vec(&user) else {
        panic!("a parsed user must serialize");
    };
    match serde_json::from_slice::<User>(&encoded) {
        Ok(again) => assert_eq!(again, user),
        Err(e) => panic!("re-encoded user failed to parse: {e}"),
    }
});
