//! Fuzz target: JSON deserialization of `Transaction`.
//!
//! Arbitrary request bodies must never panic, and anything accepted must
//! carry a finite, non-negative amount.

#![no_main]

use bank_core::Transaction;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(tx) = serde_json::from_slice::<Transaction>(data) {
        let amount = tx.amount.value();
        assert!(amount.is_finite() && amount >= 0.0, "accepted amount {amount} out of range");
    }
});
