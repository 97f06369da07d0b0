//! Core types for the bank sample service.
//!
//! Defines the account and transaction payloads exchanged between the bank
//! app and its clients, plus the validation problem document returned when a
//! withdrawal is rejected.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod account;
pub mod error;
pub mod id;
pub mod problem;

pub use account::{Account, Amount, Transaction};
pub use error::CoreError;
pub use id::AccountId;
pub use problem::ValidationProblem;
