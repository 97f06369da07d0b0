//! Sample bank service reached through the sidecar as app id `bank`.
//!
//! Keeps accounts in memory and exposes `GET /accounts/{id}`,
//! `POST /deposit` and `POST /withdraw`. Used as the far end of the
//! invocation rewriter's end-to-end tests and by the `bank-client` demo.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod routes;
pub mod store;
