//! Service invocation through a local sidecar.
//!
//! [`InvocationRewriter`] is an outbound HTTP pipeline stage. Client code
//! addresses a remote service by its app id (`http://bank/deposit`); the
//! rewriter sends the call to the sidecar on `localhost` instead
//! (`/v1.0/invoke/bank/method/deposit`) and hands back the untouched
//! response. [`HyperTransport`] and [`BlockingHyperTransport`] are the
//! network stages it usually wraps.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod allow_list;
pub mod client;
pub mod config;
pub mod error;
pub mod rewriter;
pub mod transport;

pub use allow_list::AllowList;
pub use client::{Body, BlockingHyperTransport, HyperTransport};
pub use config::{RewriterConfig, DEFAULT_PORT_ENV_VAR, DEFAULT_SIDECAR_PORT, SIDECAR_HOST};
pub use error::TransportError;
pub use rewriter::{rewrite_uri, InvocationRewriter, INVOKE_PREFIX};
pub use transport::{BlockingTransport, Transport};
