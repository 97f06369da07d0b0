//! Send-capable pipeline stages.
//!
//! Both the network transport and every interceptor in front of it
//! implement these traits, so stages compose by ownership: each stage holds
//! the next one and calls it directly.

use async_trait::async_trait;
use hyper::Request;

/// An asynchronous stage of an outbound HTTP pipeline.
///
/// The request is borrowed, not consumed: a stage may adjust it for the
/// duration of the call and the caller gets it back afterward.
///
/// # Cancel Safety
/// Implementations must leave `request` in a valid state if the future is
/// dropped at any await point.
#[async_trait]
pub trait Transport<B>: Send + Sync
where
    B: Send + 'static,
{
    /// What a successful send produces.
    type Response: Send;

    /// What a failed send produces.
    type Error: Send;

    /// Send `request` and wait for its response.
    ///
    /// # Errors
    /// Implementation-defined; see the concrete stage.
    async fn send(&self, request: &mut Request<B>) -> Result<Self::Response, Self::Error>;
}

/// A blocking stage of an outbound HTTP pipeline.
///
/// Same contract as [`Transport`], but the calling thread is occupied until
/// the next stage finishes.
pub trait BlockingTransport<B> {
    /// What a successful send produces.
    type Response;

    /// What a failed send produces.
    type Error;

    /// Send `request` and block until its response arrives.
    ///
    /// # Errors
    /// Implementation-defined; see the concrete stage.
    fn send_blocking(&self, request: &mut Request<B>) -> Result<Self::Response, Self::Error>;
}
