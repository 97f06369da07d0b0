//! Error types for the bundled hyper transports.
//!
//! The rewriter itself has no error type: it hands back whatever the next
//! stage returns.

/// Errors produced by [`HyperTransport`](crate::HyperTransport) and
/// [`BlockingHyperTransport`](crate::BlockingHyperTransport).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The request could not be sent (connect, protocol or URI error).
    #[error("send request: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),

    /// The response body could not be read to the end.
    #[error("read response body: {0}")]
    Body(#[from] hyper::Error),

    /// The runtime driving a blocking transport could not be built.
    #[error("build blocking runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
