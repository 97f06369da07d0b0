//! Network transports built on hyper's pooled client.
//!
//! These are the last stage of a pipeline: they put the request on the wire
//! and buffer the whole response body. Non-success status codes are
//! responses, not errors.

use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

use crate::{BlockingTransport, Transport, TransportError};

/// Request body type accepted by the hyper transports.
pub type Body = Full<Bytes>;

/// Asynchronous HTTP/1 transport over TCP.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HyperTransport {
    client: Client<HttpConnector, Body>,
}

impl HyperTransport {
    /// Create a transport with a fresh connection pool.
    #[must_use]
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build_http();
        Self { client }
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport<Body> for HyperTransport {
    type Response = Response<Bytes>;
    type Error = TransportError;

    /// Send a copy of `request` and buffer the response.
    ///
    /// # Errors
    /// Returns [`TransportError::Request`] if the request cannot be sent, or
    /// [`TransportError::Body`] if the response body cannot be read.
    async fn send(&self, request: &mut Request<Body>) -> Result<Response<Bytes>, TransportError> {
        let outbound = copy_request(request);
        let method = outbound.method().clone();
        let uri = outbound.uri().clone();

        let response = self.client.request(outbound).await?;
        let (parts, body) = response.into_parts();
        let bytes = body.collect().await?.to_bytes();

        tracing::debug!(%method, %uri, status = %parts.status, len = bytes.len(), "response received");
        Ok(Response::from_parts(parts, bytes))
    }
}

/// Blocking HTTP/1 transport.
///
/// Owns a current-thread tokio runtime and drives a [`HyperTransport`] on it
/// for each send.
#[derive(Debug)]
pub struct BlockingHyperTransport {
    runtime: tokio::runtime::Runtime,
    inner: HyperTransport,
}

impl BlockingHyperTransport {
    /// Create a transport with its own runtime and connection pool.
    ///
    /// # Errors
    /// Returns [`TransportError::Runtime`] if the runtime cannot be built.
    pub fn new() -> Result<Self, TransportError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(TransportError::Runtime)?;
        Ok(Self { runtime, inner: HyperTransport::new() })
    }
}

impl BlockingTransport<Body> for BlockingHyperTransport {
    type Response = Response<Bytes>;
    type Error = TransportError;

    /// Send a copy of `request`, blocking until the response is buffered.
    ///
    /// # Errors
    /// Same as [`HyperTransport::send`](Transport::send).
    ///
    /// # Panics
    /// Panics if called from within an async runtime.
    fn send_blocking(&self, request: &mut Request<Body>) -> Result<Response<Bytes>, TransportError> {
        self.runtime.block_on(self.inner.send(request))
    }
}

/// The hyper client consumes its request, while pipeline stages only borrow
/// theirs; send a copy so the caller keeps the original.
fn copy_request(request: &Request<Body>) -> Request<Body> {
    let mut outbound = Request::new(request.body().clone());
    *outbound.method_mut() = request.method().clone();
    *outbound.uri_mut() = request.uri().clone();
    *outbound.version_mut() = request.version();
    *outbound.headers_mut() = request.headers().clone();
    outbound
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::{header, Method};

    #[test]
    fn copy_request_keeps_every_field() {
        let mut request = Request::new(Full::new(Bytes::from_static(b"{\"id\":\"17\"}")));
        *request.method_mut() = Method::POST;
        *request.uri_mut() = "http://bank/deposit".parse().unwrap_or_else(|e| panic!("{e}"));
        request
            .headers_mut()
            .insert(header::CONTENT_TYPE, header::HeaderValue::from_static("application/json"));

        let copy = copy_request(&request);
        assert_eq!(copy.method(), &Method::POST);
        assert_eq!(copy.uri(), request.uri());
        assert_eq!(copy.version(), request.version());
        assert_eq!(copy.headers()[header::CONTENT_TYPE], "application/json");
    }

    #[tokio::test]
    async fn send_to_closed_port_is_request_error() {
        let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
            Ok(l) => l,
            Err(e) => panic!("failed to bind: {e}"),
        };
        let addr = match listener.local_addr() {
            Ok(a) => a,
            Err(e) => panic!("no local addr: {e}"),
        };
        drop(listener);

        let transport = HyperTransport::new();
        let mut request = Request::new(Full::new(Bytes::new()));
        *request.uri_mut() = format!("http://{addr}/accounts/17").parse().unwrap_or_else(|e| panic!("{e}"));
        let result = transport.send(&mut request).await;
        assert!(
            matches!(result, Err(TransportError::Request(_))),
            "connection refused must surface as TransportError::Request"
        );
    }
}
