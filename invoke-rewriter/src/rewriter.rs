//! The invocation rewriter stage.
//!
//! Redirects requests addressed to an app id (`http://bank/deposit`) to the
//! local sidecar's invocation API
//! (`http://localhost:3500/v1.0/invoke/bank/method/deposit`), forwards them
//! to the next stage, and puts the original URI back before returning.

use std::{
    ops::{Deref, DerefMut},
    sync::OnceLock,
};

use async_trait::async_trait;
use hyper::{
    http::uri::{Authority, Parts, PathAndQuery, Scheme},
    Request, Uri,
};

use crate::{AllowList, BlockingTransport, RewriterConfig, Transport, SIDECAR_HOST};

/// Path prefix of the sidecar's service invocation API.
pub const INVOKE_PREFIX: &str = "/v1.0/invoke";

/// Pipeline stage that routes app-id addressed requests through the sidecar.
///
/// A request is rewritten when it has a host and that host is permitted by
/// [`allowed_hosts`](Self::allowed_hosts). Everything else passes through
/// untouched. Responses and errors from the inner stage are returned as-is.
///
/// # Request ownership
/// The rewriter edits the caller's request in place for the length of one
/// send and restores the original URI on every exit path, including errors,
/// panics in the inner stage and dropped futures. It never clones the
/// request, so a request must not be sent by two calls at once; the
/// `&mut Request` borrow enforces this.
///
/// # Cancel Safety
/// Cancel safe. Dropping the future from [`Transport::send`] restores the
/// original URI before the drop returns.
pub struct InvocationRewriter<T> {
    inner: T,
    config: RewriterConfig,
    allowed_hosts: AllowList,
    port: OnceLock<u16>,
}

impl<T> InvocationRewriter<T> {
    /// Wrap `inner` using the default configuration.
    #[must_use]
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, RewriterConfig::default())
    }

    /// Wrap `inner` using `config`.
    #[must_use]
    pub fn with_config(inner: T, config: RewriterConfig) -> Self {
        Self {
            inner,
            config,
            allowed_hosts: AllowList::new(),
            port: OnceLock::new(),
        }
    }

    /// Hosts eligible for rewriting. Empty means every host.
    #[must_use]
    pub fn allowed_hosts(&self) -> &AllowList {
        &self.allowed_hosts
    }

    /// The configuration this rewriter was built with.
    #[must_use]
    pub fn config(&self) -> &RewriterConfig {
        &self.config
    }

    /// The next stage.
    #[must_use]
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Sidecar port, read from the environment on first use and cached for
    /// the life of this rewriter.
    #[must_use]
    pub fn sidecar_port(&self) -> u16 {
        *self.port.get_or_init(|| self.config.resolve_port())
    }

    /// Decide whether `uri` is rewritten and, if so, to what.
    ///
    /// Does not touch the request; the port is only resolved once the
    /// allow-list has accepted the host.
    fn plan(&self, uri: &Uri) -> Option<Uri> {
        let host = uri.host()?;
        if !self.allowed_hosts.permits(host) {
            tracing::trace!(%host, "host not in allow list, passing through");
            return None;
        }
        let rewritten = rewrite_uri(uri, self.sidecar_port());
        match &rewritten {
            Some(target) => tracing::debug!(
                app_id = %host,
                original = %uri,
                rewritten = %target,
                "routing request through sidecar"
            ),
            None => tracing::warn!(
                app_id = %host,
                original = %uri,
                "cannot build sidecar URI, passing through"
            ),
        }
        rewritten
    }
}

#[async_trait]
impl<B, T> Transport<B> for InvocationRewriter<T>
where
    B: Send + 'static,
    T: Transport<B>,
{
    type Response = T::Response;
    type Error = T::Error;

    async fn send(&self, request: &mut Request<B>) -> Result<Self::Response, Self::Error> {
        match self.plan(request.uri()) {
            None => self.inner.send(request).await,
            Some(target) => {
                let mut guard = RewriteGuard::apply(request, target);
                self.inner.send(&mut *guard).await
            }
        }
    }
}

impl<B, T> BlockingTransport<B> for InvocationRewriter<T>
where
    T: BlockingTransport<B>,
{
    type Response = T::Response;
    type Error = T::Error;

    fn send_blocking(&self, request: &mut Request<B>) -> Result<Self::Response, Self::Error> {
        match self.plan(request.uri()) {
            None => self.inner.send_blocking(request),
            Some(target) => {
                let mut guard = RewriteGuard::apply(request, target);
                self.inner.send_blocking(&mut *guard)
            }
        }
    }
}

/// Build the sidecar URI for `original`.
///
/// Keeps the scheme (defaulting to `http`), replaces the authority with
/// `localhost:<port>` and prefixes the path and query with
/// `/v1.0/invoke/<host>/method`. The host is lowercased, so `http://Bank/x`
/// and `http://bank/x` reach the same app id. An empty path becomes `/`,
/// also when a query follows it. Returns `None` if `original` has no host or
/// the result is not a valid URI.
#[must_use]
pub fn rewrite_uri(original: &Uri, port: u16) -> Option<Uri> {
    let app_id = original.host()?.to_ascii_lowercase();
    let path_and_query = match original.query() {
        Some(query) => format!("{}?{query}", original.path()),
        None => original.path().to_owned(),
    };

    let mut parts = Parts::default();
    parts.scheme = Some(original.scheme().cloned().unwrap_or(Scheme::HTTP));
    parts.authority = Some(format!("{SIDECAR_HOST}:{port}").parse::<Authority>().ok()?);
    parts.path_and_query = Some(
        format!("{INVOKE_PREFIX}/{app_id}/method{path_and_query}")
            .parse::<PathAndQuery>()
            .ok()?,
    );
    Uri::from_parts(parts).ok()
}

/// Holds a request while it carries the sidecar URI.
///
/// Created by swapping in the rewritten URI; dropping it swaps the original
/// back. Derefs to the request so the next stage can be handed `&mut guard`.
struct RewriteGuard<'a, B> {
    request: &'a mut Request<B>,
    original: Uri,
}

impl<'a, B> RewriteGuard<'a, B> {
    fn apply(request: &'a mut Request<B>, target: Uri) -> Self {
        let original = std::mem::replace(request.uri_mut(), target);
        Self { request, original }
    }
}

impl<B> Deref for RewriteGuard<'_, B> {
    type Target = Request<B>;

    fn deref(&self) -> &Self::Target {
        &*self.request
    }
}

impl<B> DerefMut for RewriteGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.request
    }
}

impl<B> Drop for RewriteGuard<'_, B> {
    fn drop(&mut self) {
        *self.request.uri_mut() = std::mem::take(&mut self.original);
    }
}
