//! `tower` middleware that signs requests on their way to an inner HTTP service.
//!
//! ```no_run
//! use bytes::Bytes;
//! use mac_auth::{HawkClient, HawkLayer, HawkSettings, SettingsMonitor};
//! use tower::Layer;
//!
//! # fn wrap<S>(transport: S) -> mac_auth::Result<()>
//! # where S: tower::Service<http::Request<Bytes>, Response = http::Response<Bytes>> {
//! let settings = SettingsMonitor::new(HawkSettings::new("id123", "3@uo45er?"));
//! let client = HawkClient::new(settings)?;
//! let service = HawkLayer::new(client).layer(transport);
//! # Ok(())
//! # }
//! ```
use crate::error::*;
use crate::hawk::HawkClient;
use crate::hmac_scheme::HmacClient;
use bytes::Bytes;
use futures::future::BoxFuture;
use http::{Request, Response};
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Something that can authenticate an exchange with an inner service.
pub trait Authenticate: Clone + Send + Sync + 'static {
    fn authenticate<S>(
        &self,
        request: Request<Bytes>,
        inner: S,
    ) -> BoxFuture<'static, Result<Response<Bytes>>>
    where
        S: Service<Request<Bytes>, Response = Response<Bytes>> + Send + 'static,
        S::Future: Send + 'static,
        S::Error: Into<BoxError>;
}

impl Authenticate for HawkClient {
    fn authenticate<S>(
        &self,
        request: Request<Bytes>,
        inner: S,
    ) -> BoxFuture<'static, Result<Response<Bytes>>>
    where
        S: Service<Request<Bytes>, Response = Response<Bytes>> + Send + 'static,
        S::Future: Send + 'static,
        S::Error: Into<BoxError>,
    {
        let client = self.clone();
        Box::pin(async move { client.send(request, inner).await })
    }
}

impl Authenticate for HmacClient {
    fn authenticate<S>(
        &self,
        request: Request<Bytes>,
        inner: S,
    ) -> BoxFuture<'static, Result<Response<Bytes>>>
    where
        S: Service<Request<Bytes>, Response = Response<Bytes>> + Send + 'static,
        S::Future: Send + 'static,
        S::Error: Into<BoxError>,
    {
        let client = self.clone();
        Box::pin(async move { client.send(request, inner).await })
    }
}

/// Wraps a service in [`AuthService`].
#[derive(Debug, Clone)]
pub struct AuthLayer<A> {
    auth: A,
}

pub type HawkLayer = AuthLayer<HawkClient>;
pub type HmacLayer = AuthLayer<HmacClient>;

impl<A> AuthLayer<A> {
    pub fn new(auth: A) -> Self {
        AuthLayer { auth }
    }
}

impl<A: Clone, S> Layer<S> for AuthLayer<A> {
    type Service = AuthService<A, S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            auth: self.auth.clone(),
            inner,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthService<A, S> {
    auth: A,
    inner: S,
}

impl<A, S> Service<Request<Bytes>> for AuthService<A, S>
where
    A: Authenticate,
    S: Service<Request<Bytes>, Response = Response<Bytes>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Into<BoxError>,
{
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = BoxFuture<'static, Result<Response<Bytes>>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner
            .poll_ready(cx)
            .map_err(|e| Error::Transport(e.into()))
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        // keep the instance that was driven to readiness
        let clone = self.inner.clone();
        let inner = std::mem::replace(&mut self.inner, clone);
        self.auth.authenticate(request, inner)
    }
}
