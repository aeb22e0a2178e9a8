//! HTTP transports and the bearer-token decorator.
//!
//! A [`Transport`] executes one request and yields one response. Decorators
//! such as [`BearerAuth`] wrap another transport and are themselves
//! transports, so they compose in any order.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Request, Response};

use super::error::{ApiError, Result};

/// A boxed future returned by [`Transport::round_trip`].
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Something that can perform a single HTTP exchange.
///
/// Implementations must not interpret the response status.
pub trait Transport: Send + Sync {
    /// Send `request` and return the server's response.
    fn round_trip(&self, request: Request) -> BoxFuture<'_, reqwest::Result<Response>>;
}

impl Transport for reqwest::Client {
    fn round_trip(&self, request: Request) -> BoxFuture<'_, reqwest::Result<Response>> {
        Box::pin(self.execute(request))
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn round_trip(&self, request: Request) -> BoxFuture<'_, reqwest::Result<Response>> {
        (**self).round_trip(request)
    }
}

/// Transport decorator that attaches `Authorization: Bearer <token>`.
///
/// The header is set on the request value handed to this transport only;
/// copies the caller kept (see [`Request::try_clone`]) are left untouched.
#[derive(Clone)]
pub struct BearerAuth<T> {
    inner: T,
    header: HeaderValue,
}

impl<T: Transport> BearerAuth<T> {
    /// Wrap `inner`, capturing `token` for every request.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidToken` if the token cannot be carried in a
    /// header (control characters, newlines).
    pub fn new(inner: T, token: &str) -> Result<Self> {
        Ok(Self {
            inner,
            header: build_auth_header(token)?,
        })
    }
}

impl<T: Transport> Transport for BearerAuth<T> {
    fn round_trip(&self, mut request: Request) -> BoxFuture<'_, reqwest::Result<Response>> {
        request
            .headers_mut()
            .insert(AUTHORIZATION, self.header.clone());
        self.inner.round_trip(request)
    }
}

impl<T> fmt::Debug for BearerAuth<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuth")
            .field("header", &"Bearer <redacted>")
            .finish_non_exhaustive()
    }
}

/// Build the bearer header value, marked sensitive.
fn build_auth_header(token: &str) -> Result<HeaderValue> {
    let mut value =
        HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| ApiError::InvalidToken)?;
    value.set_sensitive(true);
    Ok(value)
}
