//! HTTP client abstraction.
//!
//! This module defines the trait that decouples feed loading from any
//! specific HTTP implementation. Users provide their own [`HttpClient`] (e.g.
//! backed by `reqwest`, `hyper`, or a platform networking API) and the loader
//! operates against it.

#[cfg(feature = "http-client-reqwest-0_12")]
mod reqwest_0_12;
#[cfg(test)]
pub(crate) mod spy;

use std::sync::Arc;

use bytes::Bytes;

use crate::EndpointUrl;

#[cfg(feature = "http-client-reqwest-0_12")]
pub use reqwest_0_12::ReqwestHttpClient;

/// The outcome of one GET request.
///
/// A transport success carries the full response (status code, headers and
/// body bytes) regardless of the status code. The error is opaque.
pub type HttpClientResult<E> = Result<http::Response<Bytes>, E>;

/// The callback an [`HttpClient`] invokes once the request has finished.
pub type HttpCompletion<E> = Box<dyn FnOnce(HttpClientResult<E>) + Send + 'static>;

/// Defines the common interface for issuing GET requests.
pub trait HttpClient: Send + Sync {
    /// The error type reported when no response could be obtained.
    type Error: crate::Error;

    /// Starts a GET request to `url` and returns without waiting for it.
    ///
    /// Implementations must invoke `completion` exactly once, either with the
    /// response or with the transport error. It may be invoked on any thread,
    /// including inline before `get` returns.
    fn get(&self, url: &EndpointUrl, completion: HttpCompletion<Self::Error>);
}

impl<C: HttpClient + ?Sized> HttpClient for Arc<C> {
    type Error = C::Error;

    fn get(&self, url: &EndpointUrl, completion: HttpCompletion<Self::Error>) {
        (**self).get(url, completion);
    }
}

impl<C: HttpClient + ?Sized> HttpClient for &'static C {
    type Error = C::Error;

    fn get(&self, url: &EndpointUrl, completion: HttpCompletion<Self::Error>) {
        (**self).get(url, completion);
    }
}
