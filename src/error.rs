//! The [`Error`] trait.
//!
//! Errors raised by an [`HttpClient`](crate::http::HttpClient) and by the
//! loaders implement [`Error`], which extends [`std::error::Error`] with a
//! retry hint.

use std::convert::Infallible;

use snafu::AsErrorSource;

/// Errors that may occur in the library or its HTTP collaborators.
pub trait Error: std::error::Error + AsErrorSource + Send + Sync + 'static {
    /// If true, this indicates that a failed request may succeed if retried.
    fn is_retryable(&self) -> bool;
}

impl Error for Infallible {
    fn is_retryable(&self) -> bool {
        false
    }
}
