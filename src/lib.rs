//! Loads an image feed over HTTP and maps it into typed domain values.
//!
//! The HTTP transport is supplied by the caller through the
//! [`HttpClient`](http::HttpClient) trait. [`RemoteFeedLoader`] asks it for
//! one resource, validates the response and decodes the JSON payload into
//! [`FeedImage`]s, reporting the outcome through a completion callback.

#![forbid(unsafe_code)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod endpoint_url;
mod error;
pub mod feed;
pub mod http;
pub mod prelude;
pub mod remote;

pub use endpoint_url::{EndpointUrl, IntoEndpointUrl};
pub use error::Error;
pub use feed::{FeedImage, FeedLoadResult, FeedLoader};
pub use remote::{RemoteFeedLoader, RemoteFeedLoaderError};

/// Documentation
pub mod _documentation {
    #[doc = include_str!("../README.md")]
    mod readme {}
    #[doc = include_str!("../CHANGELOG.md")]
    pub mod changelog {}
}

pub use bytes::Bytes;
