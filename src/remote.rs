//! Loading a feed from a remote HTTP endpoint.
//!
//! [`RemoteFeedLoader`] issues one GET per [`load`](FeedLoader::load) and
//! turns the transport outcome into a [`FeedLoadResult`]:
//!
//! - a transport error becomes [`RemoteFeedLoaderError::Connectivity`];
//! - any status other than `200 OK` becomes [`RemoteFeedLoaderError::InvalidData`];
//! - a `200 OK` body that does not decode as a whole becomes
//!   [`RemoteFeedLoaderError::InvalidData`];
//! - otherwise every item is returned, in payload order.

use std::sync::{Arc, Weak};

use bon::bon;
use bytes::Bytes;
use http::StatusCode;
use serde::Deserialize;
use snafu::prelude::*;
use url::Url;
use uuid::Uuid;

use crate::{
    EndpointUrl, IntoEndpointUrl,
    feed::{FeedImage, FeedLoadResult, FeedLoader},
    http::{HttpClient, HttpClientResult},
};

/// Why a remote load failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Snafu)]
pub enum RemoteFeedLoaderError {
    /// No response was obtained from the server.
    #[snafu(display("could not reach the feed endpoint"))]
    Connectivity,
    /// A response was obtained but could not be turned into a feed.
    #[snafu(display("the feed endpoint returned invalid data"))]
    InvalidData,
}

impl crate::Error for RemoteFeedLoaderError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Connectivity)
    }
}

/// Loads a feed of images from a fixed URL using an [`HttpClient`].
///
/// Requests still in flight when the loader is dropped are not cancelled,
/// but their completions are never invoked.
pub struct RemoteFeedLoader<C: HttpClient> {
    state: Arc<LoaderState<C>>,
}

struct LoaderState<C> {
    url: EndpointUrl,
    client: C,
}

#[bon]
impl<C: HttpClient> RemoteFeedLoader<C> {
    /// Creates a loader for `url` that issues its requests through `client`.
    pub fn new(url: EndpointUrl, client: C) -> Self {
        Self {
            state: Arc::new(LoaderState { url, client }),
        }
    }

    /// Configures a loader field by field.
    ///
    /// `url` accepts anything implementing [`IntoEndpointUrl`].
    ///
    /// # Errors
    ///
    /// `build()` returns the conversion error if `url` is not a valid
    /// absolute URL.
    #[builder(start_fn = builder, finish_fn = build)]
    pub fn configure<U: IntoEndpointUrl>(url: U, client: C) -> Result<Self, U::Error> {
        Self::try_new(url, client)
    }

    /// Creates a loader from anything convertible into an [`EndpointUrl`].
    ///
    /// # Errors
    ///
    /// Returns the conversion error if `url` is not a valid absolute URL.
    pub fn try_new<U: IntoEndpointUrl>(url: U, client: C) -> Result<Self, U::Error> {
        Ok(Self::new(url.into_endpoint_url()?, client))
    }

    /// The URL this loader requests.
    #[must_use]
    pub fn url(&self) -> &EndpointUrl {
        &self.state.url
    }
}

impl<C: HttpClient + 'static> FeedLoader for RemoteFeedLoader<C> {
    type Error = RemoteFeedLoaderError;

    fn load(&self, completion: impl FnOnce(FeedLoadResult<Self::Error>) + Send + 'static) {
        tracing::trace!(url = %self.state.url, "loading feed");

        let state: Weak<LoaderState<C>> = Arc::downgrade(&self.state);
        self.state.client.get(
            &self.state.url,
            Box::new(move |result: HttpClientResult<C::Error>| {
                let Some(_loader) = state.upgrade() else {
                    tracing::trace!("feed loader released before the response arrived");
                    return;
                };
                completion(map(result));
            }),
        );
    }
}

/// Maps a transport outcome to the outcome of a feed load.
pub(crate) fn map<E: crate::Error>(
    result: HttpClientResult<E>,
) -> FeedLoadResult<RemoteFeedLoaderError> {
    let response = match result {
        Ok(response) => response,
        Err(error) => {
            tracing::debug!(%error, "feed request failed");
            return ConnectivitySnafu.fail();
        }
    };

    if response.status() != StatusCode::OK {
        tracing::debug!(status = %response.status(), "feed endpoint returned an unexpected status");
        return InvalidDataSnafu.fail();
    }

    decode(response.body())
}

fn decode(body: &Bytes) -> FeedLoadResult<RemoteFeedLoaderError> {
    match serde_json::from_slice::<Root>(body) {
        Ok(root) => Ok(root.items.into_iter().map(FeedImage::from).collect()),
        Err(error) => {
            tracing::debug!(%error, "feed payload could not be decoded");
            InvalidDataSnafu.fail()
        }
    }
}

/// The response body of a successful feed request.
#[derive(Deserialize)]
struct Root {
    items: Vec<RemoteFeedImage>,
}

/// A feed item as it appears on the wire.
#[derive(Deserialize)]
struct RemoteFeedImage {
    image_id: Uuid,
    image_desc: Option<String>,
    image_loc: Option<String>,
    image_url: Url,
}

impl From<RemoteFeedImage> for FeedImage {
    fn from(item: RemoteFeedImage) -> Self {
        Self {
            id: item.image_id,
            description: item.image_desc,
            location: item.image_loc,
            url: item.image_url,
        }
    }
}
