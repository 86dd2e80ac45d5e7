//! The feed domain model.

use bon::Builder;
use url::Url;
use uuid::Uuid;

/// One entry of an image feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Builder)]
pub struct FeedImage {
    /// Identifier of the image.
    pub id: Uuid,
    /// Free-form description, if the feed provides one.
    #[builder(into)]
    pub description: Option<String>,
    /// Where the image was taken, if the feed provides it.
    #[builder(into)]
    pub location: Option<String>,
    /// Location of the image itself.
    pub url: Url,
}

/// The result of loading a feed.
pub type FeedLoadResult<E> = Result<Vec<FeedImage>, E>;

/// Something that can load a feed of images.
///
/// Higher layers depend on this trait rather than on a concrete loader, so a
/// remote loader can be swapped for a cached or in-memory one.
pub trait FeedLoader {
    /// The error reported when loading fails.
    type Error: crate::Error;

    /// Starts loading the feed.
    ///
    /// Returns immediately. `completion` is invoked at most once with the
    /// outcome, possibly on another thread.
    fn load(&self, completion: impl FnOnce(FeedLoadResult<Self::Error>) + Send + 'static);
}
