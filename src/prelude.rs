//! Imports for syntax extensions.

pub use crate::IntoEndpointUrl as _;
pub use crate::feed::FeedLoader as _;
