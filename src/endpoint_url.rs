//! The URL a feed is loaded from.
//!
//! [`EndpointUrl`] is a newtype over [`Url`] that is parsed once, when the
//! loader is configured, so that issuing a request never has to re-validate
//! it. It can be constructed from common string and URL types via
//! [`IntoEndpointUrl`].

use std::{convert::Infallible, fmt};

use serde::{Deserialize, Serialize};
use url::{ParseError, Url};

/// A parsed, absolute endpoint URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointUrl(Url);

impl Serialize for EndpointUrl {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for EndpointUrl {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.into_endpoint_url().map_err(serde::de::Error::custom)
    }
}

impl EndpointUrl {
    /// Returns the inner [`Url`].
    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consumes the [`EndpointUrl`] and returns the inner [`Url`].
    #[must_use]
    pub fn into_url(self) -> Url {
        self.0
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Conversion trait for types that can be turned into an [`EndpointUrl`].
pub trait IntoEndpointUrl {
    /// The error type returned if the conversion fails.
    type Error;

    /// Attempts to convert this value into an [`EndpointUrl`].
    fn into_endpoint_url(self) -> Result<EndpointUrl, Self::Error>;
}

impl IntoEndpointUrl for EndpointUrl {
    type Error = Infallible;

    fn into_endpoint_url(self) -> Result<EndpointUrl, Self::Error> {
        Ok(self)
    }
}

impl IntoEndpointUrl for Url {
    type Error = Infallible;

    fn into_endpoint_url(self) -> Result<EndpointUrl, Self::Error> {
        Ok(EndpointUrl(self))
    }
}

impl IntoEndpointUrl for http::Uri {
    type Error = ParseError;

    fn into_endpoint_url(self) -> Result<EndpointUrl, Self::Error> {
        Url::parse(&self.to_string()).map(EndpointUrl)
    }
}

impl IntoEndpointUrl for &str {
    type Error = ParseError;

    fn into_endpoint_url(self) -> Result<EndpointUrl, Self::Error> {
        Url::parse(self).map(EndpointUrl)
    }
}

impl IntoEndpointUrl for String {
    type Error = ParseError;

    fn into_endpoint_url(self) -> Result<EndpointUrl, Self::Error> {
        Url::parse(&self).map(EndpointUrl)
    }
}
