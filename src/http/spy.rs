//! A recording [`HttpClient`] used by unit tests.

use std::sync::Mutex;

use bytes::Bytes;

use super::{HttpClient, HttpCompletion};
use crate::EndpointUrl;

#[derive(Debug, snafu::Snafu)]
#[snafu(display("transport failed: {reason}"))]
pub(crate) struct TransportError {
    pub(crate) reason: &'static str,
}

impl crate::Error for TransportError {
    fn is_retryable(&self) -> bool {
        true
    }
}

/// Records each request and holds its completion until the test decides how
/// the request ends.
#[derive(Default)]
pub(crate) struct HttpClientSpy {
    requests: Mutex<Vec<(EndpointUrl, HttpCompletion<TransportError>)>>,
}

impl HttpClientSpy {
    pub(crate) fn requested_urls(&self) -> Vec<EndpointUrl> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub(crate) fn complete_with_error(&self, index: usize, reason: &'static str) {
        self.take(index)(Err(TransportError { reason }));
    }

    pub(crate) fn complete_with_status(&self, index: usize, status: u16, body: impl Into<Bytes>) {
        let mut response = http::Response::new(body.into());
        *response.status_mut() = http::StatusCode::from_u16(status).unwrap();
        self.take(index)(Ok(response));
    }

    // Swaps in a no-op so indices of the other pending requests stay stable.
    fn take(&self, index: usize) -> HttpCompletion<TransportError> {
        let mut requests = self.requests.lock().unwrap();
        std::mem::replace(&mut requests[index].1, Box::new(|_| {}))
    }
}

impl HttpClient for HttpClientSpy {
    type Error = TransportError;

    fn get(&self, url: &EndpointUrl, completion: HttpCompletion<Self::Error>) {
        self.requests
            .lock()
            .unwrap()
            .push((url.clone(), completion));
    }
}
