use bytes::Bytes;
use tokio::runtime::Handle;

use super::{HttpClient, HttpClientResult, HttpCompletion};
use crate::EndpointUrl;

/// An [`HttpClient`] backed by `reqwest`.
///
/// Each call to [`get`](HttpClient::get) spawns one task on the configured
/// tokio runtime. The task sends the request, reads the whole body and then
/// invokes the completion from the runtime's worker thread.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    runtime: Handle,
}

impl ReqwestHttpClient {
    /// Creates a client that spawns requests on the given runtime.
    #[must_use]
    pub fn new(client: reqwest::Client, runtime: Handle) -> Self {
        Self { client, runtime }
    }

    /// Creates a client that spawns requests on the current runtime.
    ///
    /// # Errors
    ///
    /// Returns [`tokio::runtime::TryCurrentError`] when called outside the
    /// context of a tokio runtime.
    pub fn with_current_runtime(
        client: reqwest::Client,
    ) -> Result<Self, tokio::runtime::TryCurrentError> {
        Ok(Self::new(client, Handle::try_current()?))
    }
}

impl HttpClient for ReqwestHttpClient {
    type Error = reqwest::Error;

    fn get(&self, url: &EndpointUrl, completion: HttpCompletion<Self::Error>) {
        let request = self.client.get(url.as_url().clone());
        self.runtime.spawn(async move {
            completion(send(request).await);
        });
    }
}

async fn send(request: reqwest::RequestBuilder) -> HttpClientResult<reqwest::Error> {
    let response = request.send().await?;
    let status = response.status();
    let headers = response.headers().clone();
    let body: Bytes = response.bytes().await?;

    let mut converted = http::Response::new(body);
    *converted.status_mut() = status;
    *converted.headers_mut() = headers;
    Ok(converted)
}

impl crate::Error for reqwest::Error {
    fn is_retryable(&self) -> bool {
        self.is_connect() || self.is_timeout()
    }
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt as _, AsyncWriteExt as _},
        net::TcpListener,
        sync::oneshot,
    };

    use super::*;
    use crate::{
        IntoEndpointUrl as _,
        feed::FeedLoader as _,
        remote::{RemoteFeedLoader, RemoteFeedLoaderError},
    };

    async fn serve_once(listener: TcpListener, status_line: &'static str, body: &'static str) {
        let (mut stream, _) = listener.accept().await.unwrap();
        // Read the request head before answering
        let mut buf = vec![0u8; 4096];
        let _ = stream.read(&mut buf).await.unwrap();
        let raw = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(raw.as_bytes()).await.unwrap();
        stream.flush().await.unwrap();
    }

    fn local_client() -> ReqwestHttpClient {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        ReqwestHttpClient::with_current_runtime(client).unwrap()
    }

    fn local_url(addr: std::net::SocketAddr) -> EndpointUrl {
        format!("http://{addr}/feed").into_endpoint_url().unwrap()
    }

    #[tokio::test]
    async fn test_get_delivers_status_and_body() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = local_url(listener.local_addr().unwrap());
        let server = tokio::spawn(serve_once(listener, "HTTP/1.1 404 Not Found", "{}"));

        let client = local_client();
        let (tx, rx) = oneshot::channel();
        client.get(
            &url,
            Box::new(move |result: HttpClientResult<reqwest::Error>| {
                let _ = tx.send(result);
            }),
        );

        let response = rx.await.unwrap().unwrap();
        assert_eq!(response.status(), http::StatusCode::NOT_FOUND);
        assert_eq!(response.body().as_ref(), b"{}");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_loader_over_reqwest_decodes_feed() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = local_url(listener.local_addr().unwrap());
        let server = tokio::spawn(serve_once(
            listener,
            "HTTP/1.1 200 OK",
            r#"{"items":[{"image_id":"6f1b1b1e-8c1a-4b8e-9f3e-2a7c5d9e0b11","image_url":"https://img.example.com/a.png"}]}"#,
        ));

        let client = local_client();
        let loader = RemoteFeedLoader::new(url, client);
        let (tx, rx) = oneshot::channel();
        loader.load(move |result| {
            let _ = tx.send(result);
        });

        let images = rx.await.unwrap().unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].url.as_str(), "https://img.example.com/a.png");
        assert_eq!(images[0].description, None);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_refused_connection_is_connectivity() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = local_url(listener.local_addr().unwrap());
        drop(listener);

        let client = local_client();
        let loader = RemoteFeedLoader::new(url, client);
        let (tx, rx) = oneshot::channel();
        loader.load(move |result| {
            let _ = tx.send(result);
        });

        assert_eq!(
            rx.await.unwrap(),
            Err(RemoteFeedLoaderError::Connectivity)
        );
    }

    #[tokio::test]
    async fn test_refused_connection_is_retryable() {
        use crate::Error as _;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = local_url(listener.local_addr().unwrap());
        drop(listener);

        let client = local_client();
        let (tx, rx) = oneshot::channel();
        client.get(
            &url,
            Box::new(move |result: HttpClientResult<reqwest::Error>| {
                let _ = tx.send(result);
            }),
        );

        let error = rx.await.unwrap().unwrap_err();
        assert!(error.is_connect());
        assert!(error.is_retryable());
    }
}
