use std::sync::mpsc;

use feed_loader::{RemoteFeedLoader, http::ReqwestHttpClient, prelude::*};
use snafu::prelude::*;
use tracing_subscriber::EnvFilter;

#[snafu::report]
#[tokio::main]
pub async fn main() -> Result<(), snafu::Whatever> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let feed_url = std::env::var("FEED_URL").whatever_context("Failed to get FEED_URL")?;

    let http_client = ReqwestHttpClient::with_current_runtime(reqwest::Client::new())
        .whatever_context("Failed to attach to the tokio runtime")?;
    let loader =
        RemoteFeedLoader::try_new(feed_url, http_client).whatever_context("Invalid FEED_URL")?;

    let (tx, rx) = mpsc::channel();
    loader.load(move |result| {
        let _ = tx.send(result);
    });

    let images = tokio::task::spawn_blocking(move || rx.recv())
        .await
        .whatever_context("Waiting for the feed panicked")?
        .whatever_context("Feed loader dropped the request")?
        .whatever_context("Failed to load feed")?;

    for image in images {
        println!(
            "{} {} ({})",
            image.id,
            image.url,
            image.description.as_deref().unwrap_or("no description")
        );
    }

    Ok(())
}
