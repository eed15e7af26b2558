use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use url::Url;

use crate::resolver::Origin;

#[derive(Debug, Error)]
pub(crate) enum FetchError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("server responded with {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to read body: {0}")]
    Body(#[source] reqwest::Error),
}

/// A downloaded page.
#[derive(Debug)]
pub(crate) struct Page {
    /// The address that was actually reached, after following redirects.
    pub(crate) url: Url,
    pub(crate) body: String,
    pub(crate) is_html: bool,
}

impl Page {
    /// The origin links on this page are filtered against.
    pub(crate) fn origin(&self) -> Option<Origin> {
        Origin::of(&self.url)
    }
}

/// The internal HTTP client is already wrapped in an `Arc`, so that means that the
/// downloader is cheap to clone.
#[derive(Debug, Clone)]
pub(crate) struct Downloader(reqwest::Client);

impl Downloader {
    pub(crate) fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::ClientBuilder::new().timeout(timeout).build()?;
        Ok(Self(client))
    }

    pub(crate) async fn fetch(&self, url: &Url) -> Result<Page, FetchError> {
        let response = self
            .0
            .get(url.as_str())
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let url = response.url().clone();
        // Servers that don't declare a type get the benefit of the doubt.
        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map_or(true, |value| value.contains("html"));
        let body = response.text().await.map_err(FetchError::Body)?;

        Ok(Page { url, body, is_html })
    }
}
