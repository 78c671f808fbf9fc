//! HTTP content source.
//!
//! Fetches documents relative to the site's base URL with caching disabled,
//! so a report regenerated under the same slug is picked up immediately.

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{ACCEPT, CACHE_CONTROL, PRAGMA};
use tracing::debug;

use super::ContentSource;
use crate::content::ContentDocument;
use crate::error::LoadError;

/// Creates the HTTP client used for content requests.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built (should never happen).
#[must_use]
pub fn create_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("failed to build HTTP client")
}

/// Reads documents over HTTP(S) from a site base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base: Url,
}

impl HttpSource {
    /// Creates a source rooted at `base`.
    ///
    /// A base without a trailing slash is treated as a directory, so
    /// `https://example.com/psych` resolves `data/x.json` to
    /// `https://example.com/psych/data/x.json`.
    #[must_use]
    pub fn new(client: reqwest::Client, mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);
        Self { client, base }
    }

    /// Absolute URL of a site-relative resource.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Fetch`] if the resource cannot be joined onto
    /// the base URL.
    pub fn url_for(&self, resource: &str) -> Result<Url, LoadError> {
        self.base
            .join(resource.trim_start_matches('/'))
            .map_err(|e| LoadError::Fetch {
                resource: resource.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn fetch(&self, resource: &str) -> Result<ContentDocument, LoadError> {
        let url = self.url_for(resource)?;
        debug!(%url, "fetching content");

        let fetch_err = |e: reqwest::Error| LoadError::Fetch {
            resource: resource.to_string(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(fetch_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                resource: resource.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(fetch_err)?;

        ContentDocument::from_slice(&bytes).map_err(|e| LoadError::Parse {
            resource: resource.to_string(),
            reason: e.to_string(),
        })
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}
