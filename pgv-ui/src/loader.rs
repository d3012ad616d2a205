//! Page fetching from the photo service

use crate::filter::GalleryFilter;
use crate::page::Page;
use pgv_common::api::PageResponse;
use pgv_common::{Error, Result};
use std::time::Duration;

const USER_AGENT: &str = concat!("PGV/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client fetching one page of image metadata at a time
///
/// No retry, no caching of previously visited pages: every call hits the
/// service and the result fully replaces whatever was held before.
pub struct PageLoader {
    http_client: reqwest::Client,
    base_url: String,
}

impl PageLoader {
    /// Create a loader for the photo service at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL of the photo service, without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of the filtered collection
    ///
    /// Without a cursor this is the unparameterized first-page request;
    /// with a cursor the token is echoed verbatim as the `c` query
    /// parameter ahead of the filter constraints.
    pub async fn fetch_page(&self, filter: &GalleryFilter, cursor: Option<&str>) -> Result<Page> {
        let url = format!("{}{}", self.base_url, filter.path());
        let query = filter.query_pairs(cursor);

        tracing::debug!(url = %url, cursor = cursor.unwrap_or("<first>"), "Fetching gallery page");

        let response = self
            .http_client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Api(status.as_u16(), error_text));
        }

        let body: PageResponse = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        let page = Page::from_response(body, &self.base_url);

        tracing::info!(
            images = page.len(),
            links = page.links().len(),
            "Fetched gallery page"
        );

        Ok(page)
    }
}
