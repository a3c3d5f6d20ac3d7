//! Blocking HTTP client for the Notion search and page endpoints

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::block::Block;
use crate::config::{ApiConfig, Credentials};
use crate::error::{NotionError, Result};
use crate::notion::{
    CreatePageRequest, CreatedPage, PageSummary, SearchRequest, SearchResponse,
};

/// The API rejects page-create requests with more children than this.
pub const MAX_CHILDREN_PER_REQUEST: usize = 100;

const NOTION_VERSION: &str = "notion-version";

/// One request per call, no retries.
#[derive(Clone)]
pub struct NotionClient {
    client: Client,
    base_url: String,
}

impl NotionClient {
    pub fn new(api: &ApiConfig, credentials: &Credentials) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", credentials.token()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            HeaderName::from_static(NOTION_VERSION),
            HeaderValue::from_str(&api.version)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Pages shared with the integration, most recently edited first.
    pub fn search_pages(&self) -> Result<Vec<PageSummary>> {
        let url = format!("{}/search", self.base_url);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&SearchRequest::default())
            .send()?;
        let search: SearchResponse = handle_response(response)?;

        Ok(search.results.into_iter().map(PageSummary::from).collect())
    }

    /// Create a child page of `parent_id`. Only the first
    /// [`MAX_CHILDREN_PER_REQUEST`] blocks are sent.
    pub fn create_page(
        &self,
        parent_id: &str,
        title: &str,
        blocks: &[Block],
    ) -> Result<CreatedPage> {
        let url = format!("{}/pages", self.base_url);
        let request = page_request(parent_id, title, blocks);
        debug!("POST {} ({} blocks)", url, request.children_len());

        let response = self.client.post(&url).json(&request).send()?;
        handle_response(response)
    }
}

/// Build the page-create body, dropping blocks past the per-request limit.
pub fn page_request<'a>(
    parent_id: &'a str,
    title: &'a str,
    blocks: &'a [Block],
) -> CreatePageRequest<'a> {
    CreatePageRequest::new(parent_id, title, truncate_children(blocks))
}

/// The leading blocks that fit in one page-create request.
pub fn truncate_children(blocks: &[Block]) -> &[Block] {
    if blocks.len() > MAX_CHILDREN_PER_REQUEST {
        warn!(
            "page has {} blocks, only the first {} will be saved",
            blocks.len(),
            MAX_CHILDREN_PER_REQUEST
        );
    }
    &blocks[..blocks.len().min(MAX_CHILDREN_PER_REQUEST)]
}

fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        warn!("Notion API returned {}", status);
        return Err(NotionError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let text = response.text()?;
    Ok(serde_json::from_str(&text)?)
}
