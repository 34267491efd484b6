//! HTTP client for the catalog search endpoint.

use std::time::Duration;

use async_trait::async_trait;
use picker_core::{CatalogProduct, PickerConfig};
use reqwest::Client;

use crate::error::CatalogError;
use crate::normalize::normalize_product;
use crate::paginator::{FetchedPage, PageRequest};
use crate::source::CatalogSource;
use crate::types::WireProduct;

/// Header carrying the API key credential on every search request.
pub const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for the paginated catalog search endpoint.
///
/// Non-2xx responses become [`CatalogError::UnexpectedStatus`]. There is no
/// retry policy here: a failed page is reported once and the caller decides
/// whether to re-issue it.
pub struct CatalogClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl CatalogClient {
    /// Creates a `CatalogClient` with a request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidEndpoint`] if `api_url` is not an
    /// absolute URL, or [`CatalogError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        api_url: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CatalogError> {
        reqwest::Url::parse(api_url).map_err(|e| CatalogError::InvalidEndpoint {
            url: api_url.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.to_owned(),
            api_key: api_key.to_owned(),
        })
    }

    /// Builds a client from the endpoint, credential and timeout in `config`.
    ///
    /// # Errors
    ///
    /// See [`CatalogClient::new`].
    pub fn from_config(config: &PickerConfig) -> Result<Self, CatalogError> {
        Self::new(
            &config.api_url,
            &config.api_key,
            config.fetch_timeout_secs,
            &config.user_agent,
        )
    }

    /// Fetches one page of search results.
    ///
    /// A body that is not a JSON array is treated as an empty page. Array
    /// elements that do not decode as products are skipped with a warning
    /// but still count toward [`FetchedPage::received`].
    ///
    /// # Errors
    ///
    /// - [`CatalogError::UnexpectedStatus`]: any non-2xx status.
    /// - [`CatalogError::Http`]: network or TLS failure, or client-side timeout.
    pub async fn fetch_products_page(
        &self,
        query: &str,
        page: u32,
        limit: u32,
    ) -> Result<FetchedPage, CatalogError> {
        let url = Self::search_url(&self.api_url, query, page, limit)?;

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        Ok(parse_page_body(&body, page))
    }

    /// Builds the search URL for a query, 1-based page and page size.
    ///
    /// `search` is omitted entirely when `query` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidEndpoint`] if `api_url` cannot be parsed.
    fn search_url(api_url: &str, query: &str, page: u32, limit: u32) -> Result<String, CatalogError> {
        let mut url = reqwest::Url::parse(api_url).map_err(|e| CatalogError::InvalidEndpoint {
            url: api_url.to_owned(),
            reason: e.to_string(),
        })?;

        {
            let mut pairs = url.query_pairs_mut();
            if !query.is_empty() {
                pairs.append_pair("search", query);
            }
            pairs
                .append_pair("page", &page.to_string())
                .append_pair("limit", &limit.to_string());
        }

        Ok(url.to_string())
    }
}

/// Decodes a search response body into catalog products.
fn parse_page_body(body: &str, page: u32) -> FetchedPage {
    let Ok(serde_json::Value::Array(elements)) = serde_json::from_str::<serde_json::Value>(body)
    else {
        tracing::debug!(page, "search response is not a JSON array; treating as empty page");
        return FetchedPage::default();
    };

    let received = elements.len();
    let products: Vec<CatalogProduct> = elements
        .into_iter()
        .filter_map(|element| match serde_json::from_value::<WireProduct>(element) {
            Ok(product) => Some(normalize_product(product)),
            Err(e) => {
                tracing::warn!(page, error = %e, "skipping malformed product in search response");
                None
            }
        })
        .collect();
    FetchedPage::new(products, received)
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<FetchedPage, CatalogError> {
        self.fetch_products_page(request.query(), request.page(), request.limit)
            .await
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
