use async_trait::async_trait;
use crate::error::CatalogError;
use crate::paginator::{FetchedPage, PageRequest};

/// Anything that can answer a single paginated catalog request.
///
/// [`crate::CatalogClient`] is the HTTP implementation; tests substitute an
/// in-memory catalog to control response timing.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<FetchedPage, CatalogError>;
}
