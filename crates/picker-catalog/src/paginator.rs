//! Incremental search pagination with append-only accumulation.
//!
//! [`SearchPaginator`] is a synchronous state machine. It never performs I/O:
//! `search`, `load_more` and `retry` hand back a [`PageRequest`] for the
//! caller to execute, and the caller feeds the result back through
//! [`SearchPaginator::apply`]. Every request carries a [`RequestTag`]; a
//! result is applied only while its tag is still the live in-flight tag, so
//! responses for a superseded query or an abandoned attempt are dropped.
//!
//! ## Status transitions
//!
//! ```text
//! search(q) ──► InFlight(p=1)
//! InFlight ──ok, full page──► Idle ──load_more──► InFlight(p+1)
//! InFlight ──ok, short page─► Exhausted            (load_more is a no-op)
//!          (short = fewer elements received than the page size)
//! InFlight ──error──────────► Failed(p) ──retry / load_more──► InFlight(p)
//! ```

use std::collections::HashSet;

use picker_core::CatalogProduct;

use crate::error::CatalogError;

/// Identity of one issued page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTag {
    pub query: String,
    /// 1-based page number.
    pub page: u32,
    /// Per-paginator request sequence number; unique for every issued request.
    pub seq: u64,
}

/// A page fetch the caller must execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub tag: RequestTag,
    /// Page size sent as the `limit` parameter.
    pub limit: u32,
}

impl PageRequest {
    #[must_use]
    pub fn query(&self) -> &str {
        &self.tag.query
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.tag.page
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorStatus {
    /// Nothing outstanding; the next `load_more` requests the following page.
    Idle,
    InFlight(RequestTag),
    /// The last fetch for `page` failed; `retry` or `load_more` re-issues it.
    Failed { page: u32, reason: String },
    /// The last page was shorter than the page size.
    Exhausted,
}

/// The live search position and everything accumulated for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationCursor {
    query: String,
    /// Page most recently requested; `0` before the first request.
    page: u32,
    accumulated: Vec<CatalogProduct>,
    status: CursorStatus,
}

impl PaginationCursor {
    fn new(query: String) -> Self {
        Self {
            query,
            page: 0,
            accumulated: Vec::new(),
            status: CursorStatus::Idle,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn accumulated(&self) -> &[CatalogProduct] {
        &self.accumulated
    }

    #[must_use]
    pub fn status(&self) -> &CursorStatus {
        &self.status
    }

    #[must_use]
    pub fn in_flight(&self) -> bool {
        matches!(self.status, CursorStatus::InFlight(_))
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self.status, CursorStatus::Exhausted)
    }
}

/// One decoded page of search results.
///
/// `received` counts every element the server sent, including any that were
/// dropped while decoding; end-of-results is judged on it, not on
/// `products.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchedPage {
    pub products: Vec<CatalogProduct>,
    pub received: usize,
}

impl FetchedPage {
    #[must_use]
    pub fn new(products: Vec<CatalogProduct>, received: usize) -> Self {
        Self { products, received }
    }
}

impl From<Vec<CatalogProduct>> for FetchedPage {
    fn from(products: Vec<CatalogProduct>) -> Self {
        let received = products.len();
        Self { products, received }
    }
}

/// What applying a page result did to the cursor.
#[derive(Debug)]
pub enum PageOutcome {
    /// A full page was appended; more pages may follow.
    Appended { page: u32, appended: usize },
    /// A short page was appended and the results are exhausted.
    Exhausted { page: u32, appended: usize },
    /// The fetch failed; the cursor keeps its previous results.
    Failed { page: u32, error: CatalogError },
    /// The result belonged to a superseded request and was dropped.
    Stale { tag: RequestTag },
}

#[derive(Debug)]
pub struct SearchPaginator {
    cursor: PaginationCursor,
    page_size: u32,
    next_seq: u64,
}

impl SearchPaginator {
    /// Creates a paginator positioned before the first page of the empty query.
    ///
    /// A `page_size` of zero is raised to one.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            cursor: PaginationCursor::new(String::new()),
            page_size: page_size.max(1),
            next_seq: 0,
        }
    }

    #[must_use]
    pub fn cursor(&self) -> &PaginationCursor {
        &self.cursor
    }

    /// The accumulated catalog for the live query, in arrival order.
    #[must_use]
    pub fn catalog(&self) -> &[CatalogProduct] {
        &self.cursor.accumulated
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Resets the cursor for `query` and requests page 1.
    ///
    /// Any request still in flight for the previous cursor becomes stale.
    pub fn search(&mut self, query: &str) -> PageRequest {
        tracing::debug!(query, "search reset");
        self.cursor = PaginationCursor::new(query.to_owned());
        self.issue(1)
    }

    /// Requests the next page, or `None` when a fetch is in flight or the
    /// results are exhausted. After a failure this re-requests the failed page.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        match &self.cursor.status {
            CursorStatus::InFlight(_) | CursorStatus::Exhausted => None,
            CursorStatus::Failed { page, .. } => {
                let page = *page;
                Some(self.issue(page))
            }
            CursorStatus::Idle => {
                let next = self.cursor.page.saturating_add(1);
                Some(self.issue(next))
            }
        }
    }

    /// Re-issues the failed page. `None` unless the cursor is `Failed`.
    pub fn retry(&mut self) -> Option<PageRequest> {
        match &self.cursor.status {
            CursorStatus::Failed { page, .. } => {
                let page = *page;
                tracing::debug!(query = %self.cursor.query, page, "retrying failed page");
                Some(self.issue(page))
            }
            _ => None,
        }
    }

    /// Applies the result of the request identified by `tag`.
    pub fn apply(
        &mut self,
        tag: RequestTag,
        result: Result<FetchedPage, CatalogError>,
    ) -> PageOutcome {
        let is_live = matches!(&self.cursor.status, CursorStatus::InFlight(live) if *live == tag);
        if !is_live {
            tracing::debug!(
                query = %tag.query,
                page = tag.page,
                seq = tag.seq,
                live_query = %self.cursor.query,
                "dropping stale catalog page"
            );
            return PageOutcome::Stale { tag };
        }

        let page = tag.page;
        match result {
            Ok(FetchedPage { products, received }) => {
                let appended = self.append_unique(products);
                let full_page = usize::try_from(self.page_size).unwrap_or(usize::MAX);
                if received < full_page {
                    self.cursor.status = CursorStatus::Exhausted;
                    PageOutcome::Exhausted { page, appended }
                } else {
                    self.cursor.status = CursorStatus::Idle;
                    PageOutcome::Appended { page, appended }
                }
            }
            Err(error) => {
                tracing::warn!(
                    query = %tag.query,
                    page,
                    error = %error,
                    "catalog page fetch failed"
                );
                self.cursor.status = CursorStatus::Failed {
                    page,
                    reason: error.to_string(),
                };
                PageOutcome::Failed { page, error }
            }
        }
    }

    fn issue(&mut self, page: u32) -> PageRequest {
        self.next_seq += 1;
        let tag = RequestTag {
            query: self.cursor.query.clone(),
            page,
            seq: self.next_seq,
        };
        self.cursor.page = page;
        self.cursor.status = CursorStatus::InFlight(tag.clone());
        PageRequest {
            tag,
            limit: self.page_size,
        }
    }

    /// Appends products whose id is not already accumulated.
    fn append_unique(&mut self, products: Vec<CatalogProduct>) -> usize {
        let mut seen: HashSet<i64> = self.cursor.accumulated.iter().map(|p| p.id).collect();
        let before = self.cursor.accumulated.len();
        for product in products {
            if seen.insert(product.id) {
                self.cursor.accumulated.push(product);
            } else {
                tracing::debug!(product_id = product.id, "skipping duplicate catalog product");
            }
        }
        self.cursor.accumulated.len() - before
    }
}

#[cfg(test)]
#[path = "paginator_test.rs"]
mod tests;
