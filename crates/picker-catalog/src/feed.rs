//! Async driver tying a [`SearchPaginator`] to a [`CatalogSource`].
//!
//! `CatalogFeed` owns the paginator, the scroll debouncer and the set of
//! outstanding fetch tasks. UI-side events (`search`, scroll near bottom,
//! retry) are plain synchronous calls; [`CatalogFeed::next_event`] is the
//! single suspension point where debounce deadlines fire and fetch results
//! are applied in the order they complete.

use std::sync::Arc;
use std::time::Duration;

use picker_core::{CatalogProduct, PickerConfig};
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::debounce::Debouncer;
use crate::error::CatalogError;
use crate::paginator::{FetchedPage, PageOutcome, PageRequest, RequestTag, SearchPaginator};
use crate::source::CatalogSource;

struct PageCompletion {
    tag: RequestTag,
    result: Result<FetchedPage, CatalogError>,
}

pub struct CatalogFeed<S> {
    source: Arc<S>,
    paginator: SearchPaginator,
    debounce: Debouncer,
    fetch_timeout: Duration,
    outstanding: usize,
    completions_tx: mpsc::UnboundedSender<PageCompletion>,
    completions_rx: mpsc::UnboundedReceiver<PageCompletion>,
}

impl<S> std::fmt::Debug for CatalogFeed<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogFeed")
            .field("paginator", &self.paginator)
            .field("debounce", &self.debounce)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("outstanding", &self.outstanding)
            .finish_non_exhaustive()
    }
}

impl<S> CatalogFeed<S>
where
    S: CatalogSource + 'static,
{
    #[must_use]
    pub fn new(
        source: Arc<S>,
        page_size: u32,
        scroll_debounce: Duration,
        fetch_timeout: Duration,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            source,
            paginator: SearchPaginator::new(page_size),
            debounce: Debouncer::new(scroll_debounce),
            fetch_timeout,
            outstanding: 0,
            completions_tx,
            completions_rx,
        }
    }

    #[must_use]
    pub fn from_config(source: Arc<S>, config: &PickerConfig) -> Self {
        Self::new(
            source,
            config.page_size,
            config.scroll_debounce(),
            config.fetch_timeout(),
        )
    }

    #[must_use]
    pub fn paginator(&self) -> &SearchPaginator {
        &self.paginator
    }

    #[must_use]
    pub fn catalog(&self) -> &[CatalogProduct] {
        self.paginator.catalog()
    }

    /// Starts a new search. Pending scroll triggers are discarded.
    ///
    /// Must be called from within a tokio runtime.
    pub fn search(&mut self, query: &str) {
        self.debounce.cancel();
        let request = self.paginator.search(query);
        self.dispatch(request);
    }

    /// Records a scroll-near-bottom event; the page load happens once the
    /// debounce window passes without another event.
    pub fn on_scroll_near_bottom(&mut self) {
        self.debounce.trigger(Instant::now());
    }

    /// Requests the next page immediately. Returns `false` when the
    /// paginator refused (in flight or exhausted).
    pub fn load_more(&mut self) -> bool {
        match self.paginator.load_more() {
            Some(request) => {
                self.dispatch(request);
                true
            }
            None => {
                tracing::debug!(
                    status = ?self.paginator.cursor().status(),
                    "load_more skipped"
                );
                false
            }
        }
    }

    /// Re-issues the last failed page. Returns `false` if nothing failed.
    pub fn retry(&mut self) -> bool {
        match self.paginator.retry() {
            Some(request) => {
                self.dispatch(request);
                true
            }
            None => false,
        }
    }

    /// `true` while a fetch task is outstanding or a debounced load is pending.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.outstanding > 0 || self.debounce.is_pending()
    }

    /// Waits for the next fetch result and applies it.
    ///
    /// Debounced scroll triggers that come due while waiting turn into page
    /// requests. Returns `None` once nothing is outstanding or pending.
    pub async fn next_event(&mut self) -> Option<PageOutcome> {
        loop {
            if !self.is_busy() {
                return None;
            }

            let deadline = self.debounce.deadline();
            tokio::select! {
                Some(done) = self.completions_rx.recv() => {
                    self.outstanding = self.outstanding.saturating_sub(1);
                    return Some(self.paginator.apply(done.tag, done.result));
                }
                () = wait_until(deadline) => {
                    if self.debounce.fire(Instant::now()) {
                        self.load_more();
                    }
                }
            }
        }
    }

    /// Drives the feed until nothing is outstanding, returning every outcome.
    pub async fn settle(&mut self) -> Vec<PageOutcome> {
        let mut outcomes = Vec::new();
        while let Some(outcome) = self.next_event().await {
            outcomes.push(outcome);
        }
        outcomes
    }

    fn dispatch(&mut self, request: PageRequest) {
        let source = Arc::clone(&self.source);
        let tx = self.completions_tx.clone();
        let timeout = self.fetch_timeout;
        self.outstanding += 1;

        tracing::debug!(
            query = request.query(),
            page = request.page(),
            seq = request.tag.seq,
            "dispatching catalog page fetch"
        );

        tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, source.fetch_page(&request)).await {
                Ok(result) => result,
                Err(_) => Err(CatalogError::Timeout {
                    after_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                }),
            };
            // Send fails only once the feed has been dropped.
            let _ = tx.send(PageCompletion {
                tag: request.tag,
                result,
            });
        });
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
