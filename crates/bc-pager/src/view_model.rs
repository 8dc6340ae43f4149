//! Paginated view model
//!
//! [`Pager`] is the state machine: it decides which page requests are issued
//! and which responses may commit. A response commits only if its page and
//! resource key still match what the pager currently shows, so a slow
//! response for a page the user already left is dropped.
//!
//! [`PagedList`] runs a `Pager` against a [`PageFetcher`] on the tokio
//! runtime and reports every state change through a callback.

use ::log::debug;
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;

use crate::fetch::{FetchError, Page, PageFetcher, PageRequest};
use crate::pagination::{clamp_page, is_in_range};

/// Inputs supplied by the screen owning the pager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerConfig {
    pub resource_key: String,
    pub page_size: NonZeroU32,
    pub initial_page: u32,
}

impl PagerConfig {
    pub const DEFAULT_PAGE_SIZE: NonZeroU32 = NonZeroU32::new(10).unwrap();

    pub fn new(resource_key: impl Into<String>) -> Self {
        Self {
            resource_key: resource_key.into(),
            page_size: Self::DEFAULT_PAGE_SIZE,
            initial_page: 1,
        }
    }

    pub fn with_page_size(mut self, page_size: NonZeroU32) -> Self {
        self.page_size = page_size;
        self
    }
}

/// What happened to a response handed to [`Pager::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Committed,
    Failed,
    /// Response belonged to a page or filter no longer shown
    Stale,
    /// The list shrank below the current page. The pager moved to the new
    /// last page and the returned request has to be issued.
    Moved(PageRequest),
}

/// Read-only view of the pager for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub resource_key: String,
    pub current_page: u32,
    pub page_limit: u32,
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
struct Settled<T> {
    page: u32,
    page_limit: Option<u32>,
    items: Vec<T>,
}

impl<T> Settled<T> {
    fn empty(page: u32) -> Self {
        Self {
            page,
            page_limit: None,
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pager<T> {
    resource_key: String,
    page_size: NonZeroU32,
    current_page: u32,
    /// `None` until a response for the current resource key has committed
    page_limit: Option<u32>,
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
    /// Last state not waiting on a response, restored when a fetch fails
    settled: Settled<T>,
}

impl<T: Clone> Pager<T> {
    /// Idle pager on the initial page with nothing fetched yet
    pub fn new(config: PagerConfig) -> Self {
        let initial_page = config.initial_page.max(1);
        Self {
            resource_key: config.resource_key,
            page_size: config.page_size,
            current_page: initial_page,
            page_limit: None,
            items: Vec::new(),
            loading: false,
            error: None,
            settled: Settled::empty(initial_page),
        }
    }

    /// Pager for a freshly mounted screen, already loading its initial page
    pub fn mount(config: PagerConfig) -> (Self, PageRequest) {
        let mut pager = Self::new(config);
        let request = pager.begin(pager.current_page);
        (pager, request)
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Known number of pages, `0` for an empty or not yet fetched list
    pub fn page_limit(&self) -> u32 {
        self.page_limit.unwrap_or(0)
    }

    pub fn is_limit_known(&self) -> bool {
        self.page_limit.is_some()
    }

    pub fn page_size(&self) -> NonZeroU32 {
        self.page_size
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn resource_key(&self) -> &str {
        &self.resource_key
    }

    /// Zero-based position of the first row on the current page
    pub fn offset(&self) -> u64 {
        u64::from(self.current_page.saturating_sub(1)) * u64::from(self.page_size.get())
    }

    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot {
            resource_key: self.resource_key.clone(),
            current_page: self.current_page,
            page_limit: self.page_limit(),
            items: self.items.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }

    /// Move to page `n`. Returns the request to issue, or `None` when the
    /// request is a duplicate of the one in flight or out of range.
    pub fn request_page(&mut self, n: u32) -> Option<PageRequest> {
        if n == self.current_page && self.loading {
            debug!("{}: page {} already loading", self.resource_key, n);
            return None;
        }
        // An empty list still shows page 1
        let in_range = match self.page_limit {
            Some(limit) => is_in_range(n, limit.max(1)),
            None => is_in_range(n, 0),
        };
        if !in_range {
            debug!(
                "{}: ignoring page {} outside 1..={}",
                self.resource_key,
                n,
                self.page_limit()
            );
            return None;
        }

        Some(self.begin(n))
    }

    pub fn next_page(&mut self) -> Option<PageRequest> {
        self.request_page(self.current_page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> Option<PageRequest> {
        self.request_page(self.current_page.saturating_sub(1))
    }

    pub fn first_page(&mut self) -> Option<PageRequest> {
        self.request_page(1)
    }

    pub fn last_page(&mut self) -> Option<PageRequest> {
        let limit = self.page_limit?;
        self.request_page(limit.max(1))
    }

    /// Re-fetch the current page unless it is already loading
    pub fn refresh(&mut self) -> Option<PageRequest> {
        self.request_page(self.current_page)
    }

    /// Switch to another filter of the list, starting over on page 1
    pub fn set_resource_key(&mut self, resource_key: impl Into<String>) -> Option<PageRequest> {
        let resource_key = resource_key.into();
        if resource_key == self.resource_key {
            return None;
        }

        self.resource_key = resource_key;
        self.page_limit = None;
        self.settled = Settled::empty(1);
        Some(self.begin(1))
    }

    /// Apply the outcome of a request previously returned by this pager
    pub fn apply(&mut self, request: &PageRequest, result: Result<Page<T>, FetchError>) -> Applied {
        if request.resource_key != self.resource_key || request.page != self.current_page {
            debug!(
                "Dropping stale response for {} page {} (showing {} page {})",
                request.resource_key, request.page, self.resource_key, self.current_page
            );
            return Applied::Stale;
        }

        match result {
            Ok(page) => {
                debug!(
                    "{}: page {} loaded ({} items, {} pages)",
                    self.resource_key,
                    request.page,
                    page.items.len(),
                    page.page_limit
                );
                self.items = page.items;
                self.page_limit = Some(page.page_limit);
                self.loading = false;
                self.error = None;

                let last = clamp_page(i64::from(self.current_page), page.page_limit);
                if last < self.current_page {
                    debug!(
                        "{}: list shrank to {} pages, moving from page {} to {}",
                        self.resource_key, page.page_limit, self.current_page, last
                    );
                    self.settled = Settled {
                        page: last,
                        page_limit: self.page_limit,
                        items: Vec::new(),
                    };
                    return Applied::Moved(self.begin(last));
                }

                self.settled = Settled {
                    page: self.current_page,
                    page_limit: self.page_limit,
                    items: self.items.clone(),
                };
                Applied::Committed
            }
            Err(err) => {
                debug!("{}: page {} failed: {}", self.resource_key, request.page, err);
                self.current_page = self.settled.page;
                self.page_limit = self.settled.page_limit;
                self.items = self.settled.items.clone();
                self.loading = false;
                self.error = Some(err.to_string());
                Applied::Failed
            }
        }
    }

    fn begin(&mut self, page: u32) -> PageRequest {
        self.current_page = page;
        self.loading = true;
        self.items.clear();
        self.error = None;
        PageRequest::new(self.resource_key.clone(), page)
    }
}

type ChangeCallback<T> = Arc<dyn Fn(Snapshot<T>) + Send + Sync>;

/// A `Pager` wired to a fetcher. Cloning shares the same list.
pub struct PagedList<F: PageFetcher> {
    fetcher: Arc<F>,
    pager: Arc<Mutex<Pager<F::Item>>>,
    on_change: ChangeCallback<F::Item>,
}

impl<F: PageFetcher> Clone for PagedList<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            pager: self.pager.clone(),
            on_change: self.on_change.clone(),
        }
    }
}

impl<F: PageFetcher> PagedList<F> {
    /// `on_change` runs with the list locked, so snapshots arrive in the
    /// order the state changed. It must not call back into the list.
    pub fn new(
        fetcher: Arc<F>,
        config: PagerConfig,
        on_change: impl Fn(Snapshot<F::Item>) + Send + Sync + 'static,
    ) -> Self {
        Self {
            fetcher,
            pager: Arc::new(Mutex::new(Pager::new(config))),
            on_change: Arc::new(on_change),
        }
    }

    /// Load the initial page
    pub fn mount(&self) -> Option<JoinHandle<Applied>> {
        self.update(|pager| pager.refresh())
    }

    pub fn request_page(&self, n: u32) -> Option<JoinHandle<Applied>> {
        self.update(|pager| pager.request_page(n))
    }

    pub fn next_page(&self) -> Option<JoinHandle<Applied>> {
        self.update(Pager::next_page)
    }

    pub fn prev_page(&self) -> Option<JoinHandle<Applied>> {
        self.update(Pager::prev_page)
    }

    pub fn refresh(&self) -> Option<JoinHandle<Applied>> {
        self.update(Pager::refresh)
    }

    pub fn set_resource_key(&self, resource_key: impl Into<String>) -> Option<JoinHandle<Applied>> {
        let resource_key = resource_key.into();
        self.update(move |pager| pager.set_resource_key(resource_key))
    }

    pub fn snapshot(&self) -> Snapshot<F::Item> {
        self.lock().snapshot()
    }

    /// Run a transition and, if it produced a request, spawn the fetch.
    /// Must be called from within a tokio runtime.
    fn update(
        &self,
        transition: impl FnOnce(&mut Pager<F::Item>) -> Option<PageRequest>,
    ) -> Option<JoinHandle<Applied>> {
        let request = {
            let mut pager = self.lock();
            let request = transition(&mut *pager)?;
            (self.on_change)(pager.snapshot());
            request
        };

        Some(self.spawn_fetch(request))
    }

    fn spawn_fetch(&self, request: PageRequest) -> JoinHandle<Applied> {
        let list = self.clone();

        tokio::spawn(async move {
            let result = list.fetcher.fetch_page(request.clone()).await;

            let applied = {
                let mut pager = list.lock();
                let applied = pager.apply(&request, result);
                if applied != Applied::Stale {
                    (list.on_change)(pager.snapshot());
                }
                applied
            };

            if let Applied::Moved(next) = &applied {
                list.spawn_fetch(next.clone());
            }
            applied
        })
    }

    fn lock(&self) -> MutexGuard<'_, Pager<F::Item>> {
        self.pager.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
