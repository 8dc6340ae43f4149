use chrono::{DateTime, Utc};
use std::future::Future;
use thiserror::Error;

use crate::status::StatusCode;

/// One page to fetch from a paged list resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageRequest {
    /// Identifies the list and its filters, e.g. `rankings?search=bots`
    pub resource_key: String,
    /// 1-indexed
    pub page: u32,
}

impl PageRequest {
    pub fn new(resource_key: impl Into<String>, page: u32) -> Self {
        Self {
            resource_key: resource_key.into(),
            page,
        }
    }
}

/// A fetched page, normalised so `page_limit` is always known
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_limit: u32,
}

/// Errors from fetching a page. None of them are retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("server returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("unknown resource '{0}'")]
    UnknownResource(String),
}

/// A record shown as one row of a paginated list
pub trait ListItem: Clone + Send + Sync + 'static {
    /// Stable, unique id
    fn id(&self) -> u64;

    fn status(&self) -> Option<&StatusCode> {
        None
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        None
    }
}

/// Source of pages for one item type.
///
/// Implementations make a single attempt per call and report failures
/// instead of returning an empty page.
pub trait PageFetcher: Send + Sync + 'static {
    type Item: ListItem;

    fn fetch_page(
        &self,
        request: PageRequest,
    ) -> impl Future<Output = Result<Page<Self::Item>, FetchError>> + Send;
}
