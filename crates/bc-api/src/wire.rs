use bc_pager::{Page, compute_page_limit};
use serde::Deserialize;
use std::num::NonZeroU32;

/// A page as sent by the backend.
///
/// Some endpoints report the total item count, others a precomputed page
/// limit. Both are accepted and normalised into [`Page`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawPage<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default, rename = "pageLimit", alias = "page_limit")]
    pub page_limit: Option<u32>,
}

impl<T> RawPage<T> {
    /// Resolve the page limit. A reported `pageLimit` wins over `count`; when
    /// neither is present the limit is inferred from the requested page.
    pub fn normalize(self, requested_page: u32, page_size: NonZeroU32) -> Page<T> {
        let page_limit = match (self.page_limit, self.count) {
            (Some(limit), _) => limit,
            (None, Some(count)) => compute_page_limit(count, page_size),
            (None, None) if self.results.is_empty() => requested_page.saturating_sub(1),
            (None, None) => requested_page,
        };

        Page {
            items: self.results,
            page_limit,
        }
    }
}
