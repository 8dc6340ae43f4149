//! Paginated list view model for the Battlecode client
//!
//! This crate holds the presentation core shared by every paginated screen
//! (submissions, scrimmages, match queue, team rankings):
//! - Status codes modelled as a closed sum type with a total label mapping
//! - Page limit math and page bounds checks
//! - The `PageFetcher` contract implemented by the network layer
//! - `Pager`, a pure state machine that drops stale page responses
//! - `PagedList`, an async driver running a `Pager` against a fetcher
//!
//! # Example
//!
//! ```rust,ignore
//! use bc_pager::{PagedList, PagerConfig};
//!
//! let list = PagedList::new(fetcher, PagerConfig::new("submissions"), |snapshot| {
//!     println!("page {} of {}", snapshot.current_page, snapshot.page_limit);
//! });
//! list.mount();
//! list.request_page(2);
//! ```

pub mod countdown;
mod fetch;
pub mod pagination;
pub mod ranking;
pub mod status;
mod view_model;

pub use countdown::{Countdown, countdown};
pub use fetch::{FetchError, ListItem, Page, PageFetcher, PageRequest};
pub use pagination::{clamp_page, compute_page_limit, is_in_range};
pub use ranking::display_ranks;
pub use status::{MatchOutcome, Outcome, Side, StatusCode, StatusLabel, Variant, label_for, match_outcome};
pub use view_model::{Applied, PagedList, Pager, PagerConfig, Snapshot};
