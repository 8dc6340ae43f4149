//! Battlecode REST API client
//!
//! Typed access to the paged list endpoints of the Battlecode backend:
//! submissions, scrimmage history, the match queue and team rankings.
//! The client is built from an explicit [`Session`] and implements
//! [`bc_pager::PageFetcher`] through [`Endpoint`], so each screen can drive a
//! pager with it.
//!
//! # Example
//!
//! ```no_run
//! use bc_api::{ApiClient, ClientOptions, Resource, Session, Submission};
//! use bc_pager::PageRequest;
//!
//! # async fn run() -> Result<(), bc_pager::FetchError> {
//! let session = Session::new("https://api.battlecode.org", "bc24");
//! let client = ApiClient::new(session, ClientOptions::default())?;
//!
//! let request = PageRequest::new(Resource::Submissions.key(), 1);
//! let page = client.fetch::<Submission>(&request).await?;
//! println!("{} submissions on {} pages", page.items.len(), page.page_limit);
//! # Ok(())
//! # }
//! ```

mod client;
mod models;
mod resource;
mod session;
mod wire;

pub use client::{ApiClient, ClientOptions, Endpoint};
pub use models::{Match, Scrimmage, Submission, TeamRanking, TeamRef};
pub use resource::Resource;
pub use session::{Session, TeamIdentity};
pub use wire::RawPage;
