use ::log::{debug, warn};
use bc_pager::{FetchError, ListItem, Page, PageFetcher, PageRequest};
use serde::de::DeserializeOwned;
use std::{marker::PhantomData, num::NonZeroU32, sync::Arc, time::Duration};

use crate::{resource::Resource, session::Session, wire::RawPage};

/// Tunables for the HTTP client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
    /// Page size the backend uses, needed to turn `count` into a page limit
    pub page_size: NonZeroU32,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            page_size: NonZeroU32::new(10).unwrap_or(NonZeroU32::MIN),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Client for the Battlecode list endpoints. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    session: Arc<Session>,
    options: ClientOptions,
}

impl ApiClient {
    pub fn new(session: Session, options: ClientOptions) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent(concat!("bc-tui/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        debug!("API client for {:?} (page size {})", session, options.page_size);

        Ok(Self {
            http,
            session: Arc::new(session),
            options,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn page_size(&self) -> NonZeroU32 {
        self.options.page_size
    }

    /// Typed page source for one item type
    pub fn endpoint<T>(&self) -> Endpoint<T> {
        Endpoint {
            client: self.clone(),
            _item: PhantomData,
        }
    }

    /// Fetch one page. Makes a single attempt.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        request: &PageRequest,
    ) -> Result<Page<T>, FetchError> {
        let resource = Resource::from_key(&request.resource_key)?;
        let url = format!(
            "{}{}",
            self.session.api_url.trim_end_matches('/'),
            resource.path(&self.session)
        );
        let query = resource.query(&self.session, request.page);

        debug!("GET {} {:?}", url, query);

        let mut builder = self.http.get(&url).query(&query);
        if let Some(token) = &self.session.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("GET {} page {} returned {}", url, request.page, status);
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        let raw: RawPage<T> =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(raw.normalize(request.page, self.options.page_size))
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.options.timeout.as_secs())
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// [`ApiClient`] bound to the item type of one list
#[derive(Debug, Clone)]
pub struct Endpoint<T> {
    client: ApiClient,
    _item: PhantomData<fn() -> T>,
}

impl<T> PageFetcher for Endpoint<T>
where
    T: ListItem + DeserializeOwned,
{
    type Item = T;

    async fn fetch_page(&self, request: PageRequest) -> Result<Page<T>, FetchError> {
        self.client.fetch(&request).await
    }
}
