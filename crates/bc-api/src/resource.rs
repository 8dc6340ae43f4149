use bc_pager::FetchError;

use crate::session::Session;

const SEARCH_MARKER: &str = "?search=";

/// Paged list endpoints of the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// Submissions of the user's team
    Submissions,
    /// Scrimmage history of the user's team
    Scrimmages,
    /// Matches waiting for or being run
    MatchQueue,
    /// All teams ordered by rating, optionally filtered by name
    TeamRankings { search: Option<String> },
}

impl Resource {
    /// Resource key used by the pager. The key includes filters, so two
    /// requests for the same page with different filters never match.
    pub fn key(&self) -> String {
        match self {
            Resource::Submissions => "submissions".to_string(),
            Resource::Scrimmages => "scrimmages".to_string(),
            Resource::MatchQueue => "matches".to_string(),
            Resource::TeamRankings { search: None } => "rankings".to_string(),
            Resource::TeamRankings {
                search: Some(search),
            } => format!("rankings{}{}", SEARCH_MARKER, search),
        }
    }

    pub fn from_key(key: &str) -> Result<Self, FetchError> {
        match key {
            "submissions" => Ok(Resource::Submissions),
            "scrimmages" => Ok(Resource::Scrimmages),
            "matches" => Ok(Resource::MatchQueue),
            "rankings" => Ok(Resource::TeamRankings { search: None }),
            _ => match key.split_once(SEARCH_MARKER) {
                Some(("rankings", search)) => Ok(Resource::rankings(search)),
                _ => Err(FetchError::UnknownResource(key.to_string())),
            },
        }
    }

    /// Rankings filtered by `search`; blank searches mean no filter
    pub fn rankings(search: &str) -> Self {
        let search = search.trim();
        Resource::TeamRankings {
            search: (!search.is_empty()).then(|| search.to_string()),
        }
    }

    /// Path below the API root
    pub fn path(&self, session: &Session) -> String {
        let episode = &session.episode;
        match self {
            Resource::Submissions => format!("/api/compete/{}/submission/", episode),
            Resource::Scrimmages => format!("/api/compete/{}/match/scrimmage/", episode),
            Resource::MatchQueue => format!("/api/compete/{}/match/", episode),
            Resource::TeamRankings { .. } => format!("/api/team/{}/t/", episode),
        }
    }

    /// Query parameters for `page`
    pub fn query(&self, session: &Session, page: u32) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();

        match self {
            Resource::Scrimmages => {
                if let Some(team_id) = session.team_id() {
                    query.push(("team_id", team_id.to_string()));
                }
            }
            Resource::TeamRankings { search } => {
                query.push(("ordering", "-rating,name".to_string()));
                if let Some(search) = search {
                    query.push(("search", search.clone()));
                }
            }
            Resource::Submissions | Resource::MatchQueue => {}
        }

        query.push(("page", page.to_string()));
        query
    }
}
