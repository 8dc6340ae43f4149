use std::fmt;

/// Identity of the team the user plays for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamIdentity {
    pub id: u64,
    pub name: String,
}

/// Everything the client needs to know about the logged-in user.
///
/// Built once at startup and passed to the client; nothing below reads
/// cookies, files or environment variables on its own.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    /// Backend root, e.g. `https://api.battlecode.org`
    pub api_url: String,
    /// Episode (season) slug, e.g. `bc24`
    pub episode: String,
    pub token: Option<String>,
    pub team: Option<TeamIdentity>,
}

impl Session {
    pub fn new(api_url: impl Into<String>, episode: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            episode: episode.into(),
            token: None,
            team: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_team(mut self, id: u64, name: impl Into<String>) -> Self {
        self.team = Some(TeamIdentity {
            id,
            name: name.into(),
        });
        self
    }

    pub fn team_id(&self) -> Option<u64> {
        self.team.as_ref().map(|team| team.id)
    }
}

// Keep the token out of logs
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("api_url", &self.api_url)
            .field("episode", &self.episode)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("team", &self.team)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new("http://localhost", "bc24").with_token("s3cr3t");
        let printed = format!("{:?}", session);
        assert!(!printed.contains("s3cr3t"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_team_id() {
        let session = Session::new("http://localhost", "bc24");
        assert_eq!(session.team_id(), None);
        assert_eq!(session.with_team(42, "bots").team_id(), Some(42));
    }
}
