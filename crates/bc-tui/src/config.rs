use bc_api::{ClientOptions, Session};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{env, num::NonZeroU32, path::PathBuf, time::Duration};

/// Environment variable holding the API token
pub const TOKEN_VAR: &str = "BATTLECODE_TOKEN";

/// Application configuration loaded from bc-tui.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_episode")]
    pub episode: String,
    #[serde(default = "default_page_size")]
    pub page_size: NonZeroU32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Re-fetch lists with queued or running entries this often (0 = off)
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default)]
    pub team_id: Option<u64>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub submission_deadline: Option<DateTime<Utc>>,
}

fn default_api_url() -> String {
    "https://api.battlecode.org".to_string()
}

fn default_episode() -> String {
    "bc24".to_string()
}

fn default_page_size() -> NonZeroU32 {
    NonZeroU32::new(10).unwrap_or(NonZeroU32::MIN)
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_poll_interval_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            episode: default_episode(),
            page_size: default_page_size(),
            request_timeout_secs: default_request_timeout_secs(),
            poll_interval_secs: default_poll_interval_secs(),
            team_id: None,
            team_name: None,
            submission_deadline: None,
        }
    }
}

impl Config {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        const CONFIG_FILE: &str = "bc-tui.toml";

        // Try current directory first
        if let Ok(content) = std::fs::read_to_string(CONFIG_FILE)
            && let Ok(config) = toml::from_str(&content)
        {
            log::debug!("Loaded config from {}", CONFIG_FILE);
            return config;
        }

        // Try home directory
        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home).join(format!(".{}", CONFIG_FILE));
            if let Ok(content) = std::fs::read_to_string(&home_config)
                && let Ok(config) = toml::from_str(&content)
            {
                log::debug!("Loaded config from {}", home_config.display());
                return config;
            }
        }

        log::debug!("Using default config");
        Self::default()
    }

    /// Build the session context handed to the API client
    pub fn session(&self, token: Option<String>) -> Session {
        let mut session = Session::new(&self.api_url, &self.episode);
        if let Some(token) = token {
            session = session.with_token(token);
        }
        if let Some(team_id) = self.team_id {
            session = session.with_team(team_id, self.team_name.clone().unwrap_or_default());
        }
        session
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            page_size: self.page_size,
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn poll_interval(&self) -> Option<Duration> {
        (self.poll_interval_secs > 0).then(|| Duration::from_secs(self.poll_interval_secs))
    }
}
