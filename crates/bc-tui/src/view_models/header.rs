use bc_pager::countdown;
use chrono::{DateTime, Utc};

use crate::state::{AppState, Screen};

/// View model for the tab bar - all presentation data pre-computed
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderViewModel {
    /// Pre-formatted title: "bc24 · team bots"
    pub title: String,
    /// Tab labels: "⏳ 1 Submissions" or "2 Scrimmages"
    pub tabs: Vec<String>,
    pub selected_index: usize,
    /// "Deadline in 2d 03h 04m 05s", "Deadline passed" or nothing
    pub deadline: Option<String>,
}

impl HeaderViewModel {
    pub fn from_state(state: &AppState, now: DateTime<Utc>) -> Self {
        let config = &state.config;

        let title = match (&config.team_name, config.team_id) {
            (Some(name), _) => format!(" {} · team {} ", config.episode, name),
            (None, Some(id)) => format!(" {} · team #{} ", config.episode, id),
            (None, None) => format!(" {} ", config.episode),
        };

        let tabs = Screen::ALL
            .iter()
            .map(|screen| {
                let prefix = if state.lists.is_loading(*screen) {
                    "⏳ "
                } else {
                    ""
                };
                format!("{}{} {}", prefix, screen.index() + 1, screen.title())
            })
            .collect();

        let deadline = config
            .submission_deadline
            .map(|deadline| match countdown(now, deadline) {
                Some(left) => format!("Deadline in {}", left),
                None => "Deadline passed".to_string(),
            });

        Self {
            title,
            tabs,
            selected_index: state.lists.selected.index(),
            deadline,
        }
    }
}
