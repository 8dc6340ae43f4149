use bc_api::{Match, Resource, Scrimmage, Submission, TeamRanking};
use bc_pager::{Pager, PagerConfig};
use std::collections::HashSet;

use crate::{config::Config, theme::Theme};

/// Root application state following Redux pattern
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub ui: UiState,
    pub lists: ListsState,
    pub task: TaskState,
    pub debug_console: DebugConsoleState,
    pub config: Config,
    pub theme: Theme,
}

/// UI-specific state (help panel, spinner, quit flag)
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub show_shortcuts: bool,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

/// One tab per paginated list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Submissions,
    Scrimmages,
    MatchQueue,
    Rankings,
}

impl Screen {
    pub const ALL: [Screen; 4] = [
        Screen::Submissions,
        Screen::Scrimmages,
        Screen::MatchQueue,
        Screen::Rankings,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Submissions => "Submissions",
            Screen::Scrimmages => "Scrimmages",
            Screen::MatchQueue => "Match Queue",
            Screen::Rankings => "Rankings",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Screen::Submissions => 0,
            Screen::Scrimmages => 1,
            Screen::MatchQueue => 2,
            Screen::Rankings => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Screen> {
        Self::ALL.get(index).copied()
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Endpoint listed on this screen, before any search filter
    pub fn resource(&self) -> Resource {
        match self {
            Screen::Submissions => Resource::Submissions,
            Screen::Scrimmages => Resource::Scrimmages,
            Screen::MatchQueue => Resource::MatchQueue,
            Screen::Rankings => Resource::TeamRankings { search: None },
        }
    }
}

/// Pagers for every screen. Each screen owns its pager exclusively.
#[derive(Debug, Clone)]
pub struct ListsState {
    pub selected: Screen,
    /// Screens whose first page was requested
    pub mounted: HashSet<Screen>,
    /// Screens with a pending poll for unfinished entries
    pub poll_scheduled: HashSet<Screen>,
    pub team_id: Option<u64>,
    /// Team name filter applied to the rankings
    pub search: String,
    /// Search being typed (None = not editing)
    pub search_input: Option<String>,
    pub submissions: Pager<Submission>,
    pub scrimmages: Pager<Scrimmage>,
    pub matches: Pager<Match>,
    pub rankings: Pager<TeamRanking>,
}

impl ListsState {
    pub fn new(config: &Config) -> Self {
        let pager_config =
            |screen: Screen| PagerConfig::new(screen.resource().key()).with_page_size(config.page_size);

        Self {
            selected: Screen::default(),
            mounted: HashSet::new(),
            poll_scheduled: HashSet::new(),
            team_id: config.team_id,
            search: String::new(),
            search_input: None,
            submissions: Pager::new(pager_config(Screen::Submissions)),
            scrimmages: Pager::new(pager_config(Screen::Scrimmages)),
            matches: Pager::new(pager_config(Screen::MatchQueue)),
            rankings: Pager::new(pager_config(Screen::Rankings)),
        }
    }

    pub fn is_loading(&self, screen: Screen) -> bool {
        match screen {
            Screen::Submissions => self.submissions.is_loading(),
            Screen::Scrimmages => self.scrimmages.is_loading(),
            Screen::MatchQueue => self.matches.is_loading(),
            Screen::Rankings => self.rankings.is_loading(),
        }
    }

    pub fn any_loading(&self) -> bool {
        Screen::ALL.iter().any(|screen| self.is_loading(*screen))
    }
}

impl Default for ListsState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/// Background task status state
#[derive(Debug, Clone, Default)]
pub struct TaskState {
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskStatus {
    pub message: String,
    pub status_type: TaskStatusType,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaskStatusType {
    Running,
    Success,
    Error,
    Warning,
}

/// Debug console state (Quake-style drop-down console)
#[derive(Debug, Clone)]
pub struct DebugConsoleState {
    pub is_open: bool,
    pub scroll_offset: usize,
    pub auto_scroll: bool,   // Follow new logs as they arrive
    pub height_percent: u16, // Height as percentage of screen
    pub logs: crate::log_capture::LogBuffer,
}

impl Default for DebugConsoleState {
    fn default() -> Self {
        Self {
            is_open: false,
            scroll_offset: 0,
            auto_scroll: true,
            height_percent: 50,
            logs: crate::log_capture::DebugConsoleLogger::create_buffer(),
        }
    }
}

impl AppState {
    pub fn new(config: Config, logs: crate::log_capture::LogBuffer) -> Self {
        Self {
            lists: ListsState::new(&config),
            debug_console: DebugConsoleState {
                logs,
                ..DebugConsoleState::default()
            },
            config,
            ..Self::default()
        }
    }
}
