use bc_api::{Match, Scrimmage, Submission, TeamRanking};
use bc_pager::{FetchError, Page, PageRequest};

use crate::state::{Screen, TaskStatus};

/// Action enum - represents all possible actions in the application
/// Actions are dispatched to the reducer to update state
#[derive(Debug, Clone)]
pub enum Action {
    // User-initiated actions
    Bootstrap,
    SelectNextScreen,
    SelectPreviousScreen,
    SelectScreen(Screen),
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    Refresh,
    ToggleShortcuts,

    // Team search (rankings screen)
    StartSearch,
    SearchInput(char),
    SearchBackspace,
    SubmitSearch,
    CancelSearch,

    // State update actions (dispatched internally)
    SetTaskStatus(Option<TaskStatus>),
    TickSpinner, // Increment spinner animation frame

    // Background task completion notifications
    PageLoaded {
        request: PageRequest,
        result: LoadedPage,
    },
    PollDue(Screen), // Periodic refresh of lists with unfinished entries

    // Debug console (Quake-style drop-down)
    ToggleDebugConsole,
    ScrollDebugConsoleUp,
    ScrollDebugConsoleDown,
    ToggleDebugAutoScroll,
    ClearDebugLogs,

    Quit,
    None,
}

/// Result of fetching one page, tagged with the list it belongs to
#[derive(Debug, Clone)]
pub enum LoadedPage {
    Submissions(Result<Page<Submission>, FetchError>),
    Scrimmages(Result<Page<Scrimmage>, FetchError>),
    Matches(Result<Page<Match>, FetchError>),
    Rankings(Result<Page<TeamRanking>, FetchError>),
}

impl LoadedPage {
    pub fn screen(&self) -> Screen {
        match self {
            LoadedPage::Submissions(_) => Screen::Submissions,
            LoadedPage::Scrimmages(_) => Screen::Scrimmages,
            LoadedPage::Matches(_) => Screen::MatchQueue,
            LoadedPage::Rankings(_) => Screen::Rankings,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            LoadedPage::Submissions(result) => result.as_ref().err(),
            LoadedPage::Scrimmages(result) => result.as_ref().err(),
            LoadedPage::Matches(result) => result.as_ref().err(),
            LoadedPage::Rankings(result) => result.as_ref().err(),
        }
    }
}
