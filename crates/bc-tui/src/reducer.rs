use ::log::{debug, info};
use bc_api::Resource;
use bc_pager::{Applied, ListItem, PageRequest, Pager};
use std::sync::PoisonError;

use crate::{
    actions::{Action, LoadedPage},
    config::Config,
    effect::Effect,
    state::*,
};

/// Run `$body` with `$pager` bound to the pager of `$screen`
macro_rules! with_pager {
    ($lists:expr, $screen:expr, |$pager:ident| $body:expr) => {
        match $screen {
            Screen::Submissions => {
                let $pager = &mut $lists.submissions;
                $body
            }
            Screen::Scrimmages => {
                let $pager = &mut $lists.scrimmages;
                $body
            }
            Screen::MatchQueue => {
                let $pager = &mut $lists.matches;
                $body
            }
            Screen::Rankings => {
                let $pager = &mut $lists.rankings;
                $body
            }
        }
    };
}

/// Root reducer that delegates to sub-reducers
/// Returns (new_state, effects) following Redux pattern
pub fn reduce(mut state: AppState, action: &Action) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();

    state.ui = ui_reducer(state.ui, action);

    let (lists, list_effects) = lists_reducer(state.lists, action, &state.config);
    state.lists = lists;
    effects.extend(list_effects);

    state.task = task_reducer(state.task, action);
    state.debug_console = debug_console_reducer(state.debug_console, action);

    (state, effects)
}

fn ui_reducer(mut state: UiState, action: &Action) -> UiState {
    match action {
        Action::Quit => {
            state.should_quit = true;
        }
        Action::ToggleShortcuts => {
            state.show_shortcuts = !state.show_shortcuts;
        }
        Action::TickSpinner => {
            state.spinner_frame = (state.spinner_frame + 1) % 10;
        }
        _ => {}
    }
    state
}

/// Pagination reducer. Every page transition that needs data yields a
/// `FetchPage` effect; responses come back as `PageLoaded`.
fn lists_reducer(
    mut state: ListsState,
    action: &Action,
    config: &Config,
) -> (ListsState, Vec<Effect>) {
    let mut effects = Vec::new();

    match action {
        Action::Bootstrap => {
            let screen = state.selected;
            effects.extend(select_screen(&mut state, screen));
        }
        Action::SelectScreen(screen) => {
            effects.extend(select_screen(&mut state, *screen));
        }
        Action::SelectNextScreen => {
            let screen = state.selected.next();
            effects.extend(select_screen(&mut state, screen));
        }
        Action::SelectPreviousScreen => {
            let screen = state.selected.previous();
            effects.extend(select_screen(&mut state, screen));
        }

        Action::NextPage => effects.extend(navigate(&mut state, Nav::Next)),
        Action::PrevPage => effects.extend(navigate(&mut state, Nav::Prev)),
        Action::FirstPage => effects.extend(navigate(&mut state, Nav::First)),
        Action::LastPage => effects.extend(navigate(&mut state, Nav::Last)),
        Action::Refresh => effects.extend(navigate(&mut state, Nav::Refresh)),

        Action::StartSearch => {
            if state.selected == Screen::Rankings {
                state.search_input = Some(state.search.clone());
            }
        }
        Action::SearchInput(c) => {
            if let Some(input) = state.search_input.as_mut() {
                input.push(*c);
            }
        }
        Action::SearchBackspace => {
            if let Some(input) = state.search_input.as_mut() {
                input.pop();
            }
        }
        Action::CancelSearch => {
            state.search_input = None;
        }
        Action::SubmitSearch => {
            if let Some(input) = state.search_input.take() {
                let resource = Resource::rankings(&input);
                state.search = input.trim().to_string();
                info!("Filtering rankings by {:?}", state.search);

                // A changed filter always starts over at page 1
                if let Some(request) = state.rankings.set_resource_key(resource.key()) {
                    state.mounted.insert(Screen::Rankings);
                    effects.push(Effect::FetchPage {
                        screen: Screen::Rankings,
                        request,
                    });
                }
            }
        }

        Action::PageLoaded { request, result } => {
            let screen = result.screen();
            let applied = apply_loaded(&mut state, request, result);

            match applied {
                Applied::Committed => {
                    effects.push(Effect::DispatchAction(Action::SetTaskStatus(None)));
                    if let Some(delay) = config.poll_interval()
                        && has_unfinished(&mut state, screen)
                        && state.poll_scheduled.insert(screen)
                    {
                        effects.push(Effect::SchedulePoll { screen, delay });
                    }
                }
                Applied::Failed => {
                    let message = match result.error() {
                        Some(err) => format!("Failed to load {}: {}", screen.title(), err),
                        None => format!("Failed to load {}", screen.title()),
                    };
                    effects.push(Effect::DispatchAction(Action::SetTaskStatus(Some(
                        TaskStatus {
                            message,
                            status_type: TaskStatusType::Error,
                        },
                    ))));
                }
                Applied::Moved(request) => {
                    effects.push(Effect::FetchPage { screen, request });
                }
                Applied::Stale => {
                    debug!(
                        "Dropped stale response for {} page {}",
                        request.resource_key, request.page
                    );
                }
            }
        }

        Action::PollDue(screen) => {
            state.poll_scheduled.remove(screen);
            // Lists that are not on screen stop polling
            if state.selected == *screen {
                let request = with_pager!(state, *screen, |pager| pager.refresh());
                if let Some(request) = request {
                    effects.push(Effect::FetchPage {
                        screen: *screen,
                        request,
                    });
                }
            }
        }

        _ => {}
    }

    (state, effects)
}

/// Select a screen and request its first page the first time it is shown
fn select_screen(state: &mut ListsState, screen: Screen) -> Option<Effect> {
    state.selected = screen;
    state.search_input = None;

    if !state.mounted.insert(screen) {
        return None;
    }

    let request = with_pager!(state, screen, |pager| pager.refresh())?;
    Some(Effect::FetchPage { screen, request })
}

#[derive(Debug, Clone, Copy)]
enum Nav {
    Next,
    Prev,
    First,
    Last,
    Refresh,
}

impl Nav {
    fn apply<T: Clone>(self, pager: &mut Pager<T>) -> Option<PageRequest> {
        match self {
            Nav::Next => pager.next_page(),
            Nav::Prev => pager.prev_page(),
            Nav::First => pager.first_page(),
            Nav::Last => pager.last_page(),
            Nav::Refresh => pager.refresh(),
        }
    }
}

/// Apply a navigation transition to the pager of the selected screen
fn navigate(state: &mut ListsState, nav: Nav) -> Option<Effect> {
    let screen = state.selected;
    let request = with_pager!(state, screen, |pager| nav.apply(pager))?;
    state.mounted.insert(screen);
    Some(Effect::FetchPage { screen, request })
}

fn apply_loaded(state: &mut ListsState, request: &PageRequest, result: &LoadedPage) -> Applied {
    match result.clone() {
        LoadedPage::Submissions(result) => state.submissions.apply(request, result),
        LoadedPage::Scrimmages(result) => state.scrimmages.apply(request, result),
        LoadedPage::Matches(result) => state.matches.apply(request, result),
        LoadedPage::Rankings(result) => state.rankings.apply(request, result),
    }
}

/// True when the visible page lists entries the backend is still working on
fn has_unfinished(state: &mut ListsState, screen: Screen) -> bool {
    with_pager!(state, screen, |pager| pager
        .items()
        .iter()
        .any(|item| item.status().is_some_and(|status| status.is_in_progress())))
}

fn task_reducer(mut state: TaskState, action: &Action) -> TaskState {
    if let Action::SetTaskStatus(status) = action {
        state.status = status.clone();
    }
    state
}

/// Debug console reducer - handles Quake-style drop-down console
fn debug_console_reducer(mut state: DebugConsoleState, action: &Action) -> DebugConsoleState {
    match action {
        Action::ToggleDebugConsole => {
            state.is_open = !state.is_open;
            if state.is_open && state.auto_scroll {
                state.scroll_offset = 0;
            }
        }
        Action::ScrollDebugConsoleUp => {
            state.scroll_offset = state.scroll_offset.saturating_add(1);
            state.auto_scroll = false;
        }
        Action::ScrollDebugConsoleDown => {
            state.scroll_offset = state.scroll_offset.saturating_sub(1);
            if state.scroll_offset == 0 {
                state.auto_scroll = true;
            }
        }
        Action::ToggleDebugAutoScroll => {
            state.auto_scroll = !state.auto_scroll;
            if state.auto_scroll {
                state.scroll_offset = 0;
            }
        }
        Action::ClearDebugLogs => {
            state
                .logs
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clear();
            state.scroll_offset = 0;
        }
        _ => {}
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use bc_api::{Submission, TeamRanking};
    use bc_pager::{FetchError, Page, StatusCode};

    fn submission(id: u64, status: StatusCode) -> Submission {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "status": status.as_str(),
            "created": "2024-01-10T12:00:00Z",
        }))
        .unwrap()
    }

    fn ranking(id: u64, name: &str) -> TeamRanking {
        serde_json::from_value(serde_json::json!({"id": id, "name": name, "rating": 1200.0}))
            .unwrap()
    }

    fn fetch_request(effects: &[Effect]) -> (Screen, PageRequest) {
        effects
            .iter()
            .find_map(|effect| match effect {
                Effect::FetchPage { screen, request } => Some((*screen, request.clone())),
                _ => None,
            })
            .expect("expected a FetchPage effect")
    }

    fn loaded_submissions(
        state: AppState,
        request: PageRequest,
        items: Vec<Submission>,
        page_limit: u32,
    ) -> (AppState, Vec<Effect>) {
        reduce(
            state,
            &Action::PageLoaded {
                request,
                result: LoadedPage::Submissions(Ok(Page { items, page_limit })),
            },
        )
    }

    fn config_without_polling() -> Config {
        Config {
            poll_interval_secs: 0,
            ..Config::default()
        }
    }

    #[test]
    fn test_bootstrap_mounts_selected_screen() {
        let (state, effects) = reduce(AppState::default(), &Action::Bootstrap);

        let (screen, request) = fetch_request(&effects);
        assert_eq!(screen, Screen::Submissions);
        assert_eq!(request, PageRequest::new("submissions", 1));
        assert!(state.lists.submissions.is_loading());
        assert!(state.lists.mounted.contains(&Screen::Submissions));
    }

    #[test]
    fn test_selecting_mounted_screen_does_not_refetch() {
        let (state, _) = reduce(AppState::default(), &Action::Bootstrap);
        let (state, effects) = reduce(state, &Action::SelectScreen(Screen::Rankings));
        assert_eq!(fetch_request(&effects).1, PageRequest::new("rankings", 1));

        let (state, effects) = reduce(state, &Action::SelectScreen(Screen::Submissions));
        assert!(effects.is_empty());
        assert_eq!(state.lists.selected, Screen::Submissions);
    }

    #[test]
    fn test_next_page_after_load() {
        let (state, effects) = reduce(AppState::default(), &Action::Bootstrap);
        let (_, request) = fetch_request(&effects);
        let (state, _) = loaded_submissions(
            state,
            request,
            vec![submission(1, StatusCode::Success)],
            3,
        );
        assert!(!state.lists.submissions.is_loading());
        assert_eq!(state.lists.submissions.page_limit(), 3);

        let (state, effects) = reduce(state, &Action::NextPage);
        assert_eq!(fetch_request(&effects).1.page, 2);
        assert!(state.lists.submissions.items().is_empty());

        // Repeating while page 2 is in flight is a no-op
        let (state, effects) = reduce(state, &Action::LastPage);
        assert_eq!(fetch_request(&effects).1.page, 3);
        let (_, effects) = reduce(state, &Action::LastPage);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_out_of_order_response_is_dropped() {
        let state = AppState::new(config_without_polling(), Default::default());
        let (state, effects) = reduce(state, &Action::Bootstrap);
        let (_, first) = fetch_request(&effects);
        let (state, _) = loaded_submissions(state, first, vec![], 5);

        let (state, effects) = reduce(state, &Action::NextPage);
        let (_, page2) = fetch_request(&effects);
        let (state, effects) = reduce(state, &Action::Refresh);
        assert!(effects.is_empty(), "page 2 is still loading");

        let (state, effects) = reduce(state, &Action::LastPage);
        let (_, page5) = fetch_request(&effects);

        let (state, _) =
            loaded_submissions(state, page5, vec![submission(50, StatusCode::Success)], 5);
        let (state, effects) =
            loaded_submissions(state, page2, vec![submission(20, StatusCode::Success)], 5);

        assert!(effects.is_empty());
        assert_eq!(state.lists.submissions.current_page(), 5);
        assert_eq!(state.lists.submissions.items()[0].id, 50);
    }

    #[test]
    fn test_shrunk_list_refetches_last_page() {
        let state = AppState::new(config_without_polling(), Default::default());
        let (state, effects) = reduce(state, &Action::Bootstrap);
        let (_, first) = fetch_request(&effects);
        let (state, _) = loaded_submissions(state, first, vec![], 3);

        let (state, effects) = reduce(state, &Action::LastPage);
        let (_, page3) = fetch_request(&effects);
        let (state, effects) = loaded_submissions(state, page3, vec![], 2);

        let (screen, request) = fetch_request(&effects);
        assert_eq!(screen, Screen::Submissions);
        assert_eq!(request, PageRequest::new("submissions", 2));
        assert_eq!(state.lists.submissions.current_page(), 2);
        assert!(state.lists.submissions.is_loading());
    }

    #[test]
    fn test_failure_sets_error_status() {
        let (state, effects) = reduce(AppState::default(), &Action::Bootstrap);
        let (_, request) = fetch_request(&effects);

        let (state, effects) = reduce(
            state,
            &Action::PageLoaded {
                request,
                result: LoadedPage::Submissions(Err(FetchError::Timeout(30))),
            },
        );

        assert!(!state.lists.submissions.is_loading());
        assert!(state.lists.submissions.error().is_some());
        assert!(matches!(
            effects.as_slice(),
            [Effect::DispatchAction(Action::SetTaskStatus(Some(status)))]
                if status.status_type == TaskStatusType::Error
        ));
    }

    #[test]
    fn test_unfinished_entries_schedule_one_poll() {
        let (state, effects) = reduce(AppState::default(), &Action::Bootstrap);
        let (_, request) = fetch_request(&effects);
        let (state, effects) = loaded_submissions(
            state,
            request,
            vec![submission(1, StatusCode::Queued)],
            1,
        );
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::SchedulePoll {
                screen: Screen::Submissions,
                ..
            }
        )));

        // A manual refresh while the poll is pending does not stack another
        let (state, effects) = reduce(state, &Action::Refresh);
        let (_, request) = fetch_request(&effects);
        let (state, effects) = loaded_submissions(
            state,
            request,
            vec![submission(1, StatusCode::Running)],
            1,
        );
        assert!(!effects.iter().any(|e| matches!(e, Effect::SchedulePoll { .. })));

        let (state, effects) = reduce(state, &Action::PollDue(Screen::Submissions));
        assert_eq!(fetch_request(&effects).1.page, 1);
        assert!(state.lists.poll_scheduled.is_empty());
    }

    #[test]
    fn test_finished_entries_do_not_poll() {
        let (state, effects) = reduce(AppState::default(), &Action::Bootstrap);
        let (_, request) = fetch_request(&effects);
        let (_, effects) = loaded_submissions(
            state,
            request,
            vec![submission(1, StatusCode::Success)],
            1,
        );
        assert!(!effects.iter().any(|e| matches!(e, Effect::SchedulePoll { .. })));
    }

    #[test]
    fn test_search_restarts_rankings_at_first_page() {
        let (state, _) = reduce(AppState::default(), &Action::SelectScreen(Screen::Rankings));
        let (state, _) = reduce(
            state,
            &Action::PageLoaded {
                request: PageRequest::new("rankings", 1),
                result: LoadedPage::Rankings(Ok(Page {
                    items: vec![ranking(1, "alpha")],
                    page_limit: 4,
                })),
            },
        );
        let (state, _) = reduce(state, &Action::LastPage);
        let (state, _) = reduce(
            state,
            &Action::PageLoaded {
                request: PageRequest::new("rankings", 4),
                result: LoadedPage::Rankings(Ok(Page {
                    items: vec![ranking(9, "omega")],
                    page_limit: 4,
                })),
            },
        );
        assert_eq!(state.lists.rankings.current_page(), 4);

        let mut state = state;
        for action in [
            Action::StartSearch,
            Action::SearchInput('b'),
            Action::SearchInput('o'),
            Action::SearchInput('x'),
            Action::SearchBackspace,
            Action::SearchInput('t'),
        ] {
            state = reduce(state, &action).0;
        }
        assert_eq!(state.lists.search_input.as_deref(), Some("bot"));

        let (state, effects) = reduce(state, &Action::SubmitSearch);
        assert_eq!(fetch_request(&effects).1, PageRequest::new("rankings?search=bot", 1));
        assert_eq!(state.lists.search, "bot");
        assert_eq!(state.lists.search_input, None);
        assert_eq!(state.lists.rankings.current_page(), 1);
        assert_eq!(state.lists.rankings.page_limit(), 0);

        // The old unfiltered response is dropped
        let (state, _) = reduce(
            state,
            &Action::PageLoaded {
                request: PageRequest::new("rankings", 1),
                result: LoadedPage::Rankings(Ok(Page {
                    items: vec![ranking(1, "alpha")],
                    page_limit: 4,
                })),
            },
        );
        assert!(state.lists.rankings.is_loading());
    }

    #[test]
    fn test_search_only_on_rankings() {
        let (state, _) = reduce(AppState::default(), &Action::StartSearch);
        assert_eq!(state.lists.search_input, None);
    }

    #[test]
    fn test_debug_console_scrolling() {
        let (state, _) = reduce(AppState::default(), &Action::ToggleDebugConsole);
        assert!(state.debug_console.is_open);

        let (state, _) = reduce(state, &Action::ScrollDebugConsoleUp);
        assert_eq!(state.debug_console.scroll_offset, 1);
        assert!(!state.debug_console.auto_scroll);

        let (state, _) = reduce(state, &Action::ScrollDebugConsoleDown);
        assert_eq!(state.debug_console.scroll_offset, 0);
        assert!(state.debug_console.auto_scroll);
    }
}
