use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{actions::Action, state::Screen};

/// Shortcut key definition with key matching capability
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key_display: &'static str,
    pub description: &'static str,
    pub action: Action,
    pub matcher: fn(&KeyEvent) -> bool,
}

/// Category of shortcuts
#[derive(Debug, Clone)]
pub struct ShortcutCategory {
    pub name: &'static str,
    pub shortcuts: Vec<Shortcut>,
}

impl Shortcut {
    pub fn matches(&self, key: &KeyEvent) -> bool {
        (self.matcher)(key)
    }
}

/// What currently owns the keyboard, synced from state by the main loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    pub searching: bool,
    pub debug_console_open: bool,
    pub shortcuts_open: bool,
}

fn plain(key: &KeyEvent) -> bool {
    !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// Get all shortcut definitions organized by category
pub fn get_shortcuts() -> Vec<ShortcutCategory> {
    vec![
        ShortcutCategory {
            name: "Screens",
            shortcuts: vec![
                Shortcut {
                    key_display: "Tab",
                    description: "Next list",
                    action: Action::SelectNextScreen,
                    matcher: |key| {
                        key.code == KeyCode::Tab && !key.modifiers.contains(KeyModifiers::SHIFT)
                    },
                },
                Shortcut {
                    key_display: "Shift+Tab",
                    description: "Previous list",
                    action: Action::SelectPreviousScreen,
                    matcher: |key| {
                        key.code == KeyCode::BackTab
                            || (key.code == KeyCode::Tab
                                && key.modifiers.contains(KeyModifiers::SHIFT))
                    },
                },
                Shortcut {
                    key_display: "1-4",
                    description: "Jump to list by number",
                    action: Action::SelectScreen(Screen::Submissions), // Placeholder
                    matcher: |key| matches!(key.code, KeyCode::Char('1'..='4')) && plain(key),
                },
            ],
        },
        ShortcutCategory {
            name: "Pages",
            shortcuts: vec![
                Shortcut {
                    key_display: "n or →",
                    description: "Next page",
                    action: Action::NextPage,
                    matcher: |key| matches!(key.code, KeyCode::Char('n') | KeyCode::Right) && plain(key),
                },
                Shortcut {
                    key_display: "p or ←",
                    description: "Previous page",
                    action: Action::PrevPage,
                    matcher: |key| matches!(key.code, KeyCode::Char('p') | KeyCode::Left) && plain(key),
                },
                Shortcut {
                    key_display: "g",
                    description: "First page",
                    action: Action::FirstPage,
                    matcher: |key| matches!(key.code, KeyCode::Char('g') | KeyCode::Home) && plain(key),
                },
                Shortcut {
                    key_display: "G",
                    description: "Last page",
                    action: Action::LastPage,
                    matcher: |key| matches!(key.code, KeyCode::Char('G') | KeyCode::End) && plain(key),
                },
                Shortcut {
                    key_display: "r",
                    description: "Reload current page",
                    action: Action::Refresh,
                    matcher: |key| key.code == KeyCode::Char('r') && plain(key),
                },
                Shortcut {
                    key_display: "/",
                    description: "Search teams (rankings)",
                    action: Action::StartSearch,
                    matcher: |key| key.code == KeyCode::Char('/') && plain(key),
                },
            ],
        },
        ShortcutCategory {
            name: "General",
            shortcuts: vec![
                Shortcut {
                    key_display: "?",
                    description: "Toggle this help",
                    action: Action::ToggleShortcuts,
                    matcher: |key| key.code == KeyCode::Char('?'),
                },
                Shortcut {
                    key_display: "`",
                    description: "Toggle debug console",
                    action: Action::ToggleDebugConsole,
                    matcher: |key| matches!(key.code, KeyCode::Char('`') | KeyCode::Char('~')),
                },
                Shortcut {
                    key_display: "q or Ctrl+C",
                    description: "Quit",
                    action: Action::Quit,
                    matcher: |key| {
                        (key.code == KeyCode::Char('q') && plain(key))
                            || (key.code == KeyCode::Char('c')
                                && key.modifiers.contains(KeyModifiers::CONTROL))
                    },
                },
            ],
        },
    ]
}

/// Map a key press to an action, given what currently owns the keyboard
pub fn handle_key_event(key: KeyEvent, ctx: KeyContext) -> Action {
    // Search input swallows every printable key
    if ctx.searching {
        return match key.code {
            KeyCode::Esc => Action::CancelSearch,
            KeyCode::Enter => Action::SubmitSearch,
            KeyCode::Backspace => Action::SearchBackspace,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char(c) if plain(&key) => Action::SearchInput(c),
            _ => Action::None,
        };
    }

    if ctx.shortcuts_open {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('x') | KeyCode::Char('q') => {
                Action::ToggleShortcuts
            }
            _ => Action::None,
        };
    }

    if ctx.debug_console_open {
        match key.code {
            KeyCode::Char('`') | KeyCode::Char('~') | KeyCode::Esc => {
                return Action::ToggleDebugConsole;
            }
            KeyCode::Char('j') | KeyCode::Down => return Action::ScrollDebugConsoleDown,
            KeyCode::Char('k') | KeyCode::Up => return Action::ScrollDebugConsoleUp,
            KeyCode::Char('a') => return Action::ToggleDebugAutoScroll,
            KeyCode::Char('c') if plain(&key) => return Action::ClearDebugLogs,
            // Fall through to the general shortcuts
            _ => {}
        }
    }

    find_action_for_key(&key)
}

fn find_action_for_key(key: &KeyEvent) -> Action {
    if let KeyCode::Char(c) = key.code
        && plain(key)
        && let Some(screen) = c
            .to_digit(10)
            .and_then(|d| (d as usize).checked_sub(1))
            .and_then(Screen::from_index)
    {
        return Action::SelectScreen(screen);
    }

    get_shortcuts()
        .into_iter()
        .flat_map(|category| category.shortcuts)
        .find(|shortcut| shortcut.matches(key))
        .map(|shortcut| shortcut.action)
        .unwrap_or(Action::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_page_keys() {
        let ctx = KeyContext::default();
        assert!(matches!(handle_key_event(press(KeyCode::Char('n')), ctx), Action::NextPage));
        assert!(matches!(handle_key_event(press(KeyCode::Right), ctx), Action::NextPage));
        assert!(matches!(handle_key_event(press(KeyCode::Left), ctx), Action::PrevPage));
        assert!(matches!(handle_key_event(press(KeyCode::Char('G')), ctx), Action::LastPage));
        assert!(matches!(handle_key_event(press(KeyCode::Char('r')), ctx), Action::Refresh));
    }

    #[test]
    fn test_digit_selects_screen() {
        let ctx = KeyContext::default();
        assert!(matches!(
            handle_key_event(press(KeyCode::Char('4')), ctx),
            Action::SelectScreen(Screen::Rankings)
        ));
        assert!(matches!(handle_key_event(press(KeyCode::Char('0')), ctx), Action::None));
        assert!(matches!(handle_key_event(press(KeyCode::Char('5')), ctx), Action::None));
    }

    #[test]
    fn test_search_captures_letters() {
        let ctx = KeyContext {
            searching: true,
            ..KeyContext::default()
        };
        assert!(matches!(
            handle_key_event(press(KeyCode::Char('q')), ctx),
            Action::SearchInput('q')
        ));
        assert!(matches!(handle_key_event(press(KeyCode::Enter), ctx), Action::SubmitSearch));
        assert!(matches!(handle_key_event(press(KeyCode::Esc), ctx), Action::CancelSearch));
    }

    #[test]
    fn test_debug_console_keys_fall_through() {
        let ctx = KeyContext {
            debug_console_open: true,
            ..KeyContext::default()
        };
        assert!(matches!(
            handle_key_event(press(KeyCode::Char('k')), ctx),
            Action::ScrollDebugConsoleUp
        ));
        assert!(matches!(handle_key_event(press(KeyCode::Char('n')), ctx), Action::NextPage));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(handle_key_event(key, KeyContext::default()), Action::Quit));
    }
}
