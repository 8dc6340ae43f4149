use anyhow::{Context, Result};
use bc_api::ApiClient;
use chrono::Utc;
use ratatui::{
    crossterm::{
        self,
        event::{self, Event, KeyEventKind},
    },
    prelude::*,
};
use std::{
    env,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};
use tokio::sync::mpsc;

// Import debug from the log crate using :: prefix
use ::log::{debug, error, info};

use crate::actions::Action;
use crate::config::{Config, TOKEN_VAR};
use crate::effect::execute_effect;
use crate::shortcuts::{KeyContext, handle_key_event};
use crate::state::AppState;
use crate::store::Store;
use crate::task::{BackgroundTask, TaskResult, start_task_worker};
use crate::view_models::{header::HeaderViewModel, list_table::ListTableViewModel};

mod actions;
mod config;
mod effect;
mod log_capture;
mod reducer;
mod shortcuts;
mod state;
mod store;
mod task;
mod theme;
mod view_models;
mod views;

pub struct App {
    // Redux store - centralized state management
    pub store: Store,
    // Communication channels
    pub action_tx: mpsc::UnboundedSender<Action>,
    pub task_tx: mpsc::UnboundedSender<BackgroundTask>,
    pub client: ApiClient,
}

impl App {
    fn new(
        config: Config,
        client: ApiClient,
        action_tx: mpsc::UnboundedSender<Action>,
        task_tx: mpsc::UnboundedSender<BackgroundTask>,
        log_buffer: log_capture::LogBuffer,
    ) -> App {
        App {
            store: Store::new(AppState::new(config, log_buffer)),
            action_tx,
            task_tx,
            client,
        }
    }
}

pub fn initialize_panic_handler() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = shutdown();
        original_hook(panic_info);
    }));
}

fn startup() -> Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(std::io::stderr(), crossterm::terminal::EnterAlternateScreen)?;
    Ok(())
}

fn shutdown() -> Result<()> {
    crossterm::execute!(std::io::stderr(), crossterm::terminal::LeaveAlternateScreen)?;
    crossterm::terminal::disable_raw_mode()?;
    Ok(())
}

/// Load .env if the token is not already in the environment
fn load_env_file() {
    if env::var(TOKEN_VAR).is_ok() {
        return;
    }
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded .env file from: {:?}", path),
        Err(_) => debug!(".env file not found, will rely on environment variables"),
    }
}

fn update(app: &mut App, action: Action) -> Result<()> {
    // Pure Redux/Elm architecture: Dispatch action to reducers, get effects back
    let effects = app.store.dispatch(action);

    for effect in effects {
        for follow_up in execute_effect(app, effect)? {
            // Queue behind whatever is already waiting
            let _ = app.action_tx.send(follow_up);
        }
    }

    Ok(())
}

/// Poll the terminal for key presses on a blocking thread
fn start_event_handler(
    tx: mpsc::UnboundedSender<Action>,
    key_context: Arc<Mutex<KeyContext>>,
) -> tokio::task::JoinHandle<()> {
    let tick_rate = Duration::from_millis(250);

    tokio::task::spawn_blocking(move || {
        loop {
            let action = match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        let ctx = *key_context.lock().unwrap_or_else(PoisonError::into_inner);
                        handle_key_event(key, ctx)
                    }
                    Ok(_) => Action::None,
                    Err(err) => {
                        error!("Failed to read terminal event: {}", err);
                        Action::None
                    }
                },
                Ok(false) => Action::None,
                Err(err) => {
                    error!("Failed to poll terminal events: {}", err);
                    break;
                }
            };

            // Receiver gone means the main loop has exited
            if tx.send(action).is_err() {
                break;
            }
        }
    })
}

/// Convert TaskResult to Action - the single place where task results become actions
fn result_to_action(result: TaskResult) -> Action {
    match result {
        TaskResult::PageLoaded { request, result } => Action::PageLoaded { request, result },
        TaskResult::PollDue(screen) => Action::PollDue(screen),
    }
}

async fn run(config: Config, client: ApiClient, log_buffer: log_capture::LogBuffer) -> Result<()> {
    let mut t = Terminal::new(CrosstermBackend::new(std::io::stderr()))?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel();
    let (task_tx, task_rx) = mpsc::unbounded_channel();
    let (result_tx, mut result_rx) = mpsc::unbounded_channel();

    let mut app = App::new(config, client, action_tx.clone(), task_tx, log_buffer);

    let key_context = Arc::new(Mutex::new(KeyContext::default()));
    let event_task = start_event_handler(action_tx.clone(), key_context.clone());
    let worker_task = start_task_worker(task_rx, result_tx);

    app.action_tx
        .send(Action::Bootstrap)
        .context("Failed to send bootstrap action")?;

    loop {
        // Sync what owns the keyboard for the event handler
        {
            let state = app.store.state();
            *key_context.lock().unwrap_or_else(PoisonError::into_inner) = KeyContext {
                searching: state.lists.search_input.is_some(),
                debug_console_open: state.debug_console.is_open,
                shortcuts_open: state.ui.show_shortcuts,
            };
        }

        t.draw(|f| ui(f, &app))?;

        // Prioritize results over actions so pages show up promptly
        let maybe_action = tokio::time::timeout(Duration::from_millis(100), async {
            tokio::select! {
                biased;
                Some(result) = result_rx.recv() => Some(result_to_action(result)),
                Some(action) = action_rx.recv() => Some(action),
                else => None
            }
        })
        .await;

        match maybe_action {
            Ok(Some(Action::None)) => {}
            Ok(Some(action)) => {
                if let Err(err) = update(&mut app, action) {
                    error!("Error updating app: {}", err);
                    app.store.state_mut().ui.should_quit = true;
                }
            }
            Ok(None) => break, // Channels closed
            Err(_) => {
                // Only animate while a page is in flight
                if app.store.state().lists.any_loading() {
                    let _ = app.action_tx.send(Action::TickSpinner);
                }
            }
        }

        if app.store.state().ui.should_quit {
            break;
        }
    }

    drop(action_rx);
    worker_task.abort();
    let _ = event_task.await;

    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let state = app.store.state();
    let theme = &state.theme;

    let [header_area, table_area, footer_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    let header = HeaderViewModel::from_state(state, Utc::now());
    views::list::render_header(f, header_area, &header, theme);

    let table = ListTableViewModel::from_state(&state.lists, state.ui.spinner_frame);
    views::list::render_table(f, table_area, &table, theme);
    views::list::render_footer(f, footer_area, &table.footer, theme);
    views::list::render_status_bar(f, status_area, state.task.status.as_ref(), theme);

    if let Some(input) = &state.lists.search_input {
        views::list::render_search_prompt(f, table_area, input, theme);
    }

    if state.ui.show_shortcuts {
        views::help::render_shortcuts_panel(f, table_area, theme);
    }

    // Debug console drops down over everything
    if state.debug_console.is_open {
        views::debug_console::render_debug_console(f, f.area(), &state.debug_console, theme);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize debug console logger before anything else
    let log_buffer = log_capture::init_logger().context("Failed to initialize logger")?;

    load_env_file();
    let config = Config::load();
    let token = env::var(TOKEN_VAR).ok();
    if token.is_none() {
        info!("{} not set, requests are unauthenticated", TOKEN_VAR);
    }

    let client = ApiClient::new(config.session(token), config.client_options())
        .context("Failed to build HTTP client")?;

    initialize_panic_handler();
    startup().context("Failed to enter alternate screen")?;
    let result = run(config, client, log_buffer).await;
    shutdown().context("Failed to restore terminal")?;
    result
}
