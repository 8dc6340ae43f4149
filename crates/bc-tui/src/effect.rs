/// Effect system for Redux architecture
/// Reducers return (State, Vec<Effect>) where Effects describe side effects to perform
/// The update() function executes these effects
// Import debug from the log crate using :: prefix
use ::log::debug;

use crate::{App, actions::Action, state::Screen, task::BackgroundTask};
use anyhow::{Context, Result};
use bc_pager::PageRequest;
use std::time::Duration;

/// Effects that reducers can request to be performed
#[derive(Debug, Clone)]
pub enum Effect {
    /// Fetch one page in the background
    FetchPage { screen: Screen, request: PageRequest },

    /// Refresh `screen` after `delay` because it lists unfinished entries
    SchedulePoll { screen: Screen, delay: Duration },

    /// Dispatch another action
    DispatchAction(Action),
}

/// Execute an effect and return follow-up actions
pub fn execute_effect(app: &mut App, effect: Effect) -> Result<Vec<Action>> {
    let mut follow_up_actions = Vec::new();

    match effect {
        Effect::FetchPage { screen, request } => {
            debug!("Queueing fetch of {} page {}", request.resource_key, request.page);
            app.task_tx
                .send(BackgroundTask::FetchPage {
                    screen,
                    request,
                    client: app.client.clone(),
                })
                .context("task worker stopped")?;
        }

        Effect::SchedulePoll { screen, delay } => {
            debug!("Polling {} again in {:?}", screen.title(), delay);
            app.task_tx
                .send(BackgroundTask::DelayedTask {
                    task: Box::new(BackgroundTask::Poll(screen)),
                    delay,
                })
                .context("task worker stopped")?;
        }

        Effect::DispatchAction(action) => {
            follow_up_actions.push(action);
        }
    }

    Ok(follow_up_actions)
}
