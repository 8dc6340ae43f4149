// Import debug from the log crate using :: prefix
use ::log::{debug, warn};
use bc_api::{ApiClient, Match, Scrimmage, Submission, TeamRanking};
use bc_pager::{PageFetcher, PageRequest};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::{actions::LoadedPage, state::Screen};

/// Background tasks that can be executed asynchronously
#[derive(Debug)]
pub enum BackgroundTask {
    /// Fetch one page of the list shown on `screen`
    FetchPage {
        screen: Screen,
        request: PageRequest,
        client: ApiClient,
    },
    /// Tell the main loop that `screen` is due for a refresh
    Poll(Screen),
    /// Generic delayed task wrapper - delays execution of any task
    DelayedTask {
        task: Box<BackgroundTask>,
        delay: Duration,
    },
}

/// Results sent back from the task worker to the main loop
#[derive(Debug)]
pub enum TaskResult {
    PageLoaded {
        request: PageRequest,
        result: LoadedPage,
    },
    PollDue(Screen),
}

/// Background task worker that keeps network I/O off the UI loop
pub fn start_task_worker(
    mut task_rx: mpsc::UnboundedReceiver<BackgroundTask>,
    result_tx: mpsc::UnboundedSender<TaskResult>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(task) = task_rx.recv().await {
            process_task(task, &result_tx);
        }
    })
}

/// Every task runs in its own tokio task, so several requests for the same
/// list can be in flight and complete in any order.
fn process_task(task: BackgroundTask, result_tx: &mpsc::UnboundedSender<TaskResult>) {
    match task {
        BackgroundTask::FetchPage {
            screen,
            request,
            client,
        } => {
            let result_tx = result_tx.clone();
            tokio::spawn(async move {
                debug!("Fetching {} page {}", request.resource_key, request.page);
                let result = fetch_for(screen, &client, request.clone()).await;

                match result.error() {
                    Some(err) => warn!(
                        "Failed to load {} page {}: {}",
                        request.resource_key, request.page, err
                    ),
                    None => debug!("Loaded {} page {}", request.resource_key, request.page),
                }

                let _ = result_tx.send(TaskResult::PageLoaded { request, result });
            });
        }
        BackgroundTask::Poll(screen) => {
            let _ = result_tx.send(TaskResult::PollDue(screen));
        }
        BackgroundTask::DelayedTask { task, delay } => {
            let result_tx = result_tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                debug!("Delayed task triggered after {:?}", delay);
                process_task(*task, &result_tx);
            });
        }
    }
}

/// Fetch a page with the item type of the list on `screen`
pub async fn fetch_for(screen: Screen, client: &ApiClient, request: PageRequest) -> LoadedPage {
    match screen {
        Screen::Submissions => {
            LoadedPage::Submissions(client.endpoint::<Submission>().fetch_page(request).await)
        }
        Screen::Scrimmages => {
            LoadedPage::Scrimmages(client.endpoint::<Scrimmage>().fetch_page(request).await)
        }
        Screen::MatchQueue => {
            LoadedPage::Matches(client.endpoint::<Match>().fetch_page(request).await)
        }
        Screen::Rankings => {
            LoadedPage::Rankings(client.endpoint::<TeamRanking>().fetch_page(request).await)
        }
    }
}
