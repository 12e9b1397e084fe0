//! A loaded store plus the executor every form submission goes through.

use anyhow::{Context, Result};
use tokio::sync::broadcast::error::TryRecvError;
use tracing::debug;

use taskdeck_core::config::Config;
use taskdeck_core::executor::{Command, CommandOutcome, SimulatedExecutor};
use taskdeck_core::notifier::{Notification, NotificationReceiver};
use taskdeck_core::{ProjectTaskStore, StoreClient};

use crate::output;

pub struct Session {
    client: StoreClient<SimulatedExecutor>,
    toasts: NotificationReceiver,
    recent_limit: usize,
}

impl Session {
    pub fn open(config: &Config) -> Result<Self> {
        let seed = config.load_seed().context("failed to load seed data")?;
        let store = ProjectTaskStore::new(seed).context("seed data is inconsistent")?;
        Ok(Self::new(store, config))
    }

    pub fn new(store: ProjectTaskStore, config: &Config) -> Self {
        let toasts = store.subscribe();
        Self {
            client: StoreClient::new(store, SimulatedExecutor::new(config.latency())),
            toasts,
            recent_limit: config.dashboard.recent_limit,
        }
    }

    pub fn store(&self) -> &ProjectTaskStore {
        self.client.store()
    }

    pub fn store_mut(&mut self) -> &mut ProjectTaskStore {
        self.client.store_mut()
    }

    pub fn recent_limit(&self) -> usize {
        self.recent_limit
    }

    /// Submit a command, showing a spinner while the executor round trip runs.
    pub async fn submit(&mut self, command: Command, message: &str) -> Result<CommandOutcome> {
        let spinner = (!self.client.executor().latency().is_zero()).then(|| output::spinner(message));
        let result = self.client.submit(command).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        Ok(result?)
    }

    /// Hold for the executor latency behind a spinner, for forms that
    /// submit nothing to the store.
    pub async fn simulate(&self, message: &str) {
        let latency = self.client.executor().latency();
        if latency.is_zero() {
            return;
        }
        let spinner = output::spinner(message);
        tokio::time::sleep(latency).await;
        spinner.finish_and_clear();
    }

    /// Notifications published since the last drain, oldest first.
    pub fn take_toasts(&mut self) -> Vec<Notification> {
        let mut toasts = Vec::new();
        loop {
            match self.toasts.try_recv() {
                Ok(notification) => toasts.push(notification),
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!(skipped, "Toast receiver lagged");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        toasts
    }

    /// Print every toast that arrived since the last call.
    pub fn print_toasts(&mut self) {
        for notification in self.take_toasts() {
            output::print_toast(&notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_core::seed::SeedData;
    use taskdeck_core::task::model::{TaskPatch, TaskStatus};

    fn session() -> Session {
        let mut config = Config::default();
        config.executor.latency_ms = 0;
        let store = ProjectTaskStore::new(SeedData::builtin().unwrap()).unwrap();
        Session::new(store, &config)
    }

    #[tokio::test]
    async fn test_submit_updates_store_and_notifies() {
        let mut session = session();
        session
            .submit(
                Command::MoveTask {
                    task_id: "t3".into(),
                    status: TaskStatus::InProgress,
                },
                "Moving task",
            )
            .await
            .unwrap();

        assert_eq!(session.store().get_task("t3").unwrap().status, TaskStatus::InProgress);
        let toasts = session.take_toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].description, "Content migration moved to in progress");
        assert!(session.take_toasts().is_empty());
    }

    #[tokio::test]
    async fn test_edit_with_status_change_delivers_both_toasts_in_order() {
        let mut session = session();
        session
            .submit(
                Command::EditTask {
                    task_id: "t3".into(),
                    patch: TaskPatch {
                        title: Some("Content migration v2".into()),
                        status: Some(TaskStatus::Completed),
                        ..Default::default()
                    },
                },
                "Saving changes",
            )
            .await
            .unwrap();

        let toasts = session.take_toasts();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].description, "Content migration v2 moved to completed");
        assert_eq!(toasts[1].title, "Task Updated");
    }

    #[test]
    fn test_direct_store_mutations_reach_the_subscriber() {
        let mut session = session();
        session.store_mut().toggle_member_status("2").unwrap();
        session.store_mut().toggle_member_status("2").unwrap();
        assert_eq!(session.take_toasts().len(), 2);
    }

    #[test]
    fn test_recent_limit_from_config() {
        assert_eq!(session().recent_limit(), 3);
    }
}
