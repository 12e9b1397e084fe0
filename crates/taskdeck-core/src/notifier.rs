//! Change notifications ("toasts") raised by store mutations.
//!
//! Every notification is kept in a bounded inbox (newest first) and
//! published on a broadcast channel so front ends can render it as it
//! happens.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::task::model::TaskStatus;

/// Inbox capacity; older entries are dropped first.
pub const INBOX_CAPACITY: usize = 50;

const CHANNEL_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

/// A single user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

impl Notification {
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind,
            created_at: now,
            read: false,
        }
    }

    /// `"<title> moved to <status>"` as shown after a board drop.
    pub fn task_moved(task_title: &str, status: TaskStatus, now: DateTime<Utc>) -> Self {
        Self::new(
            NotificationKind::Success,
            "Task Updated",
            format!("{} moved to {}", task_title, status.display_name()),
            now,
        )
    }
}

pub type NotificationSender = broadcast::Sender<Notification>;
pub type NotificationReceiver = broadcast::Receiver<Notification>;

/// Inbox plus broadcast fan-out.
#[derive(Debug)]
pub struct Notifier {
    inbox: VecDeque<Notification>,
    tx: NotificationSender,
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            inbox: VecDeque::with_capacity(INBOX_CAPACITY),
            tx,
        }
    }

    /// Record and publish a notification.
    pub fn notify(&mut self, notification: Notification) {
        debug!(
            title = %notification.title,
            description = %notification.description,
            "Notification raised"
        );
        // No subscribers is fine; the inbox still has it.
        let _ = self.tx.send(notification.clone());

        self.inbox.push_front(notification);
        self.inbox.truncate(INBOX_CAPACITY);
    }

    pub fn subscribe(&self) -> NotificationReceiver {
        self.tx.subscribe()
    }

    /// Newest first.
    pub fn inbox(&self) -> impl Iterator<Item = &Notification> {
        self.inbox.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.inbox.front()
    }

    pub fn unread_count(&self) -> usize {
        self.inbox.iter().filter(|n| !n.read).count()
    }

    pub fn mark_all_read(&mut self) {
        for n in &mut self.inbox {
            n.read = true;
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
