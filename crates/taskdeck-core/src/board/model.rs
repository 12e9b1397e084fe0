//! Kanban board models.

use serde::{Deserialize, Serialize};

use crate::task::model::{Task, TaskStatus};

/// A project's tasks split into the three fixed status columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub project_id: String,
    pub project_name: String,
    pub columns: Vec<BoardColumn>,
}

impl Board {
    pub fn column(&self, status: TaskStatus) -> Option<&BoardColumn> {
        self.columns.iter().find(|c| c.status == status)
    }

    pub fn total_tasks(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    /// Percentage of tasks in the Done column, rounded down.
    pub fn done_percent(&self) -> usize {
        let total = self.total_tasks();
        if total == 0 {
            return 0;
        }
        let done = self
            .column(TaskStatus::Completed)
            .map_or(0, |c| c.tasks.len());
        done * 100 / total
    }
}

/// One column on the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardColumn {
    pub status: TaskStatus,
    pub title: String,
    pub tasks: Vec<Task>,
}
