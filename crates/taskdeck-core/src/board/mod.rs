//! Kanban board for a single project.
//!
//! Columns are fixed: To Do, In Progress, Done. Dropping a card on a column
//! other than its own moves the task there.

pub mod model;

pub use model::{Board, BoardColumn};

use tracing::debug;

use crate::error::CoreResult;
use crate::store::ProjectTaskStore;
use crate::task::model::{Task, TaskStatus};

/// Build the board for a project.
pub fn get_board(store: &ProjectTaskStore, project_id: &str) -> CoreResult<Board> {
    let project = store.get_project(project_id)?;

    let columns = TaskStatus::ALL
        .iter()
        .map(|status| BoardColumn {
            status: *status,
            title: status.column_title().to_string(),
            tasks: project.tasks_with_status(*status).cloned().collect(),
        })
        .collect();

    Ok(Board {
        project_id: project.id.clone(),
        project_name: project.name.clone(),
        columns,
    })
}

/// Result of a drag-and-drop gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The task changed column.
    Moved(Task),
    /// Dropped back on its own column.
    Unchanged,
}

/// Drop a task card on a column.
pub fn drop_task(
    store: &mut ProjectTaskStore,
    task_id: &str,
    column: TaskStatus,
) -> CoreResult<DropOutcome> {
    let current = store.get_task(task_id)?.status;
    if current == column {
        debug!(task_id, column = %column, "Dropped on its own column");
        return Ok(DropOutcome::Unchanged);
    }
    store.move_task(task_id, column).map(DropOutcome::Moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::seed::SeedData;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn store() -> ProjectTaskStore {
        let now = Utc.with_ymd_and_hms(2024, 11, 25, 12, 0, 0).unwrap();
        ProjectTaskStore::with_clock(SeedData::builtin().unwrap(), Arc::new(FixedClock(now))).unwrap()
    }

    #[test]
    fn test_board_has_three_fixed_columns() {
        let board = get_board(&store(), "1").unwrap();
        let titles: Vec<&str> = board.columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["To Do", "In Progress", "Done"]);
        assert_eq!(board.total_tasks(), 3);
        assert_eq!(board.column(TaskStatus::Completed).unwrap().tasks[0].id, "t1");
        assert_eq!(board.done_percent(), 33);
    }

    #[test]
    fn test_drop_on_other_column_moves_task() {
        let mut store = store();
        let outcome = drop_task(&mut store, "t3", TaskStatus::Completed).unwrap();
        assert!(matches!(outcome, DropOutcome::Moved(ref t) if t.status == TaskStatus::Completed));

        let board = get_board(&store, "1").unwrap();
        assert!(board.column(TaskStatus::Todo).unwrap().tasks.is_empty());
        assert_eq!(board.column(TaskStatus::Completed).unwrap().tasks.len(), 2);
    }

    #[test]
    fn test_drop_on_same_column_is_ignored() {
        let mut store = store();
        let outcome = drop_task(&mut store, "t2", TaskStatus::InProgress).unwrap();
        assert_eq!(outcome, DropOutcome::Unchanged);
        assert_eq!(store.notifications().inbox().count(), 0);
    }

    #[test]
    fn test_board_for_missing_project() {
        assert!(get_board(&store(), "99").is_err());
    }

    #[test]
    fn test_completed_project_board() {
        let board = get_board(&store(), "3").unwrap();
        assert_eq!(board.done_percent(), 100);
        assert_eq!(board.project_name, "Marketing Campaign Q1");
    }
}
