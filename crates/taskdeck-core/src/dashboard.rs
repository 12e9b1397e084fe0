//! Dashboard aggregates derived from the project list.
//!
//! Everything here is a pure function of the projects passed in and the
//! caller's notion of "now"; nothing is cached.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::project::model::{Project, ProjectStatus};
use crate::store::ProjectTaskStore;
use crate::task::model::{Task, TaskStatus};

/// Number of projects shown in the overview's project list.
pub const OVERVIEW_PROJECTS: usize = 3;

/// Summary tile values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_projects: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub overdue_tasks: usize,
}

impl DashboardStats {
    /// Completed share of all tasks, rounded half up. Zero when there are no
    /// tasks.
    pub fn completion_percent(&self) -> u32 {
        if self.total_tasks == 0 {
            return 0;
        }
        let completed = self.completed_tasks as u64;
        let total = self.total_tasks as u64;
        ((completed * 200 + total) / (2 * total)) as u32
    }
}

/// Every task across `projects`, in project order then task order.
pub fn flatten_tasks(projects: &[Project]) -> Vec<Task> {
    projects.iter().flat_map(|p| p.tasks.iter().cloned()).collect()
}

pub fn compute_dashboard_stats(projects: &[Project], now: DateTime<Utc>) -> DashboardStats {
    let tasks = projects.iter().flat_map(|p| p.tasks.iter());

    let mut stats = DashboardStats {
        total_projects: projects.len(),
        active_projects: projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Active)
            .count(),
        completed_projects: projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Completed)
            .count(),
        ..Default::default()
    };

    for task in tasks {
        stats.total_tasks += 1;
        if task.status == TaskStatus::Completed {
            stats.completed_tasks += 1;
        }
        if task.is_overdue(now) {
            stats.overdue_tasks += 1;
        }
    }

    stats
}

/// Newest tasks first, at most `n`.
///
/// The sort is stable: tasks created at the same instant keep their
/// flattened order.
pub fn recent_tasks(projects: &[Project], n: usize) -> Vec<Task> {
    let mut tasks = flatten_tasks(projects);
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    tasks.truncate(n);
    tasks
}

/// Which dashboard tab is showing. Pure selection state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardView {
    #[default]
    Overview,
    Projects,
    Tasks,
}

impl DashboardView {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Projects => "projects",
            Self::Tasks => "tasks",
        }
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DashboardView {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overview" => Ok(Self::Overview),
            "projects" | "all-projects" => Ok(Self::Projects),
            "tasks" | "all-tasks" => Ok(Self::Tasks),
            _ => Err(CoreError::InvalidValue {
                kind: "dashboard view",
                value: s.to_string(),
            }),
        }
    }
}

/// What the overview tab renders.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub completion_percent: u32,
    pub projects: Vec<Project>,
    pub recent_tasks: Vec<Task>,
}

impl DashboardSnapshot {
    pub fn capture(store: &ProjectTaskStore, recent_limit: usize) -> Self {
        let projects = store.list_projects();
        let stats = compute_dashboard_stats(projects, store.now());
        Self {
            stats,
            completion_percent: stats.completion_percent(),
            projects: projects.iter().take(OVERVIEW_PROJECTS).cloned().collect(),
            recent_tasks: recent_tasks(projects, recent_limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::model::ProjectPriority;
    use crate::task::model::TaskPriority;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn task(id: &str, status: TaskStatus, due: DateTime<Utc>, created: DateTime<Utc>) -> Task {
        Task {
            id: id.into(),
            title: format!("Task {}", id),
            description: "Sample task".into(),
            status,
            priority: TaskPriority::Medium,
            assignee: "1".into(),
            due_date: due,
            created_at: created,
            project_id: "1".into(),
        }
    }

    fn project(id: &str, status: ProjectStatus, tasks: Vec<Task>) -> Project {
        Project {
            id: id.into(),
            name: format!("Project {}", id),
            description: "Sample project".into(),
            status,
            priority: ProjectPriority::Medium,
            progress: 50,
            start_date: None,
            due_date: at(2025, 1, 1),
            created_at: at(2024, 1, 1),
            team_member_ids: vec![],
            tasks,
        }
    }

    fn website_redesign() -> Project {
        project(
            "1",
            ProjectStatus::Active,
            vec![
                task("t1", TaskStatus::Completed, at(2024, 11, 20), at(2024, 10, 5)),
                task("t2", TaskStatus::InProgress, at(2024, 12, 1), at(2024, 10, 10)),
                task("t3", TaskStatus::Todo, at(2024, 12, 10), at(2024, 10, 15)),
            ],
        )
    }

    #[test]
    fn test_website_redesign_stats() {
        let projects = vec![website_redesign()];
        let stats = compute_dashboard_stats(&projects, at(2024, 12, 5));
        assert_eq!(stats.total_projects, 1);
        assert_eq!(stats.active_projects, 1);
        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.completed_tasks, 1);
        // t2 is past due on Dec 5, t3 is not yet.
        assert_eq!(stats.overdue_tasks, 1);
        assert_eq!(stats.completion_percent(), 33);
    }

    #[test]
    fn test_no_tasks_means_zero_percent() {
        let projects = vec![project("1", ProjectStatus::Planning, vec![])];
        let stats = compute_dashboard_stats(&projects, at(2024, 12, 5));
        assert_eq!(stats.total_tasks, 0);
        assert_eq!(stats.completion_percent(), 0);
        assert_eq!(compute_dashboard_stats(&[], at(2024, 1, 1)), DashboardStats::default());
    }

    #[test]
    fn test_completion_rounds_half_up() {
        let stats = DashboardStats {
            total_tasks: 8,
            completed_tasks: 5,
            ..Default::default()
        };
        // 62.5%
        assert_eq!(stats.completion_percent(), 63);
        let stats = DashboardStats {
            total_tasks: 3,
            completed_tasks: 2,
            ..Default::default()
        };
        assert_eq!(stats.completion_percent(), 67);
    }

    #[test]
    fn test_due_exactly_now_is_not_overdue() {
        let projects = vec![website_redesign()];
        let stats = compute_dashboard_stats(&projects, at(2024, 12, 1));
        assert_eq!(stats.overdue_tasks, 0);
        let stats = compute_dashboard_stats(&projects, at(2024, 12, 1) + Duration::seconds(1));
        assert_eq!(stats.overdue_tasks, 1);
    }

    #[test]
    fn test_flatten_keeps_project_then_task_order() {
        let second = project(
            "2",
            ProjectStatus::Completed,
            vec![task("t4", TaskStatus::Todo, at(2025, 1, 1), at(2024, 9, 1))],
        );
        let ids: Vec<String> = flatten_tasks(&[website_redesign(), second])
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["t1", "t2", "t3", "t4"]);
    }

    #[test]
    fn test_recent_tasks_sorted_and_truncated() {
        let projects = vec![website_redesign()];
        let ids: Vec<String> = recent_tasks(&projects, 2).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["t3", "t2"]);
        assert_eq!(recent_tasks(&projects, 10).len(), 3);
        assert!(recent_tasks(&projects, 0).is_empty());
    }

    #[test]
    fn test_recent_tasks_ties_keep_input_order() {
        let same = at(2024, 10, 1);
        let projects = vec![project(
            "1",
            ProjectStatus::Active,
            vec![
                task("a", TaskStatus::Todo, same, same),
                task("b", TaskStatus::Todo, same, same),
                task("c", TaskStatus::Todo, same, same),
            ],
        )];
        let ids: Vec<String> = recent_tasks(&projects, 3).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_view_parsing() {
        assert_eq!("all-tasks".parse::<DashboardView>().unwrap(), DashboardView::Tasks);
        assert_eq!(DashboardView::default(), DashboardView::Overview);
        assert!("kanban".parse::<DashboardView>().is_err());
    }
}
