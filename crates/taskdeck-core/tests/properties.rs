//! Property-based tests for dashboard aggregates and store operations.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use taskdeck_core::clock::FixedClock;
use taskdeck_core::dashboard::{compute_dashboard_stats, recent_tasks};
use taskdeck_core::notifier::INBOX_CAPACITY;
use taskdeck_core::project::model::{Project, ProjectPriority, ProjectStatus};
use taskdeck_core::seed::SeedData;
use taskdeck_core::task::model::{Task, TaskPriority, TaskStatus};
use taskdeck_core::ProjectTaskStore;

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

fn status_strategy() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Todo),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Completed),
    ]
}

/// (status, created offset in hours, due offset in hours)
fn task_shape() -> impl Strategy<Value = (TaskStatus, i64, i64)> {
    (status_strategy(), 0i64..1000, -500i64..500)
}

fn build_projects(shapes: &[Vec<(TaskStatus, i64, i64)>]) -> Vec<Project> {
    shapes
        .iter()
        .enumerate()
        .map(|(pi, tasks)| {
            let project_id = format!("p{}", pi);
            Project {
                id: project_id.clone(),
                name: format!("Project {}", pi),
                description: "Generated project".into(),
                status: ProjectStatus::Active,
                priority: ProjectPriority::Medium,
                progress: 0,
                start_date: None,
                due_date: epoch() + Duration::days(90),
                created_at: epoch(),
                team_member_ids: vec!["m1".into()],
                tasks: tasks
                    .iter()
                    .enumerate()
                    .map(|(ti, (status, created, due))| Task {
                        id: format!("{}-t{}", project_id, ti),
                        title: format!("Task {}", ti),
                        description: "Generated task".into(),
                        status: *status,
                        priority: TaskPriority::Medium,
                        assignee: "m1".into(),
                        due_date: epoch() + Duration::hours(*due),
                        created_at: epoch() + Duration::hours(*created),
                        project_id: project_id.clone(),
                    })
                    .collect(),
            }
        })
        .collect()
}

fn seeded_store() -> ProjectTaskStore {
    let now = Utc.with_ymd_and_hms(2024, 11, 25, 12, 0, 0).unwrap();
    ProjectTaskStore::with_clock(SeedData::builtin().unwrap(), Arc::new(FixedClock(now))).unwrap()
}

proptest! {
    #[test]
    fn prop_total_tasks_is_sum_over_projects(
        shapes in prop::collection::vec(prop::collection::vec(task_shape(), 0..8), 0..6)
    ) {
        let projects = build_projects(&shapes);
        let stats = compute_dashboard_stats(&projects, epoch());
        let expected: usize = shapes.iter().map(Vec::len).sum();
        prop_assert_eq!(stats.total_tasks, expected);
        prop_assert!(stats.completed_tasks <= stats.total_tasks);
        prop_assert!(stats.overdue_tasks + stats.completed_tasks <= stats.total_tasks);
        prop_assert!(stats.completion_percent() <= 100);
    }

    #[test]
    fn prop_completion_is_zero_without_tasks(project_count in 0usize..6) {
        let projects = build_projects(&vec![Vec::new(); project_count]);
        let stats = compute_dashboard_stats(&projects, epoch());
        prop_assert_eq!(stats.total_tasks, 0);
        prop_assert_eq!(stats.completion_percent(), 0);
    }

    #[test]
    fn prop_overdue_matches_rule(
        shapes in prop::collection::vec(prop::collection::vec(task_shape(), 0..8), 1..4),
        now_offset in -600i64..600
    ) {
        let now = epoch() + Duration::hours(now_offset);
        let projects = build_projects(&shapes);
        let expected = projects
            .iter()
            .flat_map(|p| p.tasks.iter())
            .filter(|t| now > t.due_date && t.status != TaskStatus::Completed)
            .count();
        prop_assert_eq!(compute_dashboard_stats(&projects, now).overdue_tasks, expected);
    }

    #[test]
    fn prop_recent_tasks_bounded_and_newest_first(
        shapes in prop::collection::vec(prop::collection::vec(task_shape(), 0..8), 0..5),
        n in 0usize..10
    ) {
        let projects = build_projects(&shapes);
        let total: usize = shapes.iter().map(Vec::len).sum();
        let recent = recent_tasks(&projects, n);
        prop_assert_eq!(recent.len(), n.min(total));
        for pair in recent.windows(2) {
            prop_assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn prop_move_task_is_idempotent(
        index in 0usize..12,
        status in status_strategy()
    ) {
        let mut store = seeded_store();
        let task_id = format!("t{}", index + 1);

        store.move_task(&task_id, status).unwrap();
        let after_first = store.notifications().inbox().count();
        store.move_task(&task_id, status).unwrap();

        prop_assert_eq!(store.get_task(&task_id).unwrap().status, status);
        prop_assert_eq!(store.notifications().inbox().count(), after_first);
        prop_assert!(after_first <= 1);
    }

    #[test]
    fn prop_inbox_never_exceeds_capacity(moves in prop::collection::vec((0usize..12, status_strategy()), 0..120)) {
        let mut store = seeded_store();
        for (index, status) in moves {
            store.move_task(&format!("t{}", index + 1), status).unwrap();
        }
        prop_assert!(store.notifications().inbox().count() <= INBOX_CAPACITY);
        prop_assert_eq!(store.all_tasks().len(), 12);
    }
}
