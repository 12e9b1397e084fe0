//! Task creation and edit rules.

pub mod model;

use chrono::{DateTime, Utc};
use model::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};
use uuid::Uuid;

use crate::error::ValidationErrors;
use crate::project::model::Project;
use crate::team::model::TeamMember;
use crate::validation;

/// Minimum description length accepted by the task form.
pub const MIN_DESCRIPTION_CHARS: usize = 5;

/// Validate a new-task submission.
///
/// A due date equal to `now` is accepted; anything earlier is not.
pub fn validate_new_task(
    fields: &NewTask,
    projects: &[Project],
    members: &[TeamMember],
    now: DateTime<Utc>,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    validation::require(&mut errors, "title", &fields.title, "Task title is required");
    validation::min_chars(
        &mut errors,
        "description",
        &fields.description,
        MIN_DESCRIPTION_CHARS,
        "Description must be at least 5 characters",
    );

    match fields.due_date {
        None => errors.add("due_date", "Due date is required"),
        Some(due) if due < now => errors.add("due_date", "Due date cannot be in the past"),
        Some(_) => {}
    }

    if fields.priority.is_none() {
        errors.add("priority", "Please select a priority");
    }

    check_assignee(&mut errors, fields.assignee.as_deref(), members);

    if fields.project_id.trim().is_empty() {
        errors.add("project_id", "Project is required");
    } else if !projects.iter().any(|p| p.id == fields.project_id) {
        errors.add(
            "project_id",
            format!("Project does not exist: {}", fields.project_id),
        );
    }

    errors
}

/// Validate the editable fields a patch touches.
pub fn validate_patch(patch: &TaskPatch, members: &[TeamMember]) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if let Some(title) = &patch.title {
        validation::require(&mut errors, "title", title, "Task title is required");
    }
    if let Some(description) = &patch.description {
        validation::min_chars(
            &mut errors,
            "description",
            description,
            MIN_DESCRIPTION_CHARS,
            "Description must be at least 5 characters",
        );
    }
    if patch.assignee.is_some() {
        check_assignee(&mut errors, patch.assignee.as_deref(), members);
    }

    errors
}

fn check_assignee(errors: &mut ValidationErrors, assignee: Option<&str>, members: &[TeamMember]) {
    match assignee.map(str::trim) {
        None | Some("") => errors.add("assignee", "Assignee is required"),
        Some(id) if !members.iter().any(|m| m.id == id) => {
            errors.add("assignee", format!("Unknown team member: {}", id))
        }
        Some(_) => {}
    }
}

/// Build a task from an already validated submission.
pub(crate) fn build_task(fields: NewTask, now: DateTime<Utc>) -> Task {
    Task {
        id: Uuid::new_v4().to_string(),
        title: fields.title.trim().to_string(),
        description: fields.description,
        status: fields.status.unwrap_or(TaskStatus::Todo),
        priority: fields.priority.unwrap_or(TaskPriority::Medium),
        assignee: fields.assignee.unwrap_or_default().trim().to_string(),
        due_date: fields.due_date.unwrap_or(now),
        created_at: now,
        project_id: fields.project_id,
    }
}

/// Apply an already validated patch. Returns the previous status when the
/// patch changed it.
pub(crate) fn apply_patch(task: &mut Task, patch: TaskPatch) -> Option<TaskStatus> {
    if let Some(title) = patch.title {
        task.title = title.trim().to_string();
    }
    if let Some(description) = patch.description {
        task.description = description;
    }
    if let Some(priority) = patch.priority {
        task.priority = priority;
    }
    if let Some(assignee) = patch.assignee {
        task.assignee = assignee.trim().to_string();
    }
    match patch.status {
        Some(status) if status != task.status => {
            let previous = task.status;
            task.status = status;
            Some(previous)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::model::{ProjectPriority, ProjectStatus};
    use crate::team::model::MemberStatus;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 1, 9, 0, 0).unwrap()
    }

    fn projects() -> Vec<Project> {
        vec![Project {
            id: "1".into(),
            name: "Website Redesign".into(),
            description: "Complete overhaul of the company website".into(),
            status: ProjectStatus::Active,
            priority: ProjectPriority::High,
            progress: 65,
            start_date: None,
            due_date: now() + Duration::days(30),
            created_at: now() - Duration::days(30),
            team_member_ids: vec![],
            tasks: vec![],
        }]
    }

    fn members() -> Vec<TeamMember> {
        vec![TeamMember {
            id: "2".into(),
            name: "Mike Johnson".into(),
            email: "mike.johnson@example.com".into(),
            role: "Full Stack Developer".into(),
            status: MemberStatus::Active,
            joined_at: now(),
            assigned_project_ids: vec!["1".into()],
        }]
    }

    fn valid_fields() -> NewTask {
        NewTask {
            project_id: "1".into(),
            title: "Accessibility audit".into(),
            description: "Check contrast and keyboard navigation".into(),
            due_date: Some(now() + Duration::days(7)),
            priority: Some(TaskPriority::Critical),
            assignee: Some("2".into()),
            status: None,
        }
    }

    #[test]
    fn test_valid_task_has_no_errors() {
        assert!(validate_new_task(&valid_fields(), &projects(), &members(), now()).is_empty());
    }

    #[test]
    fn test_due_date_boundary() {
        let mut fields = valid_fields();
        fields.due_date = Some(now());
        assert!(validate_new_task(&fields, &projects(), &members(), now()).is_empty());

        fields.due_date = Some(now() - Duration::seconds(1));
        let errors = validate_new_task(&fields, &projects(), &members(), now());
        assert_eq!(errors.message_for("due_date"), Some("Due date cannot be in the past"));
    }

    #[test]
    fn test_unknown_project_and_assignee() {
        let mut fields = valid_fields();
        fields.project_id = "42".into();
        fields.assignee = Some("9".into());
        let errors = validate_new_task(&fields, &projects(), &members(), now());
        assert_eq!(errors.message_for("project_id"), Some("Project does not exist: 42"));
        assert_eq!(errors.message_for("assignee"), Some("Unknown team member: 9"));
    }

    #[test]
    fn test_missing_fields_collects_every_message() {
        let fields = NewTask::default();
        let errors = validate_new_task(&fields, &projects(), &members(), now());
        assert_eq!(errors.message_for("title"), Some("Task title is required"));
        assert_eq!(
            errors.message_for("description"),
            Some("Description must be at least 5 characters")
        );
        assert_eq!(errors.message_for("assignee"), Some("Assignee is required"));
        assert_eq!(errors.message_for("project_id"), Some("Project is required"));
        assert_eq!(errors.message_for("due_date"), Some("Due date is required"));
    }

    #[test]
    fn test_patch_validation_only_checks_present_fields() {
        assert!(validate_patch(&TaskPatch::default(), &members()).is_empty());

        let patch = TaskPatch {
            title: Some(String::new()),
            assignee: Some("7".into()),
            ..Default::default()
        };
        let errors = validate_patch(&patch, &members());
        assert_eq!(errors.fields.len(), 2);
    }

    #[test]
    fn test_apply_patch_reports_status_change() {
        let mut task = build_task(valid_fields(), now());
        assert_eq!(task.status, TaskStatus::Todo);

        let previous = apply_patch(
            &mut task,
            TaskPatch {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        );
        assert_eq!(previous, Some(TaskStatus::Todo));

        let unchanged = apply_patch(
            &mut task,
            TaskPatch {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        );
        assert_eq!(unchanged, None);
    }
}
