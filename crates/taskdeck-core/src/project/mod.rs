//! Project creation rules.

pub mod model;

use chrono::{DateTime, Utc};
use model::{NewProject, Project, ProjectPriority, ProjectStatus};
use uuid::Uuid;

use crate::error::ValidationErrors;
use crate::team::model::TeamMember;
use crate::validation;

/// Minimum description length accepted by the project form.
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// Validate a new-project submission against the known team.
pub fn validate_new_project(fields: &NewProject, members: &[TeamMember]) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    validation::require(&mut errors, "name", &fields.name, "Project name is required");
    validation::min_chars(
        &mut errors,
        "description",
        &fields.description,
        MIN_DESCRIPTION_CHARS,
        "Description must be at least 10 characters",
    );

    if fields.start_date.is_none() {
        errors.add("start_date", "Start date is required");
    }
    match (fields.start_date, fields.end_date) {
        (_, None) => errors.add("end_date", "End date is required"),
        (Some(start), Some(end)) if end < start => {
            errors.add("end_date", "End date cannot be before the start date")
        }
        _ => {}
    }

    if fields.priority.is_none() {
        errors.add("priority", "Please select a priority");
    }
    if fields.status.is_none() {
        errors.add("status", "Please select a status");
    }

    if fields.team_member_ids.is_empty() {
        errors.add("team_members", "At least one team member is required");
    } else if let Some(unknown) = fields
        .team_member_ids
        .iter()
        .find(|id| !members.iter().any(|m| &m.id == *id))
    {
        errors.add("team_members", format!("Unknown team member: {}", unknown));
    }

    errors
}

/// Build a project from an already validated submission.
pub(crate) fn build_project(fields: NewProject, now: DateTime<Utc>) -> Project {
    let mut team_member_ids = Vec::with_capacity(fields.team_member_ids.len());
    for id in fields.team_member_ids {
        if !team_member_ids.contains(&id) {
            team_member_ids.push(id);
        }
    }

    Project {
        id: Uuid::new_v4().to_string(),
        name: fields.name.trim().to_string(),
        description: fields.description,
        status: fields.status.unwrap_or(ProjectStatus::Planning),
        priority: fields.priority.unwrap_or(ProjectPriority::Medium),
        progress: 0,
        start_date: fields.start_date,
        due_date: fields.end_date.unwrap_or(now),
        created_at: now,
        team_member_ids,
        tasks: Vec::new(),
    }
}
