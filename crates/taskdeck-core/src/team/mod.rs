//! Team membership rules.

pub mod model;

use chrono::{DateTime, Utc};
use model::{MemberStatus, NewMember, TeamMember};
use uuid::Uuid;

use crate::error::ValidationErrors;
use crate::validation;

/// Validate the add-user dialog.
pub fn validate_new_member(fields: &NewMember, members: &[TeamMember]) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    validation::require(&mut errors, "name", &fields.name, "Name is required");
    validation::require(&mut errors, "role", &fields.role, "Role is required");

    if fields.email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if !validation::is_valid_email(fields.email.trim()) {
        errors.add("email", "Please enter a valid email address");
    } else if members
        .iter()
        .any(|m| m.email.eq_ignore_ascii_case(fields.email.trim()))
    {
        errors.add("email", "A team member with this email already exists");
    }

    errors
}

pub(crate) fn build_member(fields: NewMember, now: DateTime<Utc>) -> TeamMember {
    TeamMember {
        id: Uuid::new_v4().to_string(),
        name: fields.name.trim().to_string(),
        email: fields.email.trim().to_string(),
        role: fields.role.trim().to_string(),
        status: MemberStatus::Active,
        joined_at: now,
        assigned_project_ids: Vec::new(),
    }
}

/// Members matching a search box term. An empty term matches everyone.
pub fn search<'a>(members: &'a [TeamMember], term: &str) -> Vec<&'a TeamMember> {
    let term = term.trim();
    members
        .iter()
        .filter(|m| term.is_empty() || m.matches(term))
        .collect()
}
