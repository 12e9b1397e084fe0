//! Seed data used to initialise a store.
//!
//! The built-in sample workspace is embedded at compile time. Fixtures with
//! the same shape can be loaded from JSON or TOML files; TOML timestamps must
//! be quoted RFC 3339 strings.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::project::model::Project;
use crate::team::model::TeamMember;

const DEFAULT_SEED: &str = include_str!("../../../assets/seed.json");

/// Projects (with nested tasks) and the team they are assigned to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
}

impl SeedData {
    /// The built-in sample workspace: four projects, twelve tasks, four
    /// team members.
    pub fn builtin() -> CoreResult<Self> {
        Self::from_json(DEFAULT_SEED)
    }

    pub fn from_json(json: &str) -> CoreResult<Self> {
        let seed: Self = serde_json::from_str(json)?;
        seed.validate()?;
        Ok(seed)
    }

    pub fn from_toml(text: &str) -> CoreResult<Self> {
        let seed: Self = toml::from_str(text)?;
        seed.validate()?;
        Ok(seed)
    }

    /// Load a fixture, picking the format from the file extension
    /// (`.toml`, anything else is read as JSON).
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        debug!(path = %path.display(), "Loading seed fixture");
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml(&text),
            _ => Self::from_json(&text),
        }
    }

    /// Check ids are unique and every reference resolves.
    pub fn validate(&self) -> CoreResult<()> {
        let mut member_ids = HashSet::new();
        for member in &self.team_members {
            if !member_ids.insert(member.id.as_str()) {
                return Err(CoreError::seed(format!("duplicate team member id '{}'", member.id)));
            }
        }

        let project_ids: HashSet<&str> = self.projects.iter().map(|p| p.id.as_str()).collect();
        if project_ids.len() != self.projects.len() {
            return Err(CoreError::seed("duplicate project id"));
        }

        let mut task_ids = HashSet::new();
        for project in &self.projects {
            if project.progress > 100 {
                return Err(CoreError::seed(format!(
                    "project '{}' has progress {} (must be 0-100)",
                    project.id, project.progress
                )));
            }
            if let Some(id) = project
                .team_member_ids
                .iter()
                .find(|id| !member_ids.contains(id.as_str()))
            {
                return Err(CoreError::seed(format!(
                    "project '{}' references unknown team member '{}'",
                    project.id, id
                )));
            }

            for task in &project.tasks {
                if !task_ids.insert(task.id.as_str()) {
                    return Err(CoreError::seed(format!("duplicate task id '{}'", task.id)));
                }
                if task.project_id != project.id {
                    return Err(CoreError::seed(format!(
                        "task '{}' is listed under project '{}' but points at '{}'",
                        task.id, project.id, task.project_id
                    )));
                }
                if !member_ids.contains(task.assignee.as_str()) {
                    return Err(CoreError::seed(format!(
                        "task '{}' is assigned to unknown team member '{}'",
                        task.id, task.assignee
                    )));
                }
            }
        }

        // Team lists and member assignments are two views of one relation.
        let mut member_links = HashSet::new();
        for member in &self.team_members {
            for project_id in &member.assigned_project_ids {
                if !project_ids.contains(project_id.as_str()) {
                    return Err(CoreError::seed(format!(
                        "team member '{}' is assigned to unknown project '{}'",
                        member.id, project_id
                    )));
                }
                member_links.insert((project_id.as_str(), member.id.as_str()));
            }
        }

        for project in &self.projects {
            for member_id in &project.team_member_ids {
                if !member_links.remove(&(project.id.as_str(), member_id.as_str())) {
                    return Err(CoreError::seed(format!(
                        "project '{}' lists team member '{}' but the member is not assigned to it",
                        project.id, member_id
                    )));
                }
            }
        }
        if let Some(member) = self.team_members.iter().find(|m| {
            m.assigned_project_ids
                .iter()
                .any(|p| member_links.contains(&(p.as_str(), m.id.as_str())))
        }) {
            return Err(CoreError::seed(format!(
                "team member '{}' is assigned to a project whose team does not list them",
                member.id
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::model::TaskStatus;
    use std::io::Write;

    #[test]
    fn test_builtin_seed_shape() {
        let seed = SeedData::builtin().unwrap();
        assert_eq!(seed.projects.len(), 4);
        assert_eq!(seed.team_members.len(), 4);
        assert_eq!(seed.projects.iter().map(|p| p.tasks.len()).sum::<usize>(), 12);

        let website = &seed.projects[0];
        assert_eq!(website.name, "Website Redesign");
        let statuses: Vec<TaskStatus> = website.tasks.iter().map(|t| t.status).collect();
        assert_eq!(
            statuses,
            vec![TaskStatus::Completed, TaskStatus::InProgress, TaskStatus::Todo]
        );
    }

    #[test]
    fn test_rejects_task_under_wrong_project() {
        let mut seed = SeedData::builtin().unwrap();
        seed.projects[0].tasks[0].project_id = "2".into();
        let err = seed.validate().unwrap_err();
        assert!(err.to_string().contains("t1"));
    }

    #[test]
    fn test_rejects_unknown_assignee() {
        let mut seed = SeedData::builtin().unwrap();
        seed.projects[1].tasks[0].assignee = "Sarah Chen".into();
        assert!(matches!(seed.validate(), Err(CoreError::Seed(_))));
    }

    #[test]
    fn test_rejects_duplicate_task_ids() {
        let mut seed = SeedData::builtin().unwrap();
        let dup = seed.projects[0].tasks[0].clone();
        seed.projects[0].tasks.push(dup);
        assert!(seed.validate().is_err());
    }

    #[test]
    fn test_builtin_team_lists_match_assignments() {
        let seed = SeedData::builtin().unwrap();
        for project in &seed.projects {
            for member_id in &project.team_member_ids {
                let member = seed.team_members.iter().find(|m| &m.id == member_id).unwrap();
                assert!(
                    member.assigned_project_ids.contains(&project.id),
                    "project {} lists {} ({})",
                    project.id,
                    member_id,
                    member.name
                );
            }
        }
    }

    #[test]
    fn test_rejects_team_member_missing_assignment() {
        let mut seed = SeedData::builtin().unwrap();
        // Mike stays on project 2's team but loses the assignment.
        seed.team_members[1].assigned_project_ids.retain(|id| id != "2");
        let err = seed.validate().unwrap_err();
        assert!(err.to_string().contains("project '2' lists team member '2'"));
    }

    #[test]
    fn test_rejects_assignment_missing_from_team() {
        let mut seed = SeedData::builtin().unwrap();
        seed.projects[0].team_member_ids.retain(|id| id != "1");
        let err = seed.validate().unwrap_err();
        assert!(err.to_string().contains("team member '1'"));
    }

    #[test]
    fn test_empty_seed_is_valid() {
        let seed = SeedData::from_json("{}").unwrap();
        assert!(seed.projects.is_empty());
        assert!(seed.team_members.is_empty());
    }

    #[test]
    fn test_loads_toml_fixture() {
        let text = r#"
[[team_members]]
id = "m1"
name = "Dana Lee"
email = "dana@example.com"
role = "QA Engineer"
joined_at = "2024-05-01T00:00:00Z"
assigned_project_ids = ["p1"]

[[projects]]
id = "p1"
name = "Release Train"
description = "Quarterly release coordination"
status = "active"
progress = 10
due_date = "2025-06-30T00:00:00Z"
created_at = "2025-01-02T00:00:00Z"
team_member_ids = ["m1"]

[[projects.tasks]]
id = "rt-1"
title = "Freeze branch"
description = "Cut the release branch"
status = "todo"
priority = "critical"
assignee = "m1"
due_date = "2025-03-01T00:00:00Z"
created_at = "2025-01-03T00:00:00Z"
project_id = "p1"
"#;
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(text.as_bytes()).unwrap();

        let seed = SeedData::from_path(file.path()).unwrap();
        assert_eq!(seed.projects[0].tasks[0].id, "rt-1");
        assert_eq!(seed.team_members[0].assigned_projects(), 1);
    }

    #[test]
    fn test_loads_json_fixture_from_path() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(DEFAULT_SEED.as_bytes()).unwrap();
        let seed = SeedData::from_path(file.path()).unwrap();
        assert_eq!(seed.projects.len(), 4);
    }
}
