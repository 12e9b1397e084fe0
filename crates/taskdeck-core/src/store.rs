//! The in-memory project/task store.
//!
//! `ProjectTaskStore` is the only owner of projects, tasks, team members and
//! subtask checklists. Callers read through borrowed views and mutate only
//! through the operations below. Each mutation validates in full before it
//! touches anything, so a rejected call leaves the store as it was.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::clock::{self, SharedClock};
use crate::dashboard::{self, DashboardStats};
use crate::error::{CoreError, CoreResult, ValidationErrors};
use crate::executor::{Command, CommandOutcome};
use crate::notifier::{Notification, NotificationKind, NotificationReceiver, Notifier};
use crate::project::{self, model::NewProject, model::Project};
use crate::seed::SeedData;
use crate::task::model::{default_subtasks, NewTask, Subtask, Task, TaskPatch, TaskStatus};
use crate::task;
use crate::team::{self, model::NewMember, model::TeamMember};

/// Shown wherever an assignee id does not resolve.
pub const UNASSIGNED: &str = "Unassigned";

pub struct ProjectTaskStore {
    projects: Vec<Project>,
    members: Vec<TeamMember>,
    subtasks: HashMap<String, Vec<Subtask>>,
    notifier: Notifier,
    clock: SharedClock,
}

impl fmt::Debug for ProjectTaskStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectTaskStore")
            .field("projects", &self.projects.len())
            .field("members", &self.members.len())
            .field("subtask_lists", &self.subtasks.len())
            .finish_non_exhaustive()
    }
}

/// Log and return collected validation errors.
fn reject(operation: &'static str, errors: ValidationErrors) -> CoreResult<()> {
    if !errors.is_empty() {
        warn!(operation, errors = %errors, "Rejected invalid input");
    }
    errors.into_result()
}

impl ProjectTaskStore {
    /// Build a store from seed data using the wall clock.
    pub fn new(seed: SeedData) -> CoreResult<Self> {
        Self::with_clock(seed, clock::system())
    }

    pub fn with_clock(seed: SeedData, clock: SharedClock) -> CoreResult<Self> {
        seed.validate()?;
        info!(
            projects = seed.projects.len(),
            members = seed.team_members.len(),
            "Store initialized"
        );
        Ok(Self {
            projects: seed.projects,
            members: seed.team_members,
            subtasks: HashMap::new(),
            notifier: Notifier::new(),
            clock,
        })
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // ── Reads ──

    /// All projects in insertion order.
    pub fn list_projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn team_members(&self) -> &[TeamMember] {
        &self.members
    }

    pub fn get_project(&self, project_id: &str) -> CoreResult<&Project> {
        self.projects
            .iter()
            .find(|p| p.id == project_id)
            .ok_or_else(|| CoreError::ProjectNotFound(project_id.to_string()))
    }

    pub fn get_task(&self, task_id: &str) -> CoreResult<&Task> {
        let (pi, ti) = self.locate_task(task_id)?;
        Ok(&self.projects[pi].tasks[ti])
    }

    /// The project holding a task.
    pub fn find_task_project(&self, task_id: &str) -> CoreResult<&Project> {
        let (pi, _) = self.locate_task(task_id)?;
        Ok(&self.projects[pi])
    }

    pub fn get_member(&self, member_id: &str) -> CoreResult<&TeamMember> {
        self.members
            .iter()
            .find(|m| m.id == member_id)
            .ok_or_else(|| CoreError::MemberNotFound(member_id.to_string()))
    }

    /// Display name for an assignee id.
    pub fn member_name(&self, member_id: &str) -> &str {
        self.get_member(member_id)
            .map(|m| m.name.as_str())
            .unwrap_or(UNASSIGNED)
    }

    pub fn search_members(&self, term: &str) -> Vec<&TeamMember> {
        team::search(&self.members, term)
    }

    /// Every task, project order then task order.
    pub fn all_tasks(&self) -> Vec<Task> {
        dashboard::flatten_tasks(&self.projects)
    }

    pub fn stats(&self) -> DashboardStats {
        dashboard::compute_dashboard_stats(&self.projects, self.now())
    }

    pub fn recent_tasks(&self, n: usize) -> Vec<Task> {
        dashboard::recent_tasks(&self.projects, n)
    }

    /// One Kanban column of a project.
    pub fn tasks_by_status(&self, project_id: &str, status: TaskStatus) -> CoreResult<Vec<&Task>> {
        Ok(self.get_project(project_id)?.tasks_with_status(status).collect())
    }

    /// Checklist for a task; the demo list until it has been toggled.
    pub fn subtasks(&self, task_id: &str) -> CoreResult<Vec<Subtask>> {
        self.locate_task(task_id)?;
        Ok(self
            .subtasks
            .get(task_id)
            .cloned()
            .unwrap_or_else(default_subtasks))
    }

    pub fn notifications(&self) -> &Notifier {
        &self.notifier
    }

    pub fn mark_notifications_read(&mut self) {
        self.notifier.mark_all_read();
    }

    pub fn subscribe(&self) -> NotificationReceiver {
        self.notifier.subscribe()
    }

    // ── Task mutations ──

    /// Set a task's status. Any status may follow any other; moving to the
    /// current status changes nothing and raises no notification.
    pub fn move_task(&mut self, task_id: &str, status: TaskStatus) -> CoreResult<Task> {
        let now = self.now();
        self.move_task_at(task_id, status, now)
    }

    fn move_task_at(&mut self, task_id: &str, status: TaskStatus, now: DateTime<Utc>) -> CoreResult<Task> {
        let (pi, ti) = self.locate_task(task_id)?;
        let task = &mut self.projects[pi].tasks[ti];

        if task.status == status {
            debug!(task_id, status = %status, "Task already in target status");
            return Ok(task.clone());
        }

        let previous = task.status;
        task.status = status;
        let updated = task.clone();

        info!(task_id, from = %previous, to = %status, "Task moved");
        self.notifier
            .notify(Notification::task_moved(&updated.title, status, now));
        Ok(updated)
    }

    /// Create a task under an existing project.
    pub fn create_task(&mut self, fields: NewTask) -> CoreResult<Task> {
        let now = self.now();
        self.create_task_at(fields, now)
    }

    fn create_task_at(&mut self, fields: NewTask, now: DateTime<Utc>) -> CoreResult<Task> {
        reject(
            "create_task",
            task::validate_new_task(&fields, &self.projects, &self.members, now),
        )?;

        let created = task::build_task(fields, now);
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == created.project_id)
            .ok_or_else(|| CoreError::ProjectNotFound(created.project_id.clone()))?;
        project.tasks.push(created.clone());

        info!(task_id = %created.id, project_id = %created.project_id, "Task created");
        self.notifier.notify(Notification::new(
            NotificationKind::Success,
            "Task Created",
            format!("{} has been successfully created!", created.title),
            now,
        ));
        Ok(created)
    }

    /// Patch the editable fields of a task.
    pub fn edit_task(&mut self, task_id: &str, patch: TaskPatch) -> CoreResult<Task> {
        let now = self.now();
        self.edit_task_at(task_id, patch, now)
    }

    fn edit_task_at(&mut self, task_id: &str, patch: TaskPatch, now: DateTime<Utc>) -> CoreResult<Task> {
        let (pi, ti) = self.locate_task(task_id)?;
        reject("edit_task", task::validate_patch(&patch, &self.members))?;

        let target = &mut self.projects[pi].tasks[ti];
        let previous_status = task::apply_patch(target, patch);
        let updated = target.clone();

        info!(task_id, "Task edited");
        if previous_status.is_some() {
            self.notifier
                .notify(Notification::task_moved(&updated.title, updated.status, now));
        }
        self.notifier.notify(Notification::new(
            NotificationKind::Success,
            "Task Updated",
            "Your changes have been saved successfully.",
            now,
        ));
        Ok(updated)
    }

    /// Flip one checklist item on a task's detail page.
    pub fn toggle_subtask(&mut self, task_id: &str, subtask_id: &str) -> CoreResult<Subtask> {
        let now = self.now();
        self.toggle_subtask_at(task_id, subtask_id, now)
    }

    fn toggle_subtask_at(
        &mut self,
        task_id: &str,
        subtask_id: &str,
        now: DateTime<Utc>,
    ) -> CoreResult<Subtask> {
        let current = self.subtasks(task_id)?;
        if !current.iter().any(|s| s.id == subtask_id) {
            return Err(CoreError::SubtaskNotFound {
                task_id: task_id.to_string(),
                subtask_id: subtask_id.to_string(),
            });
        }

        let list = self.subtasks.entry(task_id.to_string()).or_insert(current);
        let Some(subtask) = list.iter_mut().find(|s| s.id == subtask_id) else {
            return Err(CoreError::SubtaskNotFound {
                task_id: task_id.to_string(),
                subtask_id: subtask_id.to_string(),
            });
        };
        subtask.completed = !subtask.completed;
        let toggled = subtask.clone();

        debug!(task_id, subtask_id, completed = toggled.completed, "Subtask toggled");
        self.notifier.notify(Notification::new(
            NotificationKind::Info,
            "Subtask Updated",
            "Subtask status has been changed.",
            now,
        ));
        Ok(toggled)
    }

    // ── Project mutations ──

    /// Create an empty project and record it on each member's assignments.
    pub fn create_project(&mut self, fields: NewProject) -> CoreResult<Project> {
        let now = self.now();
        self.create_project_at(fields, now)
    }

    fn create_project_at(&mut self, fields: NewProject, now: DateTime<Utc>) -> CoreResult<Project> {
        reject(
            "create_project",
            project::validate_new_project(&fields, &self.members),
        )?;

        let project = project::build_project(fields, now);
        for member in self
            .members
            .iter_mut()
            .filter(|m| project.team_member_ids.contains(&m.id))
        {
            member.assigned_project_ids.push(project.id.clone());
        }
        self.projects.push(project.clone());

        info!(project_id = %project.id, name = %project.name, "Project created");
        self.notifier.notify(Notification::new(
            NotificationKind::Success,
            "Project Created",
            format!("{} has been successfully created!", project.name),
            now,
        ));
        Ok(project)
    }

    // ── Team mutations ──

    pub fn add_member(&mut self, fields: NewMember) -> CoreResult<TeamMember> {
        let now = self.now();
        self.add_member_at(fields, now)
    }

    fn add_member_at(&mut self, fields: NewMember, now: DateTime<Utc>) -> CoreResult<TeamMember> {
        reject("add_member", team::validate_new_member(&fields, &self.members))?;

        let member = team::build_member(fields, now);
        self.members.push(member.clone());

        info!(member_id = %member.id, "Team member added");
        self.notifier.notify(Notification::new(
            NotificationKind::Success,
            "User Added",
            format!("{} has been successfully added to the team.", member.name),
            now,
        ));
        Ok(member)
    }

    /// Remove a member who has no tasks assigned.
    pub fn remove_member(&mut self, member_id: &str) -> CoreResult<TeamMember> {
        let index = self
            .members
            .iter()
            .position(|m| m.id == member_id)
            .ok_or_else(|| CoreError::MemberNotFound(member_id.to_string()))?;

        let assigned = self
            .projects
            .iter()
            .flat_map(|p| p.tasks.iter())
            .filter(|t| t.assignee == member_id)
            .count();
        if assigned > 0 {
            warn!(member_id, tasks = assigned, "Refusing to remove assigned member");
            return Err(CoreError::MemberInUse {
                member: self.members[index].name.clone(),
                tasks: assigned,
            });
        }

        let member = self.members.remove(index);
        for project in &mut self.projects {
            project.team_member_ids.retain(|id| id != member_id);
        }

        info!(member_id, "Team member removed");
        let now = self.now();
        self.notifier.notify(Notification::new(
            NotificationKind::Info,
            "User Removed",
            format!("{} has been removed from the team.", member.name),
            now,
        ));
        Ok(member)
    }

    /// Flip a member between active and inactive.
    pub fn toggle_member_status(&mut self, member_id: &str) -> CoreResult<TeamMember> {
        let now = self.now();
        let member = self
            .members
            .iter_mut()
            .find(|m| m.id == member_id)
            .ok_or_else(|| CoreError::MemberNotFound(member_id.to_string()))?;
        member.status = member.status.toggled();
        let updated = member.clone();

        info!(member_id, status = %updated.status, "Team member status changed");
        self.notifier.notify(Notification::new(
            NotificationKind::Info,
            "Status Updated",
            format!("{} is now {}.", updated.name, updated.status),
            now,
        ));
        Ok(updated)
    }

    // ── Commands ──

    /// Validate a command without applying it.
    pub fn check(&self, command: &Command) -> CoreResult<()> {
        self.check_at(command, self.now())
    }

    pub(crate) fn check_at(&self, command: &Command, now: DateTime<Utc>) -> CoreResult<()> {
        match command {
            Command::CreateProject(fields) => reject(
                "create_project",
                project::validate_new_project(fields, &self.members),
            ),
            Command::CreateTask(fields) => reject(
                "create_task",
                task::validate_new_task(fields, &self.projects, &self.members, now),
            ),
            Command::EditTask { task_id, patch } => {
                self.locate_task(task_id)?;
                reject("edit_task", task::validate_patch(patch, &self.members))
            }
            Command::MoveTask { task_id, .. } => self.locate_task(task_id).map(|_| ()),
            Command::ToggleSubtask { task_id, subtask_id } => {
                if self.subtasks(task_id)?.iter().any(|s| &s.id == subtask_id) {
                    Ok(())
                } else {
                    Err(CoreError::SubtaskNotFound {
                        task_id: task_id.clone(),
                        subtask_id: subtask_id.clone(),
                    })
                }
            }
            Command::AddMember(fields) => {
                reject("add_member", team::validate_new_member(fields, &self.members))
            }
        }
    }

    /// Apply a command with the current time.
    pub fn apply(&mut self, command: Command) -> CoreResult<CommandOutcome> {
        let now = self.now();
        self.apply_at(command, now)
    }

    /// Apply a command as of `now`, the moment it was submitted.
    pub(crate) fn apply_at(&mut self, command: Command, now: DateTime<Utc>) -> CoreResult<CommandOutcome> {
        match command {
            Command::CreateProject(fields) => {
                self.create_project_at(fields, now).map(CommandOutcome::Project)
            }
            Command::CreateTask(fields) => self.create_task_at(fields, now).map(CommandOutcome::Task),
            Command::EditTask { task_id, patch } => {
                self.edit_task_at(&task_id, patch, now).map(CommandOutcome::Task)
            }
            Command::MoveTask { task_id, status } => {
                self.move_task_at(&task_id, status, now).map(CommandOutcome::Task)
            }
            Command::ToggleSubtask { task_id, subtask_id } => self
                .toggle_subtask_at(&task_id, &subtask_id, now)
                .map(CommandOutcome::Subtask),
            Command::AddMember(fields) => self.add_member_at(fields, now).map(CommandOutcome::Member),
        }
    }

    fn locate_task(&self, task_id: &str) -> CoreResult<(usize, usize)> {
        self.projects
            .iter()
            .enumerate()
            .find_map(|(pi, p)| p.tasks.iter().position(|t| t.id == task_id).map(|ti| (pi, ti)))
            .ok_or_else(|| CoreError::TaskNotFound(task_id.to_string()))
    }
}
