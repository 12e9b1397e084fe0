//! Command executor boundary.
//!
//! Every mutation a front end submits is first described as a [`Command`]
//! and handed to a [`CommandExecutor`] before the store applies it. The
//! built-in executors never talk to a backend: one sleeps for a configured
//! latency, the other returns at once. A networked executor can replace them
//! without touching the store.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::error::CoreResult;
use crate::project::model::{NewProject, Project};
use crate::task::model::{NewTask, Subtask, Task, TaskPatch, TaskStatus};
use crate::team::model::{NewMember, TeamMember};

/// Default simulated round trip, matching the demo forms.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

/// A mutation request.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum Command {
    CreateProject(NewProject),
    CreateTask(NewTask),
    EditTask { task_id: String, patch: TaskPatch },
    MoveTask { task_id: String, status: TaskStatus },
    ToggleSubtask { task_id: String, subtask_id: String },
    AddMember(NewMember),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateProject(_) => "create_project",
            Self::CreateTask(_) => "create_task",
            Self::EditTask { .. } => "edit_task",
            Self::MoveTask { .. } => "move_task",
            Self::ToggleSubtask { .. } => "toggle_subtask",
            Self::AddMember(_) => "add_member",
        }
    }
}

/// What an applied command produced.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum CommandOutcome {
    Project(Project),
    Task(Task),
    Subtask(Subtask),
    Member(TeamMember),
}

#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Carry the command to wherever it must go. An error means the command
    /// must not be applied locally.
    async fn dispatch(&self, command: &Command) -> CoreResult<()>;
}

/// Accepts every command after a fixed delay.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedExecutor {
    latency: Duration,
}

impl SimulatedExecutor {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

#[async_trait]
impl CommandExecutor for SimulatedExecutor {
    async fn dispatch(&self, command: &Command) -> CoreResult<()> {
        debug!(command = command.name(), latency_ms = self.latency.as_millis() as u64, "Simulating submit");
        tokio::time::sleep(self.latency).await;
        Ok(())
    }
}

/// Accepts every command immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateExecutor;

#[async_trait]
impl CommandExecutor for ImmediateExecutor {
    async fn dispatch(&self, command: &Command) -> CoreResult<()> {
        debug!(command = command.name(), "Dispatching immediately");
        Ok(())
    }
}
