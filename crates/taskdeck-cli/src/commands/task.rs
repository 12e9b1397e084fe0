//! Task management commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use dialoguer::Input;

use taskdeck_core::executor::{Command, CommandOutcome};
use taskdeck_core::task::model::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};

use super::parse_date;
use crate::output;
use crate::session::Session;

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks, optionally for one project or status
    List {
        /// Only tasks of this project
        #[arg(short, long)]
        project: Option<String>,

        /// Only tasks with this status (todo, in-progress, completed)
        #[arg(short, long)]
        status: Option<TaskStatus>,
    },

    /// Show task details and subtasks
    Show {
        /// Task ID
        task_id: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new task
    New(NewTaskArgs),

    /// Move a task to a different status
    Move(MoveTaskArgs),

    /// Edit a task's title, description, status, priority or assignee
    Edit(EditTaskArgs),

    /// List a task's subtasks
    Subtasks {
        /// Task ID
        task_id: String,
    },

    /// Check or uncheck a subtask
    ToggleSubtask {
        /// Task ID
        task_id: String,

        /// Subtask ID
        subtask_id: String,
    },
}

#[derive(Args)]
pub struct NewTaskArgs {
    /// Task title
    pub title: Option<String>,

    /// Project ID
    #[arg(short, long)]
    pub project: String,

    /// Task description (at least 5 characters)
    #[arg(short, long)]
    pub description: Option<String>,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,

    /// Priority (low, medium, high, critical)
    #[arg(long)]
    pub priority: Option<TaskPriority>,

    /// Assignee (team member ID)
    #[arg(short, long)]
    pub assignee: Option<String>,

    /// Initial status (todo, in-progress, completed)
    #[arg(short, long)]
    pub status: Option<TaskStatus>,

    /// Prompt for title and description when not given
    #[arg(short, long)]
    pub interactive: bool,
}

#[derive(Args)]
pub struct MoveTaskArgs {
    /// Task ID
    pub task_id: String,

    /// Target status (todo, in-progress, completed)
    pub status: TaskStatus,
}

#[derive(Args)]
pub struct EditTaskArgs {
    /// Task ID
    pub task_id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(short, long)]
    pub status: Option<TaskStatus>,

    #[arg(long)]
    pub priority: Option<TaskPriority>,

    /// Team member ID
    #[arg(short, long)]
    pub assignee: Option<String>,
}

pub async fn execute(cmd: TaskCommands, session: &mut Session) -> Result<()> {
    match cmd {
        TaskCommands::List { project, status } => {
            let store = session.store();
            let mut tasks: Vec<Task> = match &project {
                Some(project_id) => store.get_project(project_id)?.tasks.clone(),
                None => store.all_tasks(),
            };
            if let Some(status) = status {
                tasks.retain(|t| t.status == status);
            }
            output::print_tasks_table(&tasks, store);
        }

        TaskCommands::Show { task_id, json } => {
            let store = session.store();
            let task = store.get_task(&task_id)?;
            let subtasks = store.subtasks(&task_id)?;
            if json {
                let detail = serde_json::json!({ "task": task, "subtasks": subtasks });
                println!("{}", serde_json::to_string_pretty(&detail)?);
            } else {
                let project = store.find_task_project(&task_id)?;
                output::print_task(task, project, &subtasks, store);
            }
        }

        TaskCommands::New(args) => {
            let fields = collect_fields(args)?;
            let outcome = session
                .submit(Command::CreateTask(fields), "Creating task...")
                .await?;
            if let CommandOutcome::Task(task) = outcome {
                println!(
                    "{} Created task: {} ({})",
                    "✓".green().bold(),
                    task.title.cyan(),
                    task.id.dimmed()
                );
            }
        }

        TaskCommands::Move(args) => {
            let current = session.store().get_task(&args.task_id)?.status;
            if current == args.status {
                println!(
                    "{} Task {} is already {}",
                    "·".dimmed(),
                    args.task_id.dimmed(),
                    args.status.display_name().cyan()
                );
                return Ok(());
            }
            session
                .submit(
                    Command::MoveTask {
                        task_id: args.task_id,
                        status: args.status,
                    },
                    "Moving task...",
                )
                .await?;
            session.print_toasts();
        }

        TaskCommands::Edit(args) => {
            let patch = TaskPatch {
                title: args.title,
                description: args.description,
                status: args.status,
                priority: args.priority,
                assignee: args.assignee,
            };
            if patch.is_empty() {
                println!("{}", "Nothing to change.".dimmed());
                return Ok(());
            }
            session
                .submit(
                    Command::EditTask {
                        task_id: args.task_id,
                        patch,
                    },
                    "Saving changes...",
                )
                .await?;
            session.print_toasts();
        }

        TaskCommands::Subtasks { task_id } => {
            let subtasks = session.store().subtasks(&task_id)?;
            output::print_subtasks(&subtasks);
        }

        TaskCommands::ToggleSubtask {
            task_id,
            subtask_id,
        } => {
            let outcome = session
                .submit(
                    Command::ToggleSubtask {
                        task_id: task_id.clone(),
                        subtask_id,
                    },
                    "Updating subtask...",
                )
                .await?;
            if let CommandOutcome::Subtask(subtask) = outcome {
                let mark = if subtask.completed { "[x]".green() } else { "[ ]".normal() };
                println!("{} {}", mark, subtask.title);
            }
            session.print_toasts();
        }
    }

    Ok(())
}

fn collect_fields(args: NewTaskArgs) -> Result<NewTask> {
    let mut title = args.title.unwrap_or_default();
    let mut description = args.description.unwrap_or_default();

    if args.interactive {
        if title.trim().is_empty() {
            title = Input::new().with_prompt("Task title").interact_text()?;
        }
        if description.trim().is_empty() {
            description = Input::new()
                .with_prompt("Description")
                .interact_text()?;
        }
    }

    Ok(NewTask {
        project_id: args.project,
        title,
        description,
        due_date: args.due.as_deref().map(parse_date).transpose()?,
        priority: args.priority,
        assignee: args.assignee,
        status: args.status,
    })
}
