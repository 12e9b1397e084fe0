//! Project management commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use dialoguer::Input;

use taskdeck_core::executor::{Command, CommandOutcome};
use taskdeck_core::project::model::{NewProject, ProjectPriority, ProjectStatus};

use super::parse_date;
use crate::output;
use crate::session::Session;

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List all projects
    List,

    /// Show a project with its team and tasks
    Show {
        /// Project ID
        project_id: String,
    },

    /// Create a new project
    New(NewProjectArgs),
}

#[derive(Args)]
pub struct NewProjectArgs {
    /// Project name
    #[arg(long)]
    pub name: Option<String>,

    /// Project description (at least 10 characters)
    #[arg(short, long)]
    pub description: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    /// Priority (low, medium, high)
    #[arg(long)]
    pub priority: Option<ProjectPriority>,

    /// Status (planning, active, completed, on-hold)
    #[arg(long)]
    pub status: Option<ProjectStatus>,

    /// Team member ID; repeat for each member
    #[arg(short, long = "member")]
    pub members: Vec<String>,

    /// Prompt for name and description when not given
    #[arg(short, long)]
    pub interactive: bool,
}

pub async fn execute(cmd: ProjectCommands, session: &mut Session) -> Result<()> {
    match cmd {
        ProjectCommands::List => {
            output::print_projects_table(session.store().list_projects());
        }

        ProjectCommands::Show { project_id } => {
            let store = session.store();
            let project = store.get_project(&project_id)?;
            output::print_project(project, store);
        }

        ProjectCommands::New(args) => {
            let fields = collect_fields(args)?;
            let outcome = session
                .submit(Command::CreateProject(fields), "Creating project...")
                .await?;

            if let CommandOutcome::Project(project) = outcome {
                println!(
                    "{} Created project: {} ({})",
                    "✓".green().bold(),
                    project.name.cyan(),
                    project.id.dimmed()
                );
            }
        }
    }

    Ok(())
}

fn collect_fields(args: NewProjectArgs) -> Result<NewProject> {
    let mut name = args.name.unwrap_or_default();
    let mut description = args.description.unwrap_or_default();

    if args.interactive {
        if name.trim().is_empty() {
            name = Input::new().with_prompt("Project name").interact_text()?;
        }
        if description.trim().is_empty() {
            description = Input::new()
                .with_prompt("Description")
                .interact_text()?;
        }
    }

    Ok(NewProject {
        name,
        description,
        start_date: args.start.as_deref().map(parse_date).transpose()?,
        end_date: args.end.as_deref().map(parse_date).transpose()?,
        priority: args.priority,
        status: args.status,
        team_member_ids: args.members,
    })
}
