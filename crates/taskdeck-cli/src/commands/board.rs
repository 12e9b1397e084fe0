//! Kanban board command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use taskdeck_core::board::{self, DropOutcome};
use taskdeck_core::task::model::TaskStatus;

use crate::output;
use crate::session::Session;

#[derive(Args)]
pub struct BoardArgs {
    /// Project ID
    pub project_id: String,

    /// Task to drop on a column
    #[arg(long, requires = "to")]
    pub drop: Option<String>,

    /// Column to drop the task on (todo, in-progress, completed)
    #[arg(long, requires = "drop")]
    pub to: Option<TaskStatus>,

    /// Print the board as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: BoardArgs, session: &mut Session) -> Result<()> {
    if let (Some(task_id), Some(column)) = (args.drop.as_deref(), args.to) {
        // Cards only move within their own project's board.
        let owner = session.store().find_task_project(task_id)?;
        if owner.id != args.project_id {
            anyhow::bail!("Task {} is not on the board of project {}", task_id, args.project_id);
        }

        match board::drop_task(session.store_mut(), task_id, column)? {
            DropOutcome::Moved(_) => session.print_toasts(),
            DropOutcome::Unchanged => {
                println!("{}", "Dropped on its own column; nothing changed.".dimmed());
            }
        }
        println!();
    }

    let board = board::get_board(session.store(), &args.project_id)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&board)?);
    } else {
        output::print_board(&board);
    }
    Ok(())
}
