//! CLI command definitions and handlers.

use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use taskdeck_core::config::Config;

use crate::session::Session;

pub mod account;
pub mod board;
pub mod dashboard;
pub mod inbox;
pub mod project;
pub mod shell;
pub mod task;
pub mod team;

/// Taskdeck - project and task dashboard
#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to ./taskdeck.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed fixture to load instead of the built-in sample data
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the dashboard
    Dashboard(dashboard::DashboardArgs),

    /// Project management
    #[command(subcommand)]
    Project(project::ProjectCommands),

    /// Task management
    #[command(subcommand)]
    Task(task::TaskCommands),

    /// Display a project's Kanban board, optionally dropping a task on a column
    Board(board::BoardArgs),

    /// Team management
    #[command(subcommand)]
    Team(team::TeamCommands),

    /// Show notifications raised in this session
    Inbox(inbox::InboxArgs),

    /// Account forms: login, signup, profile, password reset
    #[command(subcommand)]
    Account(account::AccountCommands),

    /// Start an interactive session that keeps changes between commands
    Shell,
}

impl Cli {
    pub async fn execute(self, config: &Config) -> Result<()> {
        let mut session = Session::open(config)?;

        match self.command {
            Commands::Shell => shell::run(&mut session).await,
            command => command.run(&mut session).await,
        }
    }
}

impl Commands {
    /// Run one command against an open session, then print any toasts it
    /// raised that the handler did not already show.
    pub async fn run(self, session: &mut Session) -> Result<()> {
        let result = match self {
            Commands::Dashboard(args) => dashboard::execute(args, session),
            Commands::Project(cmd) => project::execute(cmd, session).await,
            Commands::Task(cmd) => task::execute(cmd, session).await,
            Commands::Board(args) => board::execute(args, session),
            Commands::Team(cmd) => team::execute(cmd, session).await,
            Commands::Inbox(args) => inbox::execute(args, session),
            Commands::Account(cmd) => account::execute(cmd, session).await,
            Commands::Shell => {
                println!("{}", "Already in a shell session.".dimmed());
                Ok(())
            }
        };
        session.print_toasts();
        result
    }
}

/// Parse `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
pub fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(day) => match day.and_hms_opt(0, 0, 0) {
            Some(midnight) => Ok(midnight.and_utc()),
            None => bail!("invalid date: {}", s),
        },
        Err(_) => bail!("invalid date '{}': expected YYYY-MM-DD or an RFC 3339 timestamp", s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_date_formats() {
        let day = parse_date("2025-01-15").unwrap();
        assert_eq!(day, Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap());

        let ts = parse_date("2025-01-15T09:30:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 1, 15, 7, 30, 0).unwrap());

        assert!(parse_date("next tuesday").is_err());
    }

    #[test]
    fn test_cli_parses_global_flags() {
        let cli = Cli::try_parse_from(["taskdeck", "--seed", "demo.toml", "board", "1"]).unwrap();
        assert_eq!(cli.seed, Some(PathBuf::from("demo.toml")));
        assert!(matches!(cli.command, Commands::Board(_)));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
