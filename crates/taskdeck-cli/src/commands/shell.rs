//! Interactive shell.
//!
//! Reads command lines with the same grammar as the CLI and runs them
//! against one session, so created tasks, moves and notifications persist
//! until the shell exits.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use dialoguer::Input;
use tracing::debug;

use super::Commands;
use crate::output;
use crate::session::Session;

/// One shell line, parsed without a binary name.
#[derive(Parser)]
#[command(name = "taskdeck", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Commands,
}

enum ShellInput {
    Empty,
    Exit,
    Command(Commands),
    Invalid(clap::Error),
    Unbalanced,
}

fn parse_line(line: &str) -> ShellInput {
    let Some(words) = shlex::split(line) else {
        return ShellInput::Unbalanced;
    };
    match words.first().map(String::as_str) {
        None => ShellInput::Empty,
        Some("exit") | Some("quit") => ShellInput::Exit,
        Some(_) => match ShellLine::try_parse_from(words) {
            Ok(parsed) => ShellInput::Command(parsed.command),
            Err(e) => ShellInput::Invalid(e),
        },
    }
}

pub async fn run(session: &mut Session) -> Result<()> {
    println!(
        "{} Type a command such as {} or {}; {} leaves the shell.",
        "→".blue().bold(),
        "dashboard".cyan(),
        "board 1".cyan(),
        "exit".cyan()
    );

    loop {
        let line: String = match Input::new()
            .with_prompt("taskdeck")
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(e) => {
                debug!(error = %e, "Shell input closed");
                break;
            }
        };

        match parse_line(&line) {
            ShellInput::Empty => continue,
            ShellInput::Exit => break,
            ShellInput::Command(command) => {
                if let Err(e) = command.run(session).await {
                    output::print_error(&e);
                }
            }
            ShellInput::Invalid(e) => {
                let _ = e.print();
            }
            ShellInput::Unbalanced => {
                eprintln!("{} Unbalanced quotes in command line", "✗".red().bold());
            }
        }
        println!();
    }

    let unread = session.store().notifications().unread_count();
    if unread > 0 {
        println!("{}", format!("{} unread notification(s) discarded.", unread).dimmed());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::task::TaskCommands;

    #[test]
    fn test_parse_command_line() {
        match parse_line("task move t2 completed") {
            ShellInput::Command(Commands::Task(TaskCommands::Move(args))) => {
                assert_eq!(args.task_id, "t2");
            }
            _ => panic!("expected a task move"),
        }
    }

    #[test]
    fn test_quoted_arguments() {
        match parse_line(r#"task new "Write release notes" -p 1 -d "Summarize changes""#) {
            ShellInput::Command(Commands::Task(TaskCommands::New(args))) => {
                assert_eq!(args.title.as_deref(), Some("Write release notes"));
                assert_eq!(args.description.as_deref(), Some("Summarize changes"));
            }
            _ => panic!("expected a new task"),
        }
    }

    #[test]
    fn test_exit_empty_and_errors() {
        assert!(matches!(parse_line("exit"), ShellInput::Exit));
        assert!(matches!(parse_line("   "), ShellInput::Empty));
        assert!(matches!(parse_line("task new \"unterminated"), ShellInput::Unbalanced));
        assert!(matches!(parse_line("frobnicate"), ShellInput::Invalid(_)));
    }
}
