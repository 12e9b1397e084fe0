//! Team management commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use taskdeck_core::executor::{Command, CommandOutcome};
use taskdeck_core::team::model::NewMember;

use crate::output;
use crate::session::Session;

#[derive(Subcommand)]
pub enum TeamCommands {
    /// List team members
    List {
        /// Filter by name, email or role
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Add a team member
    Add(AddMemberArgs),

    /// Remove a team member with no assigned tasks
    Remove {
        /// Member ID
        member_id: String,
    },

    /// Toggle a member between active and inactive
    Toggle {
        /// Member ID
        member_id: String,
    },
}

#[derive(Args)]
pub struct AddMemberArgs {
    /// Full name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// Role, e.g. "Developer"
    #[arg(long, default_value = "")]
    pub role: String,
}

pub async fn execute(cmd: TeamCommands, session: &mut Session) -> Result<()> {
    match cmd {
        TeamCommands::List { search } => {
            let store = session.store();
            let members = match search.as_deref() {
                Some(term) => store.search_members(term),
                None => store.team_members().iter().collect(),
            };
            output::print_members_table(&members);
        }

        TeamCommands::Add(args) => {
            let fields = NewMember {
                name: args.name,
                email: args.email,
                role: args.role,
            };
            let outcome = session
                .submit(Command::AddMember(fields), "Adding member...")
                .await?;
            if let CommandOutcome::Member(member) = outcome {
                println!(
                    "{} Added {} ({})",
                    "✓".green().bold(),
                    member.name.cyan(),
                    member.id.dimmed()
                );
            }
        }

        TeamCommands::Remove { member_id } => {
            session.store_mut().remove_member(&member_id)?;
            session.print_toasts();
        }

        TeamCommands::Toggle { member_id } => {
            session.store_mut().toggle_member_status(&member_id)?;
            session.print_toasts();
        }
    }

    Ok(())
}
