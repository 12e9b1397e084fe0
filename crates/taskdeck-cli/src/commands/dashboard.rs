//! Dashboard command.

use anyhow::Result;
use clap::Args;

use taskdeck_core::dashboard::{DashboardSnapshot, DashboardView};

use crate::output;
use crate::session::Session;

#[derive(Args)]
pub struct DashboardArgs {
    /// Tab to show (overview, projects, tasks)
    #[arg(long, default_value = "overview")]
    pub view: DashboardView,

    /// Print the overview as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: DashboardArgs, session: &Session) -> Result<()> {
    let store = session.store();

    match args.view {
        DashboardView::Overview => {
            let snapshot = DashboardSnapshot::capture(store, session.recent_limit());
            if args.json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                output::print_dashboard(&snapshot, store);
            }
        }
        DashboardView::Projects => output::print_projects_table(store.list_projects()),
        DashboardView::Tasks => output::print_tasks_table(&store.all_tasks(), store),
    }

    Ok(())
}
