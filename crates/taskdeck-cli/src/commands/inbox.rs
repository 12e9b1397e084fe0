//! Notification inbox command.

use anyhow::Result;
use clap::Args;

use crate::output;
use crate::session::Session;

#[derive(Args)]
pub struct InboxArgs {
    /// Mark every notification as read after showing them
    #[arg(long)]
    pub mark_read: bool,
}

pub fn execute(args: InboxArgs, session: &mut Session) -> Result<()> {
    let notifier = session.store().notifications();
    output::print_notifications(notifier.inbox(), notifier.unread_count());

    if args.mark_read {
        session.store_mut().mark_notifications_read();
    }
    Ok(())
}
