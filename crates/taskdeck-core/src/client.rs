//! Store plus executor: the submit path used by front ends.

use tracing::{info, warn};

use crate::error::CoreResult;
use crate::executor::{Command, CommandExecutor, CommandOutcome};
use crate::store::ProjectTaskStore;

/// Owns a store and routes every submitted command through an executor.
///
/// `submit` checks the command against the store, waits for the executor,
/// then applies it as of the moment it was submitted. If either the check or
/// the executor fails, the store is untouched.
pub struct StoreClient<E> {
    store: ProjectTaskStore,
    executor: E,
}

impl<E: CommandExecutor> StoreClient<E> {
    pub fn new(store: ProjectTaskStore, executor: E) -> Self {
        Self { store, executor }
    }

    pub fn store(&self) -> &ProjectTaskStore {
        &self.store
    }

    /// Direct access for synchronous operations that need no round trip
    /// (board drops, member status toggles).
    pub fn store_mut(&mut self) -> &mut ProjectTaskStore {
        &mut self.store
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub async fn submit(&mut self, command: Command) -> CoreResult<CommandOutcome> {
        let submitted_at = self.store.now();
        self.store.check_at(&command, submitted_at)?;

        if let Err(e) = self.executor.dispatch(&command).await {
            warn!(command = command.name(), error = %e, "Executor rejected command");
            return Err(e);
        }

        let name = command.name();
        let outcome = self.store.apply_at(command, submitted_at)?;
        info!(command = name, "Command applied");
        Ok(outcome)
    }

    pub fn into_store(self) -> ProjectTaskStore {
        self.store
    }
}
