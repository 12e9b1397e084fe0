//! Taskdeck Core Library
//!
//! In-memory project and task store behind the Taskdeck dashboard: domain
//! models, form validation, Kanban board, notifications and the simulated
//! command executor.

pub mod board;
pub mod client;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod executor;
pub mod notifier;
pub mod project;
pub mod seed;
pub mod store;
pub mod task;
pub mod team;
pub mod validation;

pub use client::StoreClient;
pub use error::{CoreError, CoreResult};
pub use store::ProjectTaskStore;
