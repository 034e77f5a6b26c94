//! # ReactBot Commands
//!
//! The built-in command set and its registration entry point.
//!
//! Commands are plain structs implementing [`reactbot_core::Command`];
//! [`register_all`] wires them into a registry at startup, so the full
//! command table is known at compile time.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod dump;
pub mod help;
pub mod rank;
pub mod store;

pub use store::{PgRankStore, RankStore};

use reactbot_core::CommandRegistry;
use std::sync::Arc;
use tracing::{debug, info};

/// Builds the registry holding every built-in command.
#[must_use]
pub fn register_all(store: Arc<dyn RankStore>) -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    let commands: Vec<Arc<dyn reactbot_core::Command>> = vec![
        Arc::new(help::Help),
        Arc::new(rank::Rank::new(store)),
        Arc::new(dump::Dump),
    ];

    for command in commands {
        debug!(name = command.meta().name, "registering command");
        registry.insert(command);
    }

    info!(count = registry.len(), "command registry built");
    registry
}
