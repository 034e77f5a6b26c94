//! The command registry: name to descriptor-plus-behavior mapping.

use crate::command::Command;
use std::collections::HashMap;
use std::sync::Arc;

/// Mapping from lower-cased command name to command object.
///
/// Populated once at startup by the command crate's registration function
/// and read-only during message handling.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Inserts a command, replacing any previous command of the same name.
    pub fn insert(&mut self, command: Arc<dyn Command>) {
        self.commands
            .insert(command.meta().name.to_lowercase(), command);
    }

    /// Looks up a command by name, case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(&name.to_lowercase()).cloned()
    }

    /// Iterates all commands in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Command>> {
        self.commands.values()
    }

    /// All commands, stably sorted by category and then by name.
    #[must_use]
    pub fn by_category(&self) -> Vec<Arc<dyn Command>> {
        let mut commands: Vec<_> = self.commands.values().cloned().collect();
        commands.sort_by_key(|command| (command.meta().category, command.meta().name));
        commands
    }

    /// Number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry holds no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
