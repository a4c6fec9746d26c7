//! Command registry - name to command lookup.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::command::Command;

/// In-memory store of commands keyed by name.
///
/// Registering a name twice replaces the earlier command. Mutation is
/// expected to happen during setup only; the registry has no locking.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `command` under its name, replacing any previous entry.
    pub fn register(&mut self, command: Arc<dyn Command>) {
        let name = command.name().to_string();
        if self.commands.insert(name.clone(), command).is_some() {
            tracing::debug!(command = %name, "Replaced previously registered command");
        }
    }

    /// Remove the entry for `name`, if any.
    pub fn unregister(&mut self, name: &str) {
        self.commands.remove(name);
    }

    /// Look up a command. `None` is an ordinary outcome, not an error.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(name).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// All registered commands, ordered by name.
    pub fn list(&self) -> Vec<Arc<dyn Command>> {
        self.commands.values().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn size(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .finish()
    }
}
