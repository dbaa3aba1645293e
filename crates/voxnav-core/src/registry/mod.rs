//! Command registry.
//!
//! Each command is described by a [`CommandDescriptor`]: its name, aliases, where it
//! runs, the arguments it cannot do without, and the handler that executes it.
//! Names and aliases share a single namespace.

mod defaults;

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use voxnav_protocols::command::string_arg;
use voxnav_protocols::{Ack, CommandArgs, CommandError, CommandScope};

use crate::error::RegistryError;

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

/// Executes one command.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, args: &CommandArgs) -> Result<Ack, CommandError>;
}

/// An argument checked before the handler runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredArg {
    pub name: String,
    /// Error text sent to the controller when the argument is missing.
    pub message: String,
}

pub struct CommandDescriptor {
    pub name: String,
    pub aliases: Vec<String>,
    pub scope: CommandScope,
    pub required_args: Vec<RequiredArg>,
    handler: Arc<dyn CommandHandler>,
}

impl CommandDescriptor {
    pub fn new(
        name: impl Into<String>,
        scope: CommandScope,
        handler: Arc<dyn CommandHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            scope,
            required_args: Vec::new(),
            handler,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Require a non-empty string argument.
    pub fn require(mut self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.required_args.push(RequiredArg {
            name: name.into(),
            message: message.into(),
        });
        self
    }

    /// All names this descriptor answers to.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// First missing required argument, in declaration order.
    pub fn validate(&self, args: &CommandArgs) -> Result<(), CommandError> {
        match self
            .required_args
            .iter()
            .find(|req| string_arg(args, &req.name).is_none())
        {
            Some(req) => Err(CommandError::missing_argument(&req.name, &req.message)),
            None => Ok(()),
        }
    }

    /// Validate `args`, then run the handler.
    pub async fn invoke(&self, args: &CommandArgs) -> Result<Ack, CommandError> {
        self.validate(args)?;
        self.handler.handle(args).await
    }
}

impl std::fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("scope", &self.scope)
            .field("required_args", &self.required_args)
            .finish_non_exhaustive()
    }
}

/// Lookup from command name or alias to descriptor.
pub struct CommandRegistry {
    entries: DashMap<String, Arc<CommandDescriptor>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Register a descriptor under its name and aliases.
    ///
    /// Fails without registering anything if any of them is already taken.
    pub fn register(&self, descriptor: CommandDescriptor) -> Result<(), RegistryError> {
        let mut seen: Vec<&str> = Vec::new();
        for name in descriptor.names() {
            if self.entries.contains_key(name) || seen.contains(&name) {
                return Err(RegistryError::AlreadyRegistered(name.to_string()));
            }
            seen.push(name);
        }

        let keys: Vec<String> = seen.into_iter().map(str::to_string).collect();
        let descriptor = Arc::new(descriptor);
        for key in keys {
            self.entries.insert(key, descriptor.clone());
        }
        Ok(())
    }

    /// Resolve a name or alias.
    pub fn resolve(&self, name: &str) -> Option<Arc<CommandDescriptor>> {
        self.entries.get(name).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Every descriptor once, sorted by name.
    pub fn list(&self) -> Vec<Arc<CommandDescriptor>> {
        let mut descriptors: Vec<Arc<CommandDescriptor>> = self
            .entries
            .iter()
            .filter(|entry| entry.key() == &entry.value().name)
            .map(|entry| entry.value().clone())
            .collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    /// Number of distinct commands (aliases not counted).
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.key() == &entry.value().name)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
