use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Describes a named action for listing and discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Usage hint such as `find <keyword>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
}

impl CommandInfo {
    pub fn new(id: &str, title: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            usage: None,
        }
    }

    pub fn with_usage(mut self, usage: &str) -> Self {
        self.usage = Some(usage.to_string());
        self
    }
}

/// Synchronous action bound to a command id
pub type CommandAction = Box<dyn Fn(&[String]) -> anyhow::Result<()> + Send + Sync>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Command not found: {0}")]
    NotFound(String),

    #[error("Command '{id}' failed: {source}")]
    Failed {
        id: String,
        #[source]
        source: anyhow::Error,
    },
}

struct RegisteredCommand {
    info: CommandInfo,
    action: CommandAction,
}

/// Name to action lookup table.
///
/// Built once at startup with `&mut self` registrations and then shared by
/// reference, so registration is finished before any lookup can happen.
/// Re-registering an id replaces the previous descriptor and action.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, RegisteredCommand>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, info: CommandInfo, action: F)
    where
        F: Fn(&[String]) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let id = info.id.clone();
        if self.commands.insert(id.clone(), RegisteredCommand { info, action: Box::new(action) }).is_some() {
            log::debug!("Replaced command {}", id);
        }
    }

    /// All registered descriptors, sorted by id
    pub fn list(&self) -> Vec<CommandInfo> {
        let mut infos: Vec<CommandInfo> = self.commands.values().map(|c| c.info.clone()).collect();
        infos.sort_by(|a, b| a.id.cmp(&b.id));
        infos
    }

    pub fn get(&self, id: &str) -> Option<&CommandInfo> {
        self.commands.get(id).map(|c| &c.info)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Run the action registered under `id`
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NotFound`] for an unknown id and
    /// [`CommandError::Failed`] if the action itself returns an error.
    pub fn execute(&self, id: &str, args: &[String]) -> Result<(), CommandError> {
        let command = self.commands.get(id).ok_or_else(|| CommandError::NotFound(id.to_string()))?;
        (command.action)(args).map_err(|source| CommandError::Failed { id: id.to_string(), source })
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry").field("commands", &self.list()).finish()
    }
}
