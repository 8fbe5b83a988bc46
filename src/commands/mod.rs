//! Named export commands behind a registry
//!
//! This is the trigger boundary: each export operation is a named command
//! with schema-described parameters, executed against a
//! [`CommandContext`] holding the parsed page. Commands are looked up by
//! name, mirror one user-visible trigger each, and report a status string
//! plus a success flag.

pub mod convert;
pub mod copy;
pub mod download;

pub use convert::ConvertMarkdownCommand;
pub use copy::CopyMarkdownCommand;
pub use download::DownloadMarkdownCommand;

use crate::dom::MarkupNode;
use crate::error::{ExportError, Result};
use crate::extract::PageSelectors;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::PathBuf;

/// Shared state a command executes against
///
/// Borrowed per invocation; nothing is retained across calls, so rapid
/// re-triggering yields fully isolated executions.
pub struct CommandContext<'a> {
    /// Parsed page root
    pub page: &'a MarkupNode,

    /// Selectors describing the page shape
    pub selectors: &'a PageSelectors,

    /// Directory the download command writes into
    pub output_dir: PathBuf,
}

impl<'a> CommandContext<'a> {
    /// Create a context writing downloads to the current directory
    pub fn new(page: &'a MarkupNode, selectors: &'a PageSelectors) -> Self {
        Self {
            page,
            selectors,
            output_dir: PathBuf::from("."),
        }
    }

    /// Builder method: set the download directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

/// Result of a command execution
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// Whether the command succeeded
    pub success: bool,

    /// Human-readable status string
    pub status: String,

    /// Optional structured payload
    pub data: Option<Value>,
}

impl CommandOutcome {
    /// Successful outcome with a status message
    pub fn success(status: impl Into<String>) -> Self {
        Self {
            success: true,
            status: status.into(),
            data: None,
        }
    }

    /// Successful outcome with a status message and payload
    pub fn success_with(status: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            status: status.into(),
            data: Some(data),
        }
    }

    /// Failed outcome with a status message
    pub fn error(status: impl Into<String>) -> Self {
        Self {
            success: false,
            status: status.into(),
            data: None,
        }
    }
}

/// An export command with typed, schema-described parameters
pub trait Command {
    /// Parameter type, deserialized from JSON
    type Params: DeserializeOwned + JsonSchema;

    /// Command name used for registry lookup
    fn name(&self) -> &str;

    /// One-line description
    fn description(&self) -> &str;

    /// Execute with typed parameters
    fn execute_typed(
        &self,
        params: Self::Params,
        context: &mut CommandContext,
    ) -> Result<CommandOutcome>;

    /// JSON schema of the parameter type
    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or_default()
    }
}

/// Object-safe wrapper so commands with different parameter types share a
/// registry
trait ErasedCommand: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters_schema(&self) -> Value;
    fn execute(&self, params: Value, context: &mut CommandContext) -> Result<CommandOutcome>;
}

impl<C> ErasedCommand for C
where
    C: Command + Send + Sync,
{
    fn name(&self) -> &str {
        Command::name(self)
    }

    fn description(&self) -> &str {
        Command::description(self)
    }

    fn parameters_schema(&self) -> Value {
        Command::parameters_schema(self)
    }

    fn execute(&self, params: Value, context: &mut CommandContext) -> Result<CommandOutcome> {
        let typed = serde_json::from_value(params).map_err(|e| ExportError::InvalidParams {
            command: Command::name(self).to_string(),
            reason: e.to_string(),
        })?;
        self.execute_typed(typed, context)
    }
}

/// Registry of export commands, keyed by name in registration order
pub struct CommandRegistry {
    commands: IndexMap<String, Box<dyn ErasedCommand>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            commands: IndexMap::new(),
        }
    }

    /// Create a registry with all export commands registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ConvertMarkdownCommand);
        registry.register(DownloadMarkdownCommand);
        registry.register(CopyMarkdownCommand);
        registry
    }

    /// Register a command under its own name
    pub fn register<C>(&mut self, command: C)
    where
        C: Command + Send + Sync + 'static,
    {
        self.commands
            .insert(Command::name(&command).to_string(), Box::new(command));
    }

    /// Execute a command by name
    pub fn execute(
        &self,
        name: &str,
        params: Value,
        context: &mut CommandContext,
    ) -> Result<CommandOutcome> {
        let command = self
            .commands
            .get(name)
            .ok_or_else(|| ExportError::UnknownCommand(name.to_string()))?;
        command.execute(params, context)
    }

    /// Names of registered commands in registration order
    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
