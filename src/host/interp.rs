//! Interpreter contexts and the commands bound into them.

use std::collections::HashMap;
use std::sync::Arc;

use super::error::{CommandError, CommandResult, RegistrationError};

/// Handler trait that all commands must implement.
///
/// Handlers are shared between every interpreter they are bound into, so
/// they must be safe to call from several threads at once.
pub trait CommandHandler: Send + Sync {
    /// Execute the command and return its result string.
    fn handle(&self, invocation: &CommandInvocation) -> CommandResult<String>;

    /// Usage descriptor for the command's arguments, if it has one.
    fn usage(&self) -> Option<&str> {
        None
    }
}

/// A single command call. `argv[0]` is the name the command was invoked as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandInvocation {
    argv: Vec<String>,
}

impl CommandInvocation {
    /// Create an invocation from the full word list, command name first.
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
        }
    }

    /// Name the command was invoked as.
    pub fn name(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    /// Arguments after the command name.
    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or_default()
    }
}

/// A per-session scripting environment owned by one virtual server.
pub struct Interp {
    server: String,
    commands: HashMap<String, Arc<dyn CommandHandler>>,
}

impl Interp {
    /// Create an empty interpreter for `server`.
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            commands: HashMap::new(),
        }
    }

    /// The virtual server this interpreter belongs to.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Bind `name` to `handler`. An existing binding is replaced.
    pub fn create_command(
        &mut self,
        name: impl Into<String>,
        handler: Arc<dyn CommandHandler>,
    ) -> Result<(), RegistrationError> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(RegistrationError::InvalidName(name));
        }
        if self.commands.insert(name.clone(), handler).is_some() {
            tracing::debug!("Replacing command {name} in interp for server {}", self.server);
        }
        Ok(())
    }

    /// Dispatch an invocation to the command named by its first word.
    pub fn invoke(&self, invocation: &CommandInvocation) -> CommandResult<String> {
        let name = invocation.name().ok_or(CommandError::EmptyCommand)?;
        let handler = self
            .commands
            .get(name)
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;
        handler.handle(invocation)
    }

    /// Convenience wrapper around [`Interp::invoke`] for literal word lists.
    pub fn eval<S: AsRef<str>>(&self, argv: &[S]) -> CommandResult<String> {
        self.invoke(&CommandInvocation::new(
            argv.iter().map(|word| AsRef::<str>::as_ref(word)),
        ))
    }

    /// Check if a command is bound.
    pub fn contains_command(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Get the handler bound to `name`.
    pub fn command(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.commands.get(name).cloned()
    }

    /// Names of all bound commands, sorted.
    pub fn command_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl std::fmt::Debug for Interp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interp")
            .field("server", &self.server)
            .field("commands", &self.command_names())
            .finish()
    }
}
