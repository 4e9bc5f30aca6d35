//! Error types for the host boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported back through the command-failure channel of an interpreter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The command was called with the wrong number of arguments.
    #[error("wrong # args: should be \"{command} {usage}\"")]
    WrongNumArgs {
        /// Name the command was invoked as.
        command: String,
        /// Usage descriptor naming the expected arguments.
        usage: String,
    },

    /// No command is bound to the name in this interpreter.
    #[error("invalid command name \"{0}\"")]
    UnknownCommand(String),

    /// The invocation carried no command word at all.
    #[error("empty command")]
    EmptyCommand,
}

impl CommandError {
    /// Build a wrong-args error the way the interpreter formats usage.
    pub fn wrong_num_args(command: impl Into<String>, usage: impl Into<String>) -> Self {
        Self::WrongNumArgs {
            command: command.into(),
            usage: usage.into(),
        }
    }

    /// Returns `true` for argument-count failures.
    pub fn is_argument_error(&self) -> bool {
        matches!(self, Self::WrongNumArgs { .. })
    }
}

/// Result type for command invocations.
pub type CommandResult<T> = Result<T, CommandError>;

/// Errors that can occur while binding a command into an interpreter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// Command names must be a single non-empty word.
    #[error("invalid command name: {0:?}")]
    InvalidName(String),
}

/// Errors raised by a module's initialization routine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModuleError {
    /// Required configuration is missing; the load is aborted.
    #[error("{module}: {reason}")]
    Configuration {
        /// Module reporting the failure.
        module: String,
        /// What was missing.
        reason: String,
    },
}

/// Errors reading configuration for the reference host.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or has the wrong shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors raised by the reference host runtime.
#[derive(Debug, Error)]
pub enum HostError {
    /// A create trace failed while a new interpreter was being set up.
    #[error("interp create trace failed for server {server}: {source}")]
    Trace {
        server: String,
        #[source]
        source: RegistrationError,
    },

    /// The module was built against a different host module version.
    #[error("module {module} has version {found}, host expects {expected}")]
    Version {
        module: String,
        found: u32,
        expected: u32,
    },

    /// The module's initialization routine failed.
    #[error(transparent)]
    Module(#[from] ModuleError),
}
