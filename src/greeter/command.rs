//! The `example_greet` command.

use std::sync::Arc;

use super::context::LoadContext;
use crate::host::{CommandError, CommandHandler, CommandInvocation, CommandResult};

/// Name the command is bound under in every interpreter.
pub const COMMAND_NAME: &str = "example_greet";

const USAGE: &str = "name";

/// Configuration captured by one module load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleConfig {
    pub greeting: String,
    pub server: String,
    pub module: String,
}

/// Greets the person named by its single argument.
pub struct GreetCommand {
    config: Arc<ModuleConfig>,
    ctx: Arc<LoadContext>,
}

impl GreetCommand {
    pub fn new(config: Arc<ModuleConfig>, ctx: Arc<LoadContext>) -> Self {
        Self { config, ctx }
    }
}

impl CommandHandler for GreetCommand {
    fn handle(&self, invocation: &CommandInvocation) -> CommandResult<String> {
        let [name] = invocation.args() else {
            return Err(CommandError::wrong_num_args(
                invocation.name().unwrap_or(COMMAND_NAME),
                USAGE,
            ));
        };

        let ModuleConfig {
            greeting,
            server,
            module,
        } = self.config.as_ref();
        tracing::debug!("{module}: greeting {name} on server {server}");

        Ok(format!(
            "{greeting} {name}! (server: {server} module: {module} loaded: {})",
            self.ctx.loaded()
        ))
    }

    fn usage(&self) -> Option<&str> {
        Some(USAGE)
    }
}
