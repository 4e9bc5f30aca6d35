//! Example loadable module registering the `example_greet` command.
//!
//! Each load reads the optional `greeting` option from the module's config
//! section, registers a create trace that binds the command into every new
//! interpreter of the owning server, and bumps the process-wide load count
//! held in [`LoadContext`].

pub mod command;
pub mod context;

use std::sync::Arc;

pub use command::{COMMAND_NAME, GreetCommand, ModuleConfig};
pub use context::LoadContext;

use crate::host::{
    CommandHandler, Interp, ModuleError, ModuleHost, RegistrationError, config_path,
};

/// Version of the host module interface this module is built against.
pub const MODULE_VERSION: u32 = 1;

/// Greeting used when the `greeting` option is unset.
pub const DEFAULT_GREETING: &str = "Hello";

/// Config key holding the greeting.
pub const GREETING_KEY: &str = "greeting";

/// Module entry point, run by the host each time the module is loaded.
///
/// Returns the load count after this load. A missing server aborts the
/// load before anything is registered or counted.
pub fn init(
    ctx: &Arc<LoadContext>,
    host: &dyn ModuleHost,
    server: Option<&str>,
    module: &str,
) -> Result<u64, ModuleError> {
    let Some(server) = server else {
        tracing::error!("{module}: module requires a virtual server");
        return Err(ModuleError::Configuration {
            module: module.to_string(),
            reason: "module requires a virtual server".to_string(),
        });
    };
    if module.is_empty() {
        tracing::error!("module on server {server} has no name");
        return Err(ModuleError::Configuration {
            module: module.to_string(),
            reason: "module requires a name".to_string(),
        });
    }

    let path = config_path(server, module);
    let greeting = host
        .config()
        .get_value(&path, GREETING_KEY)
        .unwrap_or_else(|| DEFAULT_GREETING.to_string());

    let config = Arc::new(ModuleConfig {
        greeting,
        server: server.to_string(),
        module: module.to_string(),
    });

    let trace_ctx = Arc::clone(ctx);
    host.register_create_trace(
        server,
        Arc::new(move |interp: &mut Interp| {
            add_commands(interp, Arc::clone(&config), Arc::clone(&trace_ctx))
        }),
    );

    let loaded = ctx.record_load();
    tracing::info!("{module}: loaded into server {server} (load #{loaded})");
    Ok(loaded)
}

/// Bind the module's commands into a freshly created interpreter.
fn add_commands(
    interp: &mut Interp,
    config: Arc<ModuleConfig>,
    ctx: Arc<LoadContext>,
) -> Result<(), RegistrationError> {
    tracing::debug!(
        "{}: adding {COMMAND_NAME} to interp for server {}",
        config.module,
        interp.server()
    );
    let handler: Arc<dyn CommandHandler> = Arc::new(GreetCommand::new(config, ctx));
    interp.create_command(COMMAND_NAME, handler)
}
