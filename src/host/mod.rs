//! Boundary with the host runtime.
//!
//! A module never owns interpreters or configuration; it calls into the host
//! through these types:
//!
//! - **Config**: section lookups keyed by server/module path
//! - **Interp**: command tables and dispatch for one interpreter context
//! - **Runtime**: in-memory reference host running per-server create traces
//! - **Error**: failure kinds crossing the boundary

pub mod config;
pub mod error;
pub mod interp;
pub mod runtime;

pub use config::{ConfigSet, ConfigSource, config_path};
pub use error::{
    CommandError, CommandResult, ConfigError, HostError, ModuleError, RegistrationError,
};
pub use interp::{CommandHandler, CommandInvocation, Interp};
pub use runtime::{CreateTrace, HOST_MODULE_VERSION, ModuleHost, Runtime};
