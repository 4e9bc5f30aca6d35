//! Example loadable module for a web-server runtime.
//!
//! [`greeter`] is the module itself: one `example_greet` command reporting a
//! configurable greeting, the owning server, the module name and the
//! process-wide load count. [`host`] is the boundary it calls into, along
//! with a small in-memory [`host::Runtime`] that drives it.

pub mod greeter;
pub mod host;

pub use greeter::{COMMAND_NAME, LoadContext, ModuleConfig, init};
