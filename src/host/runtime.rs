//! In-memory reference host.
//!
//! [`Runtime`] keeps a list of interp create traces per virtual server and
//! runs them, in registration order, against every interpreter it creates.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::config::{ConfigSet, ConfigSource};
use super::error::{HostError, RegistrationError};
use super::interp::Interp;
use crate::greeter::{self, LoadContext};

/// Callback run against every newly created interpreter of a server.
pub type CreateTrace = Arc<dyn Fn(&mut Interp) -> Result<(), RegistrationError> + Send + Sync>;

/// Host module interface version the runtime accepts.
pub const HOST_MODULE_VERSION: u32 = 1;

/// Capabilities a module's initialization routine may call into.
pub trait ModuleHost: Send + Sync {
    /// Configuration lookups.
    fn config(&self) -> &dyn ConfigSource;

    /// Register `trace` to run whenever an interpreter is created for `server`.
    fn register_create_trace(&self, server: &str, trace: CreateTrace);
}

/// Reference host holding configuration and per-server create traces.
pub struct Runtime {
    config: ConfigSet,
    traces: RwLock<HashMap<String, Vec<CreateTrace>>>,
}

impl Runtime {
    /// Create a runtime serving lookups from `config`.
    pub fn new(config: ConfigSet) -> Self {
        Self {
            config,
            traces: RwLock::new(HashMap::new()),
        }
    }

    /// Load the greeter, advertising the version it was built against.
    ///
    /// Returns the load count after this load.
    pub fn load_module(
        &self,
        ctx: &Arc<LoadContext>,
        server: Option<&str>,
        module: &str,
    ) -> Result<u64, HostError> {
        self.load_module_version(ctx, server, module, greeter::MODULE_VERSION)
    }

    /// Check an advertised module version and run the greeter's
    /// initialization. A mismatch aborts before the module runs.
    pub fn load_module_version(
        &self,
        ctx: &Arc<LoadContext>,
        server: Option<&str>,
        module: &str,
        version: u32,
    ) -> Result<u64, HostError> {
        if version != HOST_MODULE_VERSION {
            tracing::error!("{module}: version {version} != host version {HOST_MODULE_VERSION}");
            return Err(HostError::Version {
                module: module.to_string(),
                found: version,
                expected: HOST_MODULE_VERSION,
            });
        }
        Ok(greeter::init(ctx, self, server, module)?)
    }

    /// Create an interpreter for `server` and run its create traces.
    pub fn create_interp(&self, server: &str) -> Result<Interp, HostError> {
        let traces: Vec<CreateTrace> = self
            .traces
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(server)
            .cloned()
            .unwrap_or_default();

        let mut interp = Interp::new(server);
        for trace in traces {
            trace(&mut interp).map_err(|source| {
                tracing::error!("Create trace failed for server {server}: {source}");
                HostError::Trace {
                    server: server.to_string(),
                    source,
                }
            })?;
        }
        Ok(interp)
    }

    /// Number of create traces registered for `server`.
    pub fn trace_count(&self, server: &str) -> usize {
        self.traces
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(server)
            .map_or(0, Vec::len)
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(ConfigSet::default())
    }
}

impl ModuleHost for Runtime {
    fn config(&self) -> &dyn ConfigSource {
        &self.config
    }

    fn register_create_trace(&self, server: &str, trace: CreateTrace) {
        self.traces
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(server.to_string())
            .or_default()
            .push(trace);
    }
}
