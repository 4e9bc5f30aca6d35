//! Integration tests: loading the greeter into the reference runtime.
//!
//! Covers config lookups from disk, repeated loads sharing one load context,
//! and loads that fail before anything is registered.

use std::io::Write;
use std::sync::{Arc, Mutex};

use greet_module::COMMAND_NAME;
use greet_module::LoadContext;
use greet_module::host::{CommandError, ConfigSet, HostError, ModuleError, Runtime};
use tempfile::tempdir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Test: first load in a fresh context with no configured greeting
#[test]
fn test_default_greeting_on_first_load() {
    init_tracing();
    let ctx = Arc::new(LoadContext::new());
    let runtime = Runtime::default();

    assert_eq!(runtime.load_module(&ctx, Some("S"), "M").unwrap(), 1);

    let interp = runtime.create_interp("S").unwrap();
    assert_eq!(
        interp.eval(&[COMMAND_NAME, "World"]).unwrap(),
        "Hello World! (server: S module: M loaded: 1)"
    );
}

/// Test: greeting read from a TOML config file
#[test]
fn test_greeting_from_config_file() {
    init_tracing();
    let dir = tempdir().unwrap();
    let path = dir.path().join("server.toml");
    std::fs::write(
        &path,
        r#"
        ["ns/server/S/module/M"]
        greeting = "Hi"
        "#,
    )
    .unwrap();

    let ctx = Arc::new(LoadContext::new());
    let runtime = Runtime::new(ConfigSet::load(&path).unwrap());
    runtime.load_module(&ctx, Some("S"), "M").unwrap();

    let interp = runtime.create_interp("S").unwrap();
    let result = interp.eval(&[COMMAND_NAME, "X"]).unwrap();
    assert!(result.starts_with("Hi X!"), "unexpected greeting: {result}");
}

/// Test: the load counter grows across loads and is read at call time
#[test]
fn test_second_load_reports_higher_count() {
    init_tracing();
    let ctx = Arc::new(LoadContext::new());
    let runtime = Runtime::default();

    runtime.load_module(&ctx, Some("S"), "M").unwrap();
    let first_interp = runtime.create_interp("S").unwrap();
    let first = first_interp.eval(&[COMMAND_NAME, "A"]).unwrap();

    runtime.load_module(&ctx, Some("T"), "M").unwrap();
    let second_interp = runtime.create_interp("T").unwrap();
    let second = second_interp.eval(&[COMMAND_NAME, "A"]).unwrap();

    assert!(first.ends_with("loaded: 1)"));
    assert_eq!(second, "Hello A! (server: T module: M loaded: 2)");
    // Interps created before the second load see the new count too.
    assert!(first_interp.eval(&[COMMAND_NAME, "A"]).unwrap().ends_with("loaded: 2)"));
}

/// Test: loading twice into one server keeps a single binding
#[test]
fn test_reload_into_same_server() {
    init_tracing();
    let ctx = Arc::new(LoadContext::new());
    let runtime = Runtime::default();

    runtime.load_module(&ctx, Some("S"), "M").unwrap();
    runtime.load_module(&ctx, Some("S"), "M").unwrap();
    assert_eq!(runtime.trace_count("S"), 2);

    let interp = runtime.create_interp("S").unwrap();
    assert_eq!(interp.len(), 1);
    assert!(interp.eval(&[COMMAND_NAME, "A"]).unwrap().ends_with("loaded: 2)"));
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Test: rebinding the command on every new interp stays below warn level
#[test]
fn test_reload_does_not_warn_on_interp_create() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let ctx = Arc::new(LoadContext::new());
        let runtime = Runtime::default();
        runtime.load_module(&ctx, Some("S"), "M").unwrap();
        runtime.load_module(&ctx, Some("S"), "M").unwrap();

        for _ in 0..3 {
            let interp = runtime.create_interp("S").unwrap();
            assert_eq!(interp.len(), 1);
        }
    });

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(output.is_empty(), "unexpected warnings: {output}");
}

/// Test: a load without a virtual server fails and binds nothing
#[test]
fn test_load_without_server() {
    init_tracing();
    let ctx = Arc::new(LoadContext::new());
    let runtime = Runtime::default();

    let err = runtime.load_module(&ctx, None, "M").unwrap_err();
    assert!(matches!(
        err,
        HostError::Module(ModuleError::Configuration { .. })
    ));
    assert_eq!(ctx.loaded(), 0);

    let interp = runtime.create_interp("S").unwrap();
    let err = interp.eval(&[COMMAND_NAME, "World"]).unwrap_err();
    assert_eq!(err, CommandError::UnknownCommand(COMMAND_NAME.to_string()));
    assert!(!err.is_argument_error());
}

/// Test: separate load contexts keep separate counts
#[test]
fn test_load_contexts_are_independent() {
    let runtime_a = Runtime::default();
    let runtime_b = Runtime::default();
    let ctx_a = Arc::new(LoadContext::new());
    let ctx_b = Arc::new(LoadContext::new());

    runtime_a.load_module(&ctx_a, Some("S"), "M").unwrap();
    runtime_a.load_module(&ctx_a, Some("S2"), "M").unwrap();
    runtime_b.load_module(&ctx_b, Some("S"), "M").unwrap();

    assert_eq!(ctx_a.loaded(), 2);
    assert_eq!(ctx_b.loaded(), 1);
}
