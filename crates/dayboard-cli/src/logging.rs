use tracing_subscriber::EnvFilter;

/// Route tracing output to stderr so stdout stays clean for tables.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
