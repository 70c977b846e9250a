use tracing_subscriber::{EnvFilter, fmt};

/// Log to stderr so game output on stdout stays readable. `RUST_LOG`
/// overrides `level`.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
