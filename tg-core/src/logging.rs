//! Crate-standard `tracing` setup shared by every treegen binary.

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `env_filter` is anything `EnvFilter` understands, so both a bare level (`info`) and per-target
/// directives (`tg_gen=debug,tg_core=warn`) work. Logs go to stderr; stdout is left to the
/// binaries for their own output.
pub fn setup(env_filter: &str) {
    let filter = EnvFilter::try_new(env_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
