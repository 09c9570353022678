use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logs go to stderr so `--json` reports on stdout stay machine-readable.
pub fn init(verbose: bool) {
    let default_level = if verbose { "studykeeper=debug" } else { "studykeeper=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
