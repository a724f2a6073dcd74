//! CLI output formatting and log setup.

use tracing_subscriber::EnvFilter;

pub fn debug_enabled() -> bool {
    std::env::var_os("WALLBRIDGE_DEBUG").is_some_and(|v| !v.is_empty())
}

/// `WALLBRIDGE_LOG` directives; unset or unparsable falls back to `warn`.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_env("WALLBRIDGE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to stderr, filtered by `WALLBRIDGE_LOG`.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn print_error(err: &anyhow::Error) {
    eprintln!("{}", render_error(err, debug_enabled()));
}

/// Outermost context only, or the whole chain when debugging.
fn render_error(err: &anyhow::Error, verbose: bool) -> String {
    if verbose {
        format!("{err:#}")
    } else {
        err.to_string()
    }
}
