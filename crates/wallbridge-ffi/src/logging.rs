//! Opt-in log output for host processes that load the library.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install a stderr subscriber if `WALLBRIDGE_LOG` is set.
///
/// A subscriber the host already installed is left alone.
pub fn init() {
    INIT.call_once(|| {
        let Some(filter) = std::env::var("WALLBRIDGE_LOG").ok().filter(|v| !v.is_empty()) else {
            return;
        };
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_writer(std::io::stderr)
            .try_init();
    });
}
