use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber once. `RUST_LOG` wins over `-v` flags.
/// Logs go to stderr so stdout only carries command output.
pub fn init_logging(verbose: u8) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
