//! Tracing subscriber setup for the CLI.

use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "flexprobe=info,warn";
const VERBOSE_FILTER: &str =
    "flexprobe=debug,flexprobe_api=debug,flexprobe_config=debug,flexprobe_decode=debug,flexprobe_engine=debug,flexprobe_session=debug,info";

/// Check if colored output should be used.
///
/// Returns true only if:
/// - stdout is a terminal (TTY)
/// - NO_COLOR environment variable is not set
fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects the debug filter.
/// Initialization failures are ignored so repeated calls (tests) are safe.
pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            if verbose {
                EnvFilter::try_new(VERBOSE_FILTER)
            } else {
                EnvFilter::try_new(DEFAULT_FILTER)
            }
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_line_number(false)
                .with_file(false)
                .with_ansi(use_color())
                .compact(),
        )
        .try_init();
}
