//! Logging configuration using tracing.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "todo=info,todo_core=info,warn";

/// Install the global subscriber. Output goes to stderr so it never mixes
/// with the item listing on stdout.
///
/// The level is controlled by the `TODO_LOG` environment variable:
/// ```bash
/// TODO_LOG=todo_core=debug todo list
/// ```
pub fn init() {
    let env_filter =
        EnvFilter::try_from_env("TODO_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();
}
