//! Diagnostic logging for the command line tools.
//!
//! Reports meant for the user are printed to stdout; diagnostics go through
//! [`tracing`] to stderr and are filtered with `RUST_LOG` (default `warn`).

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global stderr subscriber.
///
/// Invalid `RUST_LOG` directives are skipped rather than rejected. Calling this
/// more than once keeps the first subscriber.
pub fn setup_logger() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::IsTerminal::is_terminal(&std::io::stderr()))
                .with_target(false)
                .compact(),
        )
        .with(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_is_idempotent() {
        setup_logger();
        setup_logger();
        tracing::debug!("logger installed");
    }
}
