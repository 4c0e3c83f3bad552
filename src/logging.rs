//! Diagnostic logging to stderr.
//!
//! User-facing output goes to stdout through `println!`; everything here is
//! for troubleshooting and stays quiet unless asked for.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map `-v` repetitions to a default filter:
/// - 0: warn
/// - 1: info (-v)
/// - 2: debug (-vv)
/// - 3+: trace (-vvv)
pub fn level_for(verbosity: u8) -> tracing::Level {
    match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

/// Initialize tracing. `RUST_LOG` overrides the verbosity flag when set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("shipai={}", level_for(verbosity))));

    // A second init (tests calling into main paths) is harmless
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .try_init();
}
