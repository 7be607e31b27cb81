//! Tracing setup that never touches the managed terminal.
//!
//! The runtime owns stdout while a program runs, so log output goes to a side
//! file instead. Logging is opt-in: with no `FLIGHTDECK_LOG` in the
//! environment, [`init`] does nothing and the tracing macros are no-ops.
//!
//! ```text
//! FLIGHTDECK_LOG=debug FLIGHTDECK_LOG_FILE=/tmp/fd.log flightdeck-demo
//! ```

use std::fs::OpenOptions;
use std::sync::Mutex;

// Re-export tracing macros at crate root for ergonomic use.
pub use tracing::{debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn,
    warn_span};

use tracing_subscriber::EnvFilter;

/// Default log file path when `FLIGHTDECK_LOG_FILE` is unset.
pub const DEFAULT_LOG_FILE: &str = "flightdeck.log";

/// Install a global file subscriber filtered by `FLIGHTDECK_LOG`.
///
/// Silently does nothing when `FLIGHTDECK_LOG` is unset, when the log file
/// cannot be opened, or when a global subscriber is already installed. A demo
/// must keep running even if its diagnostics cannot.
pub fn init() {
    let Ok(filter) = std::env::var("FLIGHTDECK_LOG") else {
        return;
    };
    let path =
        std::env::var("FLIGHTDECK_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
