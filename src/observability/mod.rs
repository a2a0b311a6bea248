//! Logging setup and crash reports.
//!
//! ```ignore
//! use scorecast::observability::{init_logging, install_panic_hook};
//!
//! fn main() {
//!     install_panic_hook();
//!     init_logging(cli.verbosity);
//! }
//! ```

pub mod panic_hook;

pub use panic_hook::install_panic_hook;

use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Log level for a `-v` count: warnings by default, then info, debug, trace.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `verbosity` when set. Records from the `log` crate
/// are forwarded. Calling this twice is harmless; the first subscriber stays.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .with_ansi(std::io::stderr().is_terminal());

    if Registry::default()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Logging already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for_verbosity(0), "warn");
        assert_eq!(level_for_verbosity(1), "info");
        assert_eq!(level_for_verbosity(2), "debug");
        assert_eq!(level_for_verbosity(7), "trace");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logging(0);
        init_logging(3);
    }
}
