//! Tracing initialization

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding an explicit filter, e.g. `LCE_LOG=lce=debug`
pub const LOG_ENV: &str = "LCE_LOG";

static INIT: Once = Once::new();

/// Filter directive for a `-v` count when `LCE_LOG` is not set
pub fn level_for(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "lce=error";
    }
    match verbosity {
        0 => "lce=warn",
        1 => "lce=info",
        2 => "lce=debug",
        _ => "lce=trace",
    }
}

/// Install the stderr subscriber. Safe to call more than once.
pub fn init_tracing(verbosity: u8, quiet: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity, quiet)));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .without_time(),
            )
            .with(filter)
            .init();
    });
}
