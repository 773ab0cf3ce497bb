//! Tracing subscriber setup for the command-line tool

use tracing_subscriber::EnvFilter;

/// Log level used for a given `-v` count
///
/// `RUST_LOG` takes precedence when set.
pub const fn level_for(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a stderr subscriber filtered by `RUST_LOG` or the verbosity
///
/// Returns false when a global subscriber was already installed.
pub fn init_logging(verbosity: u8, quiet: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cshape={}", level_for(verbosity, quiet))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
