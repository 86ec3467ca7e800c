//! CLI argument parsing and command handlers

pub mod args;
pub mod commands;

pub use args::{Cli, Invocation};
pub use commands::{export, import};

use tracing_subscriber::EnvFilter;

/// Initialise logging to stderr. `RUST_LOG` overrides the default level.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "propsxls=debug" } else { "propsxls=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
