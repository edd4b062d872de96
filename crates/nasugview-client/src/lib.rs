//! # nasugview-client
//!
//! Screen controllers, session handling and navigation for the NasugView
//! consumer client. The `nasugview` binary drives these from the terminal.

pub mod config;
pub mod error;
pub mod navigation;
pub mod notice;
pub mod refresh;
pub mod screens;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ClientConfig;
pub use error::{ClientError, FailureKind};
pub use state::AppState;

use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_LOG_FILTER: &str =
    "nasugview=info,nasugview_client=debug,nasugview_net=info,nasugview_store=info,warn";

const VERBOSE_LOG_FILTER: &str = "debug";

/// Install the global `tracing` subscriber. `RUST_LOG` wins over both
/// built-in filters.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        })
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
