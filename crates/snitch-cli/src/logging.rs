// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the Snitch CLI.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging on
//! stderr. The `RUST_LOG` environment variable overrides the defaults; the
//! reporter's delivery diagnostics surface at the `snitch_core` target.
//!
//! # Examples
//!
//! ```bash
//! # Default: info level
//! snitch report --message "boom"
//!
//! # Transport-level debugging
//! RUST_LOG=snitch_core=debug snitch report --message "boom"
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging subsystem.
///
/// The `-v` flag raises the default filter to debug level for Snitch's own
/// crates; `RUST_LOG` takes precedence when set.
pub fn init_logging(verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let default_filter = if verbose {
        "snitch=debug,snitch_core=debug,snitch_cli=debug"
    } else {
        "snitch=info,snitch_core=info,snitch_cli=info"
    };
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .expect("valid default filter directives");

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
