/*
* Clockwise Logging Module
* Author: Jannis Krija (https://github.com/cipher-shad0w)
*
* This module sets up file-based tracing. The TUI owns the terminal,
* so nothing is ever logged to stdout or stderr while it runs.
*/

use std::fs::OpenOptions;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable naming the log file
pub const LOG_ENV: &str = "CLOCKWISE_LOG";

/// Initialize tracing when `CLOCKWISE_LOG` points at a file
///
/// Logging is disabled otherwise. The filter defaults to `info` and
/// can be changed with `RUST_LOG`.
pub fn init_tracing() {
    let Ok(log_path) = std::env::var(LOG_ENV) else {
        return;
    };

    let file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: could not open log file {}: {}", log_path, err);
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}
