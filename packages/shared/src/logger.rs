//! Logging setup utilities for the Taiwa chat relay.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crate whose logs are always enabled at the default level.
const LIBRARY_TARGET: &str = "taiwa_server";

/// Filter used when `RUST_LOG` is not set.
///
/// The binary gets its own directive unless it shares the library's target name.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    let mut directives = vec![format!("{LIBRARY_TARGET}={default_log_level}")];
    if binary_target != LIBRARY_TARGET {
        directives.push(format!("{binary_target}={default_log_level}"));
    }
    directives.push(format!("tower_http={default_log_level}"));
    directives.join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the server library crate and the binary itself.
/// It can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "taiwa-server")
/// * `default_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use taiwa_shared::logger::setup_logger;
///
/// setup_logger("taiwa-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!(binary = binary_name, default_log_level, "Logger initialized");
}
