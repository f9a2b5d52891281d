//! Logging initialization with environment-based formatters
//!
//! - Production (or `LOG_FORMAT=json`): structured JSON lines
//! - Anything else: colored, human-readable output

use crate::config::get_environment;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// JSON output is chosen from `APP_ENV` unless `LOG_FORMAT` says otherwise.
pub fn use_json_format(environment: &str, log_format: Option<&str>) -> bool {
    match log_format.map(|f| f.trim().to_ascii_lowercase()) {
        Some(f) if f == "json" => true,
        Some(f) if f == "pretty" || f == "text" => false,
        _ => matches!(environment, "production" | "prod"),
    }
}

/// Install the global subscriber. `RUST_LOG` filters, default `info`.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_format = std::env::var("LOG_FORMAT").ok();

    if use_json_format(&get_environment(), log_format.as_deref()) {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(false)
                    .with_writer(std::io::stdout),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .init();
    }
}
