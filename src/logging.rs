//! Tracing setup
//!
//! stdout carries the MCP protocol, so log lines always go to stderr.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter used when neither `RUST_LOG` nor the config file sets one
pub const DEFAULT_FILTER: &str = "study_planner=info";

/// Pick the filter directive: `RUST_LOG` wins over the configured value
pub fn filter_directive(configured: Option<&str>) -> String {
    std::env::var("RUST_LOG")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Install the global subscriber; a second call is a no-op
pub fn init(configured: Option<&str>) {
    let filter = EnvFilter::new(filter_directive(configured));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init();
}
