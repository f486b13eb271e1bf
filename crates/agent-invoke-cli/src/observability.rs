use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

use crate::config::parse_bool_env;

const DEFAULT_FILTER: &str = "warn";

/// Picks the log filter: `AGENT_CHAT_LOG_LEVEL`, then `RUST_LOG`, then `warn`.
/// An unparsable value falls through to the next source.
fn log_filter(level: Option<&str>, rust_log: Option<&str>) -> EnvFilter {
    [level, rust_log]
        .into_iter()
        .flatten()
        .find_map(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs a stderr `tracing` subscriber. Stdout carries only the reply.
///
/// Set `AGENT_CHAT_OBSERVABILITY=off` to disable logging entirely.
pub fn init_observability() {
    let enabled = std::env::var("AGENT_CHAT_OBSERVABILITY")
        .ok()
        .and_then(|v| parse_bool_env(&v))
        .unwrap_or(true);
    if !enabled {
        return;
    }

    let level = std::env::var("AGENT_CHAT_LOG_LEVEL").ok();
    let rust_log = std::env::var("RUST_LOG").ok();
    let console_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);
    let _ = tracing_subscriber::registry()
        .with(log_filter(level.as_deref(), rust_log.as_deref()))
        .with(console_layer)
        .try_init();
}
