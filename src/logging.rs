use crate::config::LogFormat;
use std::io;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global tracing subscriber.
/// - Respects `RUST_LOG` if set, otherwise `info,tower_http=info,axum=info`
/// - Writes to stdout, either compact lines or one JSON object per event
pub fn init_logging(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum=info"));

    let builder = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stdout);

    // try_init: a subscriber may already be installed (tests)
    let _ = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
