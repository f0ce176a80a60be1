use crate::config::AppConfig;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber for the process.
///
/// Honors `RUST_LOG` when set, falling back to the configured log level.
/// Safe to call once per process; embedders that install their own
/// subscriber should skip this.
pub fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let builder = fmt().with_env_filter(filter).with_target(true);

    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}
