//! Logging Infrastructure
//!
//! Structured logging setup for the embedding request layer.

use crate::config::Config;
use tracing_subscriber::EnvFilter;

/// Initialize the logger from configuration
///
/// `RUST_LOG` overrides the configured level. With a log directory set,
/// output also goes to a daily-rolling file.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = &config.log_dir {
        let log_path = std::path::Path::new(dir);
        if log_path.exists() {
            let file_appender = tracing_appender::rolling::daily(dir, "shop-server");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}
