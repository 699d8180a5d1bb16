//! Logging initialisation.
//!
//! The terminal belongs to the UI, so logs only go to `<dir>/journal.log`.
//! `RUST_LOG` wins over the configured level when set.

use crate::config::LoggingConfig;
use tracing_appender::non_blocking;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Returns a guard that must be held until shutdown, otherwise buffered lines are lost.
pub fn init(config: &LoggingConfig) -> std::io::Result<non_blocking::WorkerGuard> {
    std::fs::create_dir_all(&config.dir)?;
    let file_appender = tracing_appender::rolling::never(&config.dir, "journal.log");
    let (file_writer, guard) = non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(file_writer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_log_file_in_configured_dir() {
        let dir = std::env::temp_dir().join(format!("mindful-journal-logs-{}", std::process::id()));
        let config = LoggingConfig {
            level: "debug".into(),
            dir: dir.clone(),
        };
        let guard = init(&config).unwrap();
        tracing::info!("logging ready");
        drop(guard);
        assert!(dir.join("journal.log").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
