//! Log sinks: console and size-capped rotating file

use std::path::Path;

use file_rotate::compression::Compression;
use file_rotate::suffix::AppendCount;
use file_rotate::{ContentLimit, FileRotate};
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::BotError;

/// Install the global subscriber.
///
/// `RUST_LOG` overrides `level` when set. The returned guard flushes the file
/// sink on drop and must be held for the life of the process.
pub fn init(config: &LoggingConfig, level: Level) -> crate::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let console = config
        .console
        .then(|| fmt::layer().with_writer(std::io::stdout));

    let (file, guard) = match &config.file {
        Some(path) => {
            let appender = file_appender(path, config.max_bytes, config.backup_count)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| BotError::Config(format!("Failed to install log subscriber: {}", e)))?;

    Ok(guard)
}

/// Size-capped log file; rotated files are kept as `<file>.1` .. `<file>.<backup_count>`
pub fn file_appender(
    path: &Path,
    max_bytes: usize,
    backup_count: usize,
) -> crate::Result<FileRotate<AppendCount>> {
    if path.file_name().is_none() {
        return Err(BotError::Config(format!(
            "Log file path {:?} has no file name",
            path
        )));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    Ok(FileRotate::new(
        path,
        AppendCount::new(backup_count),
        ContentLimit::Bytes(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    ))
}
