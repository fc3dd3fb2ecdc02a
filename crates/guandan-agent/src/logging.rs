use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogFormat, LoggingConfig};

/// Keeps the background writer alive; dropping it flushes buffered events.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// Installs the global subscriber. Events go to the configured file or to stderr, never
/// to stdout, which carries protocol responses.
pub fn init_logging(logging: &LoggingConfig) -> Result<LoggingGuard> {
    let builder = non_blocking::NonBlockingBuilder::default().lossy(false);
    let (writer, guard) = match logging.file.as_deref() {
        Some(path) => builder.finish(open_log_file(path)?),
        None => builder.finish(std::io::stderr()),
    };

    let level = logging.level().unwrap_or(Level::INFO);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer);

    // Ignore error if a global subscriber is already set (e.g., when running in tests)
    let _ = match logging.format {
        LogFormat::Json => {
            let subscriber = subscriber.json().with_current_span(false).finish();
            tracing::subscriber::set_global_default(subscriber)
        }
        LogFormat::Pretty => tracing::subscriber::set_global_default(
            subscriber.with_ansi(logging.file.is_none()).finish(),
        ),
    };

    Ok(LoggingGuard { _guard: guard })
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory at {}", parent.display()))?;
    }
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file at {}", path.display()))
}
