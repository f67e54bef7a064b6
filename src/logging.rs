//! Tracing setup for the form app.
//!
//! Every launch writes to stdout and to its own `detailform_<stamp>.log` file
//! under the logs directory. Only the newest [`MAX_LOG_FILES`] of our own files
//! are kept; other `.log` files sharing the directory are left alone.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::OnceLock,
    time::SystemTime,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs;

/// Maximum number of log files to retain.
pub const MAX_LOG_FILES: usize = 10;
/// Environment variable holding a filter directive, checked before `RUST_LOG`.
pub const LOG_FILTER_ENV: &str = "DETAILFORM_LOG";
const LOG_FILE_PREFIX: &str = "detailform_";
const LOG_FILE_EXT: &str = "log";
/// ureq logs every connection at debug; keep it quiet unless asked for.
const DEFAULT_FILTER: &str = "info,ureq=warn";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// No platform-specific data directory could be resolved.
    #[error("No suitable data directory available for logs")]
    NoDataDir,
    /// Failed to create or access the log directory.
    #[error("Failed to prepare log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read log directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to remove old log file {path}: {source}")]
    RemoveFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to format log filename time: {0}")]
    FormatTime(time::error::Format),
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(tracing::subscriber::SetGlobalDefaultError),
    #[error("Failed to create log file at {path}: {source}")]
    CreateLogFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The file this launch logs into.
#[derive(Clone, Debug, PartialEq, Eq)]
struct LaunchLog {
    dir: PathBuf,
    file_name: String,
}

impl LaunchLog {
    fn new(dir: PathBuf, started: OffsetDateTime) -> Result<Self, LoggingError> {
        const NAME_FORMAT: &[FormatItem<'_>] =
            format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
        let stamp = started.format(NAME_FORMAT).map_err(LoggingError::FormatTime)?;
        Ok(Self {
            dir,
            file_name: format!("{LOG_FILE_PREFIX}{stamp}.{LOG_FILE_EXT}"),
        })
    }

    fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    fn create(&self) -> Result<(), LoggingError> {
        let path = self.path();
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map(|_| ())
            .map_err(|source| LoggingError::CreateLogFile { path, source })
    }

    /// Delete the oldest of our own log files until `keep` remain.
    ///
    /// The current launch's file always survives, whatever its mtime.
    fn prune_siblings(&self, keep: usize) -> Result<usize, LoggingError> {
        let mut older: Vec<(SystemTime, PathBuf)> = fs::read_dir(&self.dir)
            .map_err(|source| LoggingError::ReadDir {
                path: self.dir.clone(),
                source,
            })?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_ok_and(|ft| ft.is_file()))
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| is_own_log(name) && name != self.file_name)
            })
            .map(|entry| {
                let modified = entry
                    .metadata()
                    .and_then(|meta| meta.modified())
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                (modified, entry.path())
            })
            .collect();

        let room = keep.saturating_sub(1);
        if older.len() <= room {
            return Ok(0);
        }
        older.sort_by_key(|(modified, _)| *modified);
        let excess = older.len() - room;
        for (_, path) in older.into_iter().take(excess) {
            fs::remove_file(&path).map_err(|source| LoggingError::RemoveFile { path, source })?;
        }
        Ok(excess)
    }
}

/// Install the global subscriber writing to stdout and this launch's log file.
///
/// Calling it again after a successful init does nothing. Errors are returned
/// so `main` can fall back to stderr and keep going.
pub fn init() -> Result<(), LoggingError> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let log_dir = app_dirs::logs_dir().map_err(map_app_dir_error)?;
    let launch = LaunchLog::new(log_dir, now_local_or_utc())?;
    launch.create()?;
    let pruned = launch.prune_siblings(MAX_LOG_FILES)?;

    let (file_writer, guard) =
        tracing_appender::non_blocking(rolling::never(&launch.dir, &launch.file_name));
    let timer = build_timer();
    let subscriber = Registry::default()
        .with(env_filter(|key| std::env::var(key).ok()))
        .with(
            fmt::layer()
                .with_timer(timer.clone())
                .with_writer(std::io::stdout),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_timer(timer)
                .with_writer(file_writer),
        );
    tracing::subscriber::set_global_default(subscriber).map_err(LoggingError::SetGlobal)?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!(path = %launch.path().display(), pruned, "Logging initialized");
    Ok(())
}

fn is_own_log(name: &str) -> bool {
    name.strip_prefix(LOG_FILE_PREFIX)
        .and_then(|rest| rest.strip_suffix(LOG_FILE_EXT))
        .is_some_and(|stem| stem.ends_with('.'))
}

/// Pick the filter directive: `DETAILFORM_LOG`, then `RUST_LOG`, then the default.
///
/// A directive that fails to parse falls through to the next source.
fn env_filter(lookup: impl Fn(&str) -> Option<String>) -> EnvFilter {
    [LOG_FILTER_ENV, EnvFilter::DEFAULT_ENV]
        .into_iter()
        .filter_map(|key| lookup(key))
        .map(|directive| directive.trim().to_string())
        .filter(|directive| !directive.is_empty())
        .find_map(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

fn build_timer() -> fmt::time::OffsetTime<time::format_description::BorrowedFormatItem<'static>> {
    const DISPLAY_FORMAT: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, DISPLAY_FORMAT.into())
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> LoggingError {
    match error {
        app_dirs::AppDirError::NoBaseDir => LoggingError::NoDataDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            LoggingError::CreateDir { path, source }
        }
    }
}
