//! Process-wide logging bootstrap.
//!
//! # Responsibility
//! - Start one rolling file logger per process.
//! - Capture panics into the log before the previous hook runs.
//! - Keep events metadata-only: ids, counts and outcomes, never item text.
//!
//! # Invariants
//! - Re-initializing with the same level and directory is a no-op.
//! - Re-initializing with a different level or directory is rejected.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "tasklist";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 5;
const PANIC_PAYLOAD_MAX_CHARS: usize = 160;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct ActiveLogger {
    level: &'static str,
    log_dir: PathBuf,
    _handle: LoggerHandle,
}

/// Logging bootstrap failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    UnsupportedLevel(String),
    InvalidLogDir(String),
    CreateDir { dir: PathBuf, reason: String },
    Backend(String),
    AlreadyInitialized { setting: &'static str, active: String, requested: String },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::InvalidLogDir(reason) => write!(f, "invalid log_dir: {reason}"),
            Self::CreateDir { dir, reason } => write!(
                f,
                "failed to create log directory `{}`: {reason}",
                dir.display()
            ),
            Self::Backend(reason) => write!(f, "failed to start logger: {reason}"),
            Self::AlreadyInitialized {
                setting,
                active,
                requested,
            } => write!(
                f,
                "logging already initialized with {setting} `{active}`; refusing to switch to `{requested}`"
            ),
        }
    }
}

impl Error for LoggingError {}

/// Starts file logging under `log_dir` at `level`.
///
/// # Errors
/// - `level` is not one of `trace|debug|info|warn|error` (`warning` accepted).
/// - `log_dir` is blank, relative, or cannot be created.
/// - Logging is already active with a different level or directory.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), LoggingError> {
    let level = parse_level(level)?;
    let log_dir = parse_log_dir(log_dir)?;

    let active = ACTIVE_LOGGER.get_or_try_init(|| start_logger(level, &log_dir))?;
    ensure_same_config(active, level, &log_dir)
}

/// Returns `(level, log_dir)` of the active logger, if started.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE_LOGGER
        .get()
        .map(|active| (active.level, active.log_dir.clone()))
}

/// `debug` in debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(level: &'static str, log_dir: &Path) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(log_dir).map_err(|err| LoggingError::CreateDir {
        dir: log_dir.to_path_buf(),
        reason: err.to_string(),
    })?;

    let handle = Logger::try_with_str(level)
        .map_err(|err| LoggingError::Backend(err.to_string()))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        // [YYYY-MM-DD HH:MM:SS.ffffff TZ] LEVEL [module] file:line: message
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    install_panic_hook();

    info!(
        "event=app_start module=core status=ok platform={} version={} level={} log_dir={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        level,
        log_dir.display()
    );

    Ok(ActiveLogger {
        level,
        log_dir: log_dir.to_path_buf(),
        _handle: handle,
    })
}

fn ensure_same_config(
    active: &ActiveLogger,
    level: &'static str,
    log_dir: &Path,
) -> Result<(), LoggingError> {
    if active.log_dir != log_dir {
        return Err(LoggingError::AlreadyInitialized {
            setting: "log_dir",
            active: active.log_dir.display().to_string(),
            requested: log_dir.display().to_string(),
        });
    }
    if active.level != level {
        return Err(LoggingError::AlreadyInitialized {
            setting: "level",
            active: active.level.to_string(),
            requested: level.to_string(),
        });
    }
    Ok(())
}

fn parse_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(LoggingError::UnsupportedLevel(other.to_string())),
    }
}

fn parse_log_dir(log_dir: &str) -> Result<PathBuf, LoggingError> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err(LoggingError::InvalidLogDir("cannot be empty".to_string()));
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(LoggingError::InvalidLogDir(format!(
            "must be an absolute path, got `{trimmed}`"
        )));
    }
    Ok(path.to_path_buf())
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        // Payload may carry item text: single line, capped length.
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location,
            single_line_truncated(&payload, PANIC_PAYLOAD_MAX_CHARS)
        );
        previous_hook(panic_info);
    }));
}

fn single_line_truncated(value: &str, max_chars: usize) -> String {
    let flattened = value.replace(['\n', '\r'], " ");
    if flattened.chars().count() <= max_chars {
        return flattened;
    }
    let mut truncated: String = flattened.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}
