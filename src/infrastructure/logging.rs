//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The terminal is owned by the UI while the app runs, so log output always
//! goes to a file. `RUST_LOG` overrides the configured level.
//!
//! # Log Levels
//!
//! - `warn`: failed lookups, rejected selections
//! - `info`: session lifecycle
//! - `debug`: every fetch issued, applied, or discarded

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line human readable output.
    #[default]
    Pretty,
    /// Single-line output.
    Compact,
}

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub format: LogFormat,
    /// Whether to include the module path in each line.
    pub with_target: bool,
    pub log_file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::default(),
            with_target: true,
            log_file: PathBuf::from("locsel.log"),
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: PathBuf) -> Self {
        self.log_file = path;
        self
    }
}

/// Installs the global subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
///
/// # Panics
///
/// Panics if a global subscriber was already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let file = open_log_file(&config.log_file)?;
    let filter = build_env_filter(config.level);
    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(config.with_target);

    match config.format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(layer.pretty())
            .init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact())
            .init(),
    }
    Ok(())
}

/// Opens `path` for appending, creating it and its parent directory.
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Dependencies stay at warn to keep the file readable.
        EnvFilter::new(format!("warn,locsel={}", level.as_str().to_lowercase()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.log_file, PathBuf::from("locsel.log"));
    }

    #[test]
    fn test_builder_methods() {
        let config = LogConfig::default()
            .with_level(Level::TRACE)
            .with_format(LogFormat::Compact)
            .with_log_file(PathBuf::from("custom.log"));
        assert_eq!(config.level, Level::TRACE);
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.log_file, PathBuf::from("custom.log"));
    }

    #[test]
    fn test_open_log_file_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/deep/locsel.log");

        let mut file = open_log_file(&path).unwrap();
        writeln!(file, "first").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locsel.log");
        std::fs::write(&path, "earlier session\n").unwrap();

        let mut file = open_log_file(&path).unwrap();
        writeln!(file, "this session").unwrap();
        drop(file);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "earlier session\nthis session\n");
    }
}
