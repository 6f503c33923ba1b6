//! Command line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use reqwest::Url;
use tracing::Level;

use super::logging::{LogConfig, LogFormat};

/// Location service used when no `--base-url` is given.
pub const DEFAULT_BASE_URL: &str = "https://crio-location-selector.onrender.com";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "locsel",
    version,
    about = "Pick a country, then a state, then a city from a location service"
)]
pub struct AppConfig {
    /// Base URL of the location lookup service.
    #[arg(
        long = "base-url",
        env = "LOCSEL_BASE_URL",
        value_name = "URL",
        default_value = DEFAULT_BASE_URL,
        value_parser = parse_base_url
    )]
    pub base_url: Url,

    /// Per-request timeout in seconds (HTTP client default when unset).
    #[arg(long = "timeout-secs", env = "LOCSEL_TIMEOUT_SECS", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// File that receives log output; the terminal itself is taken by the UI.
    #[arg(
        long = "log-file",
        env = "LOCSEL_LOG_FILE",
        value_name = "PATH",
        default_value = "locsel.log"
    )]
    pub log_file: PathBuf,

    /// Log level (RUST_LOG takes precedence when set).
    #[arg(long = "log-level", value_enum, default_value = "info")]
    pub log_level: LogLevelArg,

    /// Log line layout.
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
}

impl AppConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn log_config(&self) -> LogConfig {
        let level = match self.log_level {
            LogLevelArg::Error => Level::ERROR,
            LogLevelArg::Warn => Level::WARN,
            LogLevelArg::Info => Level::INFO,
            LogLevelArg::Debug => Level::DEBUG,
            LogLevelArg::Trace => Level::TRACE,
        };
        let format = match self.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
        };
        LogConfig::default()
            .with_level(level)
            .with_format(format)
            .with_log_file(self.log_file.clone())
    }
}

/// Accepts absolute `http`/`https` URLs that can carry a path.
fn parse_base_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|e| format!("invalid URL '{}': {}", value, e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}', expected http or https", url.scheme()));
    }
    if url.cannot_be_a_base() {
        return Err(format!("'{}' cannot be used as a base URL", value));
    }
    Ok(url)
}
