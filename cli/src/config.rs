use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use juicecheck_platform::{AcquireOptions, DEFAULT_REPORT_TIMEOUT};
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::output::OutputFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "off" | "none" => LogLevel::Off,
            "error" => LogLevel::Error,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => LogLevel::Warn,
        }
    }

    pub fn as_tracing_level(&self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

/// Thresholds for the warnings printed after the text report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Charge percent at or below which a critical warning is shown.
    pub critical_charge: u8,
    /// Charge percent at or below which a low-battery warning is shown.
    pub low_charge: u8,
    /// Health percent below which replacement is suggested.
    pub health_warning: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            critical_charge: 10,
            low_charge: 20,
            health_warning: 80.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub log_level: LogLevel,
    pub log_to_file: bool,
    pub format: OutputFormat,
    pub color: bool,
    pub report_timeout_secs: u64,
    pub alerts: AlertConfig,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            log_to_file: false,
            format: OutputFormat::Text,
            color: true,
            report_timeout_secs: DEFAULT_REPORT_TIMEOUT.as_secs(),
            alerts: AlertConfig::default(),
        }
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("juicecheck")
}

pub fn log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("juicecheck")
        .join("logs")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

impl UserConfig {
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Missing or unparseable files fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> std::io::Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        fs::write(path, content)
    }

    pub fn acquire_options(&self) -> AcquireOptions {
        AcquireOptions {
            report_timeout: Duration::from_secs(self.report_timeout_secs.max(1)),
        }
    }
}
