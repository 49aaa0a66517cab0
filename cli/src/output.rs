use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};
use clap::ValueEnum;
use color_eyre::eyre::{Result, WrapErr};
use juicecheck_platform::BasicStatus;
use juicecheck_report::AdvancedInfo;
use serde::{Deserialize, Serialize};

const CSV_HEADERS: [&str; 4] = ["timestamp", "percent", "plugged", "health"];
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Everything one run collected, as exported.
#[derive(Debug, Clone, Serialize)]
pub struct BatteryRecord {
    pub timestamp: DateTime<Local>,
    pub basic: BasicStatus,
    pub advanced: AdvancedInfo,
}

impl BatteryRecord {
    pub fn new(basic: BasicStatus, advanced: AdvancedInfo) -> Self {
        Self {
            timestamp: Local::now(),
            basic,
            advanced,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Header plus one row: timestamp, percent, plugged, health.
    pub fn to_csv(&self) -> String {
        let values = [
            self.timestamp.to_rfc3339(),
            self.basic.percent.to_string(),
            self.basic.plugged.to_string(),
            self.advanced
                .health()
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
        ];

        format!("{}\n{}", CSV_HEADERS.join(","), values.join(","))
    }

    /// Write to `path`, as CSV for a `.csv` extension and JSON otherwise.
    pub fn export(&self, path: &Path) -> Result<()> {
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        let content = if is_csv {
            self.to_csv()
        } else {
            self.to_json()?
        };

        fs::write(path, content).wrap_err_with(|| format!("failed to write {}", path.display()))
    }
}
