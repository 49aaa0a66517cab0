use std::fmt;

use serde::Serialize;

use crate::format::{
    compute_health, convert_runtime_minutes, format_capacity, format_charge, format_cycles,
    format_health, format_temperature, format_voltage, UNKNOWN,
};
use crate::raw::RawBatteryFields;
use crate::tables::{chemistry_label, status_label};

/// Display-ready battery record. Output only: `health_percent` is not
/// serialized, so there is no matching `Deserialize`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatteryReport {
    pub name: String,
    pub estimated_charge: String,
    pub voltage: String,
    pub status: String,
    pub chemistry: String,
    pub estimated_runtime: String,
    pub design_capacity: String,
    pub full_charge_capacity: String,
    pub health: String,

    /// Only present when the platform reported a cycle count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle_count: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,

    /// Numeric form of `health` for callers that grade it.
    #[serde(skip)]
    pub health_percent: Option<f64>,
}

/// Render raw platform fields into a [`BatteryReport`].
pub fn normalize(raw: &RawBatteryFields) -> BatteryReport {
    let unknown = || UNKNOWN.to_string();
    let health_percent = compute_health(raw.design_capacity, raw.full_charge_capacity);

    BatteryReport {
        name: raw.name.clone().unwrap_or_else(unknown),
        estimated_charge: format_charge(raw.estimated_charge),
        voltage: raw
            .design_voltage_raw
            .map(format_voltage)
            .unwrap_or_else(unknown),
        status: raw
            .status_code
            .map(|code| status_label(code).into_owned())
            .unwrap_or_else(unknown),
        chemistry: raw
            .chemistry_code
            .map(|code| chemistry_label(code).into_owned())
            .unwrap_or_else(unknown),
        estimated_runtime: raw
            .runtime_minutes
            .map(convert_runtime_minutes)
            .unwrap_or_else(unknown),
        design_capacity: format_capacity(raw.design_capacity),
        full_charge_capacity: format_capacity(raw.full_charge_capacity),
        health: format_health(health_percent),
        cycle_count: raw.cycle_count.map(format_cycles),
        temperature: raw.temperature_raw.map(format_temperature),
        health_percent,
    }
}

/// Either a rendered report or the reason acquisition gave up.
///
/// Serialized untagged, so an error is exactly `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AdvancedInfo {
    Error { error: String },
    Report(BatteryReport),
}

impl AdvancedInfo {
    /// Normalize a successful acquisition; pass an error through untouched.
    pub fn from_result<E: fmt::Display>(result: Result<RawBatteryFields, E>) -> Self {
        match result {
            Ok(raw) => AdvancedInfo::Report(normalize(&raw)),
            Err(e) => AdvancedInfo::Error {
                error: e.to_string(),
            },
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AdvancedInfo::Error { error } => Some(error),
            AdvancedInfo::Report(_) => None,
        }
    }

    pub fn report(&self) -> Option<&BatteryReport> {
        match self {
            AdvancedInfo::Report(report) => Some(report),
            AdvancedInfo::Error { .. } => None,
        }
    }

    /// Rendered health string, or `None` when acquisition failed.
    pub fn health(&self) -> Option<&str> {
        self.report().map(|r| r.health.as_str())
    }
}
