//! Battery telemetry as it comes off the platform, and the rules that turn it
//! into something a person can read.
//!
//! [`RawBatteryFields`] is what the acquisition layer hands over: every field
//! is independently optional and carries the platform's own units and codes.
//! [`normalize`] renders it into a [`BatteryReport`] of unit-suffixed strings
//! plus the derived health ratio. Nothing in this crate performs I/O.

mod format;
mod raw;
mod report;
mod tables;

pub use format::{
    compute_health, convert_runtime_minutes, format_capacity, format_charge, format_cycles,
    format_health, format_temperature, format_voltage, HEALTH_UNAVAILABLE, UNKNOWN,
};
pub use raw::{
    RawBatteryFields, MAX_PLAUSIBLE_RUNTIME_MINUTES, MILLIVOLT_THRESHOLD,
    RUNTIME_UNKNOWN_SENTINEL,
};
pub use report::{normalize, AdvancedInfo, BatteryReport};
pub use tables::{chemistry_label, status_label, CHEMISTRY_CODES, STATUS_CODES};
