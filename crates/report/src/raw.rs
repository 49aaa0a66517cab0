use serde::{Deserialize, Serialize};

/// Runtime value some firmware reports when the estimate is not available.
pub const RUNTIME_UNKNOWN_SENTINEL: i64 = 71_582_788;

/// Anything above a full day of runtime is a placeholder, not an estimate.
pub const MAX_PLAUSIBLE_RUNTIME_MINUTES: i64 = 1440;

/// Design voltages above this are millivolts, at or below it volts.
///
/// Empirical: vendors report either unit in the same property.
pub const MILLIVOLT_THRESHOLD: i64 = 100;

/// Battery fields exactly as the platform reported them.
///
/// Every field is independent; one missing value never prevents the others
/// from being rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBatteryFields {
    /// Device or model identifier.
    pub name: Option<String>,

    /// Instantaneous charge level, 0-100.
    pub estimated_charge: Option<u8>,

    /// Vendor status enumeration (see [`crate::STATUS_CODES`]).
    pub status_code: Option<u16>,

    /// Estimated minutes remaining. May hold [`RUNTIME_UNKNOWN_SENTINEL`].
    pub runtime_minutes: Option<i64>,

    /// Chemistry enumeration (see [`crate::CHEMISTRY_CODES`]).
    pub chemistry_code: Option<u16>,

    /// Design voltage in millivolts or volts; see [`MILLIVOLT_THRESHOLD`].
    pub design_voltage_raw: Option<i64>,

    /// Nameplate capacity in mWh.
    pub design_capacity: Option<u32>,

    /// Current maximum capacity in mWh.
    pub full_charge_capacity: Option<u32>,

    pub cycle_count: Option<u32>,

    /// Tenths of a degree Kelvin.
    pub temperature_raw: Option<f64>,
}
