//! The acquisition engine: preconditions, primary read, capacity fallbacks.

use juicecheck_report::RawBatteryFields;
use thiserror::Error;
use tracing::{debug, warn};

use crate::property::{PropertyBag, PropertyValue};
use crate::source::{resolve_capacity, CapacitySource, SourceAttempt, SourceResult};

/// The only conditions that abort an acquisition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquireError {
    #[error("unsupported platform")]
    UnsupportedPlatform,

    #[error("no battery found")]
    NoBattery,
}

/// Scalar fields read directly from the primary battery object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimaryBattery {
    pub name: Option<String>,
    pub estimated_charge: Option<u8>,
    pub status_code: Option<u16>,
    pub runtime_minutes: Option<i64>,
    pub chemistry_code: Option<u16>,
    pub design_voltage_raw: Option<i64>,
}

impl PrimaryBattery {
    /// Read the scalar fields from a `Win32_Battery`-shaped property bag.
    ///
    /// Each property is optional; values of the wrong type or out of range
    /// are dropped individually.
    pub fn from_properties(bag: &PropertyBag) -> Self {
        let int = |name: &str| bag.get(name).and_then(PropertyValue::as_int);

        Self {
            name: bag
                .get("Name")
                .and_then(PropertyValue::as_text)
                .map(str::to_string),
            estimated_charge: int("EstimatedChargeRemaining").and_then(|v| u8::try_from(v).ok()),
            status_code: int("BatteryStatus").and_then(|v| u16::try_from(v).ok()),
            runtime_minutes: int("EstimatedRunTime"),
            chemistry_code: int("Chemistry").and_then(|v| u16::try_from(v).ok()),
            design_voltage_raw: int("DesignVoltage"),
        }
    }
}

/// A host's collection of battery data sources.
pub trait BatteryBackend {
    /// Whether this host supports the advanced queries at all.
    fn is_supported(&self) -> bool;

    fn primary_battery(&self) -> SourceResult<PrimaryBattery>;

    /// Capacity sources in priority order.
    fn capacity_sources(&self) -> Vec<Box<dyn CapacitySource + '_>>;

    fn cycle_count(&self) -> SourceResult<u32>;

    /// Battery temperature in tenths of a Kelvin.
    fn temperature(&self) -> SourceResult<f64>;
}

/// Backend for hosts without advanced battery queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedBackend;

impl BatteryBackend for UnsupportedBackend {
    fn is_supported(&self) -> bool {
        false
    }

    fn primary_battery(&self) -> SourceResult<PrimaryBattery> {
        SourceResult::Empty
    }

    fn capacity_sources(&self) -> Vec<Box<dyn CapacitySource + '_>> {
        Vec::new()
    }

    fn cycle_count(&self) -> SourceResult<u32> {
        SourceResult::Empty
    }

    fn temperature(&self) -> SourceResult<f64> {
        SourceResult::Empty
    }
}

/// Result of a successful acquisition.
#[derive(Debug, Clone, PartialEq)]
pub struct Acquisition {
    pub fields: RawBatteryFields,

    /// Every capacity source that was invoked, in order.
    pub attempts: Vec<SourceAttempt>,
}

pub struct AcquisitionEngine<B> {
    backend: B,
}

impl<B: BatteryBackend> AcquisitionEngine<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Query every source and assemble one record.
    ///
    /// Fails only when the platform is unsupported or there is no battery.
    /// Any other source failure leaves its field empty.
    pub fn acquire(&self) -> Result<Acquisition, AcquireError> {
        if !self.backend.is_supported() {
            return Err(AcquireError::UnsupportedPlatform);
        }

        let primary = match self.backend.primary_battery() {
            SourceResult::Found(primary) => primary,
            SourceResult::Empty => return Err(AcquireError::NoBattery),
            SourceResult::Failed(reason) => {
                warn!(%reason, "primary battery query failed");
                return Err(AcquireError::NoBattery);
            }
        };

        let sources = self.backend.capacity_sources();
        let (capacity, attempts) = resolve_capacity(&sources);

        let cycle_count = enrichment(self.backend.cycle_count(), "cycle count");
        let temperature_raw = enrichment(self.backend.temperature(), "temperature");

        let fields = RawBatteryFields {
            name: primary.name,
            estimated_charge: primary.estimated_charge,
            status_code: primary.status_code,
            runtime_minutes: primary.runtime_minutes,
            chemistry_code: primary.chemistry_code,
            design_voltage_raw: primary.design_voltage_raw,
            design_capacity: capacity.design,
            full_charge_capacity: capacity.full,
            cycle_count,
            temperature_raw,
        };

        Ok(Acquisition { fields, attempts })
    }
}

fn enrichment<T>(result: SourceResult<T>, what: &str) -> Option<T> {
    match result {
        SourceResult::Found(value) => Some(value),
        SourceResult::Empty => {
            debug!("{} not reported", what);
            None
        }
        SourceResult::Failed(reason) => {
            debug!(%reason, "{} unavailable", what);
            None
        }
    }
}
