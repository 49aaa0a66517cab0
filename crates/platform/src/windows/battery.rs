use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, warn};
use wmi::{COMLibrary, Variant, WMIConnection};

use crate::energy_report::EnergyReportSource;
use crate::engine::{BatteryBackend, PrimaryBattery};
use crate::property::{first_count, first_positive, PropertyBag, PropertyValue};
use crate::source::{CapacitySource, SourceResult};
use crate::AcquireOptions;

use super::sources::{BroadScanSource, PortableBatterySource, StaticDataSource};

const ROOT_WMI: &str = "ROOT\\WMI";

/// WMI-backed battery sources over `ROOT\CIMV2` and `ROOT\WMI`.
///
/// Connection failures are kept and surfaced as failed sources rather than
/// aborting construction.
pub struct WmiBackend {
    cimv2: Result<WMIConnection, String>,
    root_wmi: Result<WMIConnection, String>,
    report_timeout: Duration,
}

impl WmiBackend {
    pub fn connect(options: &AcquireOptions) -> Self {
        let (cimv2, root_wmi) = match COMLibrary::new() {
            Ok(com) => (
                WMIConnection::new(com).map_err(|e| e.to_string()),
                WMIConnection::with_namespace_path(ROOT_WMI, com).map_err(|e| e.to_string()),
            ),
            Err(e) => {
                warn!(error = %e, "COM initialization failed");
                (Err(e.to_string()), Err(e.to_string()))
            }
        };

        Self {
            cimv2,
            root_wmi,
            report_timeout: options.report_timeout,
        }
    }

    pub(super) fn cimv2(&self) -> Result<&WMIConnection, String> {
        self.cimv2.as_ref().map_err(Clone::clone)
    }

    pub(super) fn root_wmi(&self) -> Result<&WMIConnection, String> {
        self.root_wmi.as_ref().map_err(Clone::clone)
    }
}

impl BatteryBackend for WmiBackend {
    fn is_supported(&self) -> bool {
        true
    }

    fn primary_battery(&self) -> SourceResult<PrimaryBattery> {
        query_class(self.cimv2(), "Win32_Battery")
            .map(|bags| bags.first().map(PrimaryBattery::from_properties))
            .and_then(SourceResult::from_option)
    }

    fn capacity_sources(&self) -> Vec<Box<dyn CapacitySource + '_>> {
        vec![
            Box::new(StaticDataSource::new(self)),
            Box::new(PortableBatterySource::new(self)),
            Box::new(EnergyReportSource::new(self.report_timeout)),
            Box::new(BroadScanSource::new(self)),
        ]
    }

    fn cycle_count(&self) -> SourceResult<u32> {
        query_class(self.root_wmi(), "BatteryCycleCount").and_then(|bags| {
            SourceResult::from_option(
                bags.first()
                    .and_then(|bag| first_count(bag, &["CycleCount"])),
            )
        })
    }

    fn temperature(&self) -> SourceResult<f64> {
        query_class(self.root_wmi(), "MSAcpi_ThermalZoneTemperature").and_then(|bags| {
            SourceResult::from_option(
                bags.first()
                    .and_then(|bag| bag.get("CurrentTemperature"))
                    .and_then(PropertyValue::as_float)
                    .filter(|t| *t > 0.0),
            )
        })
    }
}

/// `SELECT *` from one class; no instances is `Empty`.
pub(super) fn query_class(
    conn: Result<&WMIConnection, String>,
    class: &str,
) -> SourceResult<Vec<PropertyBag>> {
    let conn = match conn {
        Ok(conn) => conn,
        Err(reason) => return SourceResult::Failed(reason),
    };

    let query = format!("SELECT * FROM {}", class);
    match conn.raw_query::<HashMap<String, Variant>>(&query) {
        Ok(rows) if rows.is_empty() => {
            debug!(class, "no instances");
            SourceResult::Empty
        }
        Ok(rows) => SourceResult::Found(rows.iter().map(to_property_bag).collect()),
        Err(e) => {
            debug!(class, error = %e, "query failed");
            SourceResult::Failed(format!("{}: {}", class, e))
        }
    }
}

/// First positive integer among `names` on the first returned object.
pub(super) fn first_object_value(
    result: SourceResult<Vec<PropertyBag>>,
    names: &[&str],
) -> SourceResult<u32> {
    result.and_then(|bags| {
        SourceResult::from_option(bags.first().and_then(|bag| first_positive(bag, names)))
    })
}

fn to_property_bag(row: &HashMap<String, Variant>) -> PropertyBag {
    row.iter()
        .map(|(name, value)| (name.clone(), to_property_value(value)))
        .collect()
}

fn to_property_value(v: &Variant) -> PropertyValue {
    match v {
        Variant::String(s) => PropertyValue::Text(s.clone()),
        Variant::I1(n) => PropertyValue::Int(i64::from(*n)),
        Variant::I2(n) => PropertyValue::Int(i64::from(*n)),
        Variant::I4(n) => PropertyValue::Int(i64::from(*n)),
        Variant::I8(n) => PropertyValue::Int(*n),
        Variant::UI1(n) => PropertyValue::Int(i64::from(*n)),
        Variant::UI2(n) => PropertyValue::Int(i64::from(*n)),
        Variant::UI4(n) => PropertyValue::Int(i64::from(*n)),
        Variant::UI8(n) => i64::try_from(*n)
            .map(PropertyValue::Int)
            .unwrap_or(PropertyValue::Null),
        Variant::R4(f) => PropertyValue::Float(f64::from(*f)),
        Variant::R8(f) => PropertyValue::Float(*f),
        Variant::Bool(b) => PropertyValue::Bool(*b),
        _ => PropertyValue::Null,
    }
}
