use tracing::debug;

use crate::property::{classify_capacity_properties, first_positive, PropertyBag};
use crate::source::{CapacityReading, CapacitySource, SourceResult, Wanted};

use super::battery::{first_object_value, query_class, WmiBackend};

/// Alternative property names for the full-charge capacity, most specific first.
const PORTABLE_FULL_NAMES: &[&str] = &[
    "FullChargeCapacity",
    "FullChargedCapacity",
    "LastFullChargeCapacity",
];

/// Classes whose properties are scanned as a last resort.
const SCAN_CLASSES: &[(Namespace, &str)] = &[
    (Namespace::RootWmi, "BatteryStatus"),
    (Namespace::RootWmi, "MSBatteryClass"),
    (Namespace::Cimv2, "CIM_Battery"),
];

#[derive(Debug, Clone, Copy)]
enum Namespace {
    Cimv2,
    RootWmi,
}

/// `BatteryStaticData` and `BatteryFullChargedCapacity`, queried independently.
pub(super) struct StaticDataSource<'a> {
    backend: &'a WmiBackend,
}

impl<'a> StaticDataSource<'a> {
    pub(super) fn new(backend: &'a WmiBackend) -> Self {
        Self { backend }
    }
}

impl CapacitySource for StaticDataSource<'_> {
    fn name(&self) -> &'static str {
        "wmi-static"
    }

    fn read(&self, wanted: Wanted) -> SourceResult<CapacityReading> {
        let design = if wanted.design {
            first_object_value(
                query_class(self.backend.root_wmi(), "BatteryStaticData"),
                &["DesignedCapacity"],
            )
        } else {
            SourceResult::Empty
        };

        let full = if wanted.full {
            first_object_value(
                query_class(self.backend.root_wmi(), "BatteryFullChargedCapacity"),
                &["FullChargedCapacity"],
            )
        } else {
            SourceResult::Empty
        };

        SourceResult::from_fields(design, full)
    }
}

/// `Win32_PortableBattery`, which names its capacities differently.
pub(super) struct PortableBatterySource<'a> {
    backend: &'a WmiBackend,
}

impl<'a> PortableBatterySource<'a> {
    pub(super) fn new(backend: &'a WmiBackend) -> Self {
        Self { backend }
    }
}

impl CapacitySource for PortableBatterySource<'_> {
    fn name(&self) -> &'static str {
        "portable-battery"
    }

    fn read(&self, wanted: Wanted) -> SourceResult<CapacityReading> {
        query_class(self.backend.cimv2(), "Win32_PortableBattery").and_then(|bags| {
            let Some(bag) = bags.first() else {
                return SourceResult::Empty;
            };

            let reading = CapacityReading {
                design: wanted
                    .design
                    .then(|| first_positive(bag, &["DesignCapacity"]))
                    .flatten(),
                full: wanted
                    .full
                    .then(|| first_positive(bag, PORTABLE_FULL_NAMES))
                    .flatten(),
            };

            if reading.is_empty() {
                SourceResult::Empty
            } else {
                SourceResult::Found(reading)
            }
        })
    }
}

/// Scans every property of loosely related classes for capacity-like values.
pub(super) struct BroadScanSource<'a> {
    backend: &'a WmiBackend,
}

impl<'a> BroadScanSource<'a> {
    pub(super) fn new(backend: &'a WmiBackend) -> Self {
        Self { backend }
    }
}

impl CapacitySource for BroadScanSource<'_> {
    fn name(&self) -> &'static str {
        "broad-scan"
    }

    fn read(&self, _wanted: Wanted) -> SourceResult<CapacityReading> {
        let mut bags: Vec<PropertyBag> = Vec::new();
        let mut failures = Vec::new();

        for (namespace, class) in SCAN_CLASSES {
            let conn = match namespace {
                Namespace::Cimv2 => self.backend.cimv2(),
                Namespace::RootWmi => self.backend.root_wmi(),
            };
            match query_class(conn, class) {
                SourceResult::Found(found) => bags.extend(found),
                SourceResult::Empty => {}
                SourceResult::Failed(reason) => failures.push(reason),
            }
        }

        debug!(objects = bags.len(), failed = failures.len(), "broad scan collected");

        let reading = classify_capacity_properties(&bags);
        if !reading.is_empty() {
            SourceResult::Found(reading)
        } else if failures.len() == SCAN_CLASSES.len() {
            SourceResult::Failed(failures.join("; "))
        } else {
            SourceResult::Empty
        }
    }
}
