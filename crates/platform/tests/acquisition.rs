use std::cell::RefCell;

use juicecheck_platform::*;
use juicecheck_report::{normalize, AdvancedInfo};
use pretty_assertions::assert_eq;

struct RecordingSource<'a> {
    name: &'static str,
    result: SourceResult<CapacityReading>,
    log: &'a RefCell<Vec<&'static str>>,
}

impl CapacitySource for RecordingSource<'_> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn read(&self, _wanted: Wanted) -> SourceResult<CapacityReading> {
        self.log.borrow_mut().push(self.name);
        self.result.clone()
    }
}

struct MockBackend {
    supported: bool,
    primary: SourceResult<PrimaryBattery>,
    capacities: Vec<(&'static str, SourceResult<CapacityReading>)>,
    cycle_count: SourceResult<u32>,
    temperature: SourceResult<f64>,
    log: RefCell<Vec<&'static str>>,
}

impl MockBackend {
    fn with_capacities(capacities: Vec<(&'static str, SourceResult<CapacityReading>)>) -> Self {
        Self {
            supported: true,
            primary: SourceResult::Found(sample_primary()),
            capacities,
            cycle_count: SourceResult::Empty,
            temperature: SourceResult::Empty,
            log: RefCell::new(Vec::new()),
        }
    }

    fn invoked(&self) -> Vec<&'static str> {
        self.log.borrow().clone()
    }
}

impl BatteryBackend for MockBackend {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn primary_battery(&self) -> SourceResult<PrimaryBattery> {
        self.primary.clone()
    }

    fn capacity_sources(&self) -> Vec<Box<dyn CapacitySource + '_>> {
        self.capacities
            .iter()
            .map(|(name, result)| {
                Box::new(RecordingSource {
                    name: *name,
                    result: result.clone(),
                    log: &self.log,
                }) as Box<dyn CapacitySource + '_>
            })
            .collect()
    }

    fn cycle_count(&self) -> SourceResult<u32> {
        self.cycle_count.clone()
    }

    fn temperature(&self) -> SourceResult<f64> {
        self.temperature.clone()
    }
}

fn sample_primary() -> PrimaryBattery {
    PrimaryBattery {
        name: Some("5B10W13930".to_string()),
        estimated_charge: Some(72),
        status_code: Some(1),
        runtime_minutes: Some(95),
        chemistry_code: Some(6),
        design_voltage_raw: Some(15360),
    }
}

fn failed(reason: &str) -> SourceResult<CapacityReading> {
    SourceResult::Failed(reason.to_string())
}

fn found(design: Option<u32>, full: Option<u32>) -> SourceResult<CapacityReading> {
    SourceResult::Found(CapacityReading { design, full })
}

fn standard_chain(
    wmi_static: SourceResult<CapacityReading>,
    portable: SourceResult<CapacityReading>,
    report: SourceResult<CapacityReading>,
    scan: SourceResult<CapacityReading>,
) -> MockBackend {
    MockBackend::with_capacities(vec![
        ("wmi-static", wmi_static),
        ("portable-battery", portable),
        ("battery-report", report),
        ("broad-scan", scan),
    ])
}

#[test]
fn test_unsupported_platform_is_bare_error() {
    let backend = MockBackend {
        supported: false,
        ..standard_chain(
            found(Some(1), Some(1)),
            SourceResult::Empty,
            SourceResult::Empty,
            SourceResult::Empty,
        )
    };
    let engine = AcquisitionEngine::new(backend);

    let result = engine.acquire();
    assert_eq!(result, Err(AcquireError::UnsupportedPlatform));
    assert!(engine.backend().invoked().is_empty());

    let info = AdvancedInfo::from_result(result.map(|a| a.fields));
    let value = serde_json::to_value(&info).unwrap();
    assert_eq!(value, serde_json::json!({ "error": "unsupported platform" }));
}

#[test]
fn test_missing_battery_is_fatal() {
    let mut backend = standard_chain(
        found(Some(50000), Some(45000)),
        SourceResult::Empty,
        SourceResult::Empty,
        SourceResult::Empty,
    );
    backend.primary = SourceResult::Empty;

    let engine = AcquisitionEngine::new(backend);
    assert_eq!(engine.acquire(), Err(AcquireError::NoBattery));
    assert!(engine.backend().invoked().is_empty());
}

#[test]
fn test_failed_primary_query_reports_no_battery() {
    let mut backend = standard_chain(
        SourceResult::Empty,
        SourceResult::Empty,
        SourceResult::Empty,
        SourceResult::Empty,
    );
    backend.primary = SourceResult::Failed("COM initialization failed".to_string());

    let engine = AcquisitionEngine::new(backend);
    assert_eq!(engine.acquire(), Err(AcquireError::NoBattery));
}

#[test]
fn test_portable_battery_fallback_stops_chain() {
    let backend = standard_chain(
        failed("Not supported"),
        found(Some(57000), Some(49000)),
        found(Some(1), Some(1)),
        found(Some(2), Some(2)),
    );
    let engine = AcquisitionEngine::new(backend);

    let acquisition = engine.acquire().unwrap();

    assert_eq!(acquisition.fields.design_capacity, Some(57000));
    assert_eq!(acquisition.fields.full_charge_capacity, Some(49000));
    assert_eq!(
        engine.backend().invoked(),
        vec!["wmi-static", "portable-battery"]
    );
    assert_eq!(
        acquisition.attempts[0].outcome,
        AttemptOutcome::Failed("Not supported".to_string())
    );
    assert_eq!(
        acquisition.attempts[1].outcome,
        AttemptOutcome::Filled(Wanted::BOTH)
    );
}

#[test]
fn test_fields_resolved_by_different_sources() {
    let backend = standard_chain(
        found(Some(60000), None),
        SourceResult::Empty,
        found(Some(12345), Some(52000)),
        found(Some(99999), Some(99999)),
    );
    let engine = AcquisitionEngine::new(backend);

    let acquisition = engine.acquire().unwrap();

    assert_eq!(acquisition.fields.design_capacity, Some(60000));
    assert_eq!(acquisition.fields.full_charge_capacity, Some(52000));
    assert_eq!(
        engine.backend().invoked(),
        vec!["wmi-static", "portable-battery", "battery-report"]
    );
    assert_eq!(
        acquisition.attempts[2].asked,
        Wanted {
            design: false,
            full: true
        }
    );
}

#[test]
fn test_all_capacity_sources_fail() {
    let backend = standard_chain(
        failed("Invalid class"),
        failed("Invalid class"),
        failed("powercfg timed out after 15s"),
        SourceResult::Empty,
    );
    let engine = AcquisitionEngine::new(backend);

    let acquisition = engine.acquire().unwrap();
    let report = normalize(&acquisition.fields);

    assert_eq!(acquisition.attempts.len(), 4);
    assert_eq!(report.design_capacity, "Unknown");
    assert_eq!(report.full_charge_capacity, "Unknown");
    assert_eq!(report.health, "Unable to calculate");
    assert_eq!(report.name, "5B10W13930");
    assert_eq!(report.estimated_charge, "72%");
    assert_eq!(report.status, "Discharging");
    assert_eq!(report.estimated_runtime, "1h 35m");
    assert_eq!(report.chemistry, "Lithium Ion");
    assert_eq!(report.voltage, "15.36V");
}

#[test]
fn test_enrichments_are_optional() {
    let mut backend = standard_chain(
        found(Some(50000), Some(40000)),
        SourceResult::Empty,
        SourceResult::Empty,
        SourceResult::Empty,
    );
    backend.cycle_count = SourceResult::Failed("Invalid class".to_string());
    backend.temperature = SourceResult::Found(3011.5);

    let acquisition = AcquisitionEngine::new(backend).acquire().unwrap();
    let report = normalize(&acquisition.fields);

    assert_eq!(acquisition.fields.cycle_count, None);
    assert_eq!(report.cycle_count, None);
    assert_eq!(report.temperature.as_deref(), Some("28.0°C"));
    assert_eq!(report.health, "80.0%");
}

#[test]
fn test_zero_cycle_count_is_reported() {
    let mut backend = standard_chain(
        found(Some(50000), Some(50000)),
        SourceResult::Empty,
        SourceResult::Empty,
        SourceResult::Empty,
    );
    backend.cycle_count = SourceResult::Found(0);

    let acquisition = AcquisitionEngine::new(backend).acquire().unwrap();
    let report = normalize(&acquisition.fields);

    assert_eq!(acquisition.fields.cycle_count, Some(0));
    assert_eq!(report.cycle_count.as_deref(), Some("0 cycles"));
}

#[test]
fn test_scalar_fields_missing_do_not_fail() {
    let mut backend = standard_chain(
        found(Some(50000), Some(40000)),
        SourceResult::Empty,
        SourceResult::Empty,
        SourceResult::Empty,
    );
    backend.primary = SourceResult::Found(PrimaryBattery::default());

    let acquisition = AcquisitionEngine::new(backend).acquire().unwrap();
    let report = normalize(&acquisition.fields);

    assert_eq!(report.name, "Unknown");
    assert_eq!(report.status, "Unknown");
    assert_eq!(report.health, "80.0%");
}
