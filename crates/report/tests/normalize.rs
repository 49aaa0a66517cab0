use juicecheck_report::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn battery_without_capacities() -> RawBatteryFields {
    RawBatteryFields {
        name: Some("Primary".to_string()),
        estimated_charge: Some(64),
        status_code: Some(1),
        runtime_minutes: Some(RUNTIME_UNKNOWN_SENTINEL),
        chemistry_code: Some(6),
        design_voltage_raw: Some(12),
        ..Default::default()
    }
}

#[test]
fn test_error_serializes_alone() {
    let info = AdvancedInfo::from_result(Err::<RawBatteryFields, _>("unsupported platform"));
    let value = serde_json::to_value(&info).unwrap();

    assert_eq!(value, json!({ "error": "unsupported platform" }));
}

#[test]
fn test_report_without_capacities() {
    let info = AdvancedInfo::from_result(Ok::<_, String>(battery_without_capacities()));
    let value = serde_json::to_value(&info).unwrap();

    assert_eq!(
        value,
        json!({
            "name": "Primary",
            "estimated_charge": "64%",
            "voltage": "12V",
            "status": "Discharging",
            "chemistry": "Lithium Ion",
            "estimated_runtime": "Unknown",
            "design_capacity": "Unknown",
            "full_charge_capacity": "Unknown",
            "health": "Unable to calculate",
        })
    );
}

#[test]
fn test_optional_fields_serialized_when_present() {
    let raw = RawBatteryFields {
        design_capacity: Some(50000),
        full_charge_capacity: Some(47500),
        cycle_count: Some(88),
        temperature_raw: Some(3051.5),
        ..battery_without_capacities()
    };
    let value = serde_json::to_value(normalize(&raw)).unwrap();

    assert_eq!(value["health"], "95.0%");
    assert_eq!(value["cycle_count"], "88 cycles");
    assert_eq!(value["temperature"], "32.0°C");
    assert!(value.get("health_percent").is_none());
}

#[test]
fn test_health_rounds_to_one_decimal() {
    let cases = [
        (50000u32, 45000u32, "90.0%"),
        (57000, 41234, "72.3%"),
        (42000, 42000, "100.0%"),
        (1, 3, "300.0%"),
        (16, 1, "6.2%"),
        (16, 5, "31.2%"),
        (50000, 43125, "86.2%"),
    ];

    for (design, full, expected) in cases {
        let raw = RawBatteryFields {
            design_capacity: Some(design),
            full_charge_capacity: Some(full),
            ..Default::default()
        };

        assert_eq!(normalize(&raw).health, expected, "design={design} full={full}");
    }
}

#[test]
fn test_full_report_serializes_display_fields_only() {
    let raw = RawBatteryFields {
        design_capacity: Some(50000),
        full_charge_capacity: Some(43125),
        cycle_count: Some(0),
        ..battery_without_capacities()
    };
    let report = normalize(&raw);
    assert_eq!(report.health_percent, Some(86.2));

    let value = serde_json::to_value(AdvancedInfo::Report(report)).unwrap();

    assert_eq!(
        value,
        json!({
            "name": "Primary",
            "estimated_charge": "64%",
            "voltage": "12V",
            "status": "Discharging",
            "chemistry": "Lithium Ion",
            "estimated_runtime": "Unknown",
            "design_capacity": "50000 mWh",
            "full_charge_capacity": "43125 mWh",
            "health": "86.2%",
            "cycle_count": "0 cycles",
        })
    );
}
