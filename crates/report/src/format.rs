use crate::raw::{MAX_PLAUSIBLE_RUNTIME_MINUTES, MILLIVOLT_THRESHOLD, RUNTIME_UNKNOWN_SENTINEL};

pub const UNKNOWN: &str = "Unknown";
pub const HEALTH_UNAVAILABLE: &str = "Unable to calculate";

const KELVIN_OFFSET: f64 = 273.15;

/// Render a runtime estimate as `"<H>h <M>m"` or `"<M>m"`.
///
/// Negative values, the firmware sentinel and anything longer than a day
/// render as `"Unknown"`.
pub fn convert_runtime_minutes(minutes: i64) -> String {
    if minutes < 0 || minutes == RUNTIME_UNKNOWN_SENTINEL || minutes > MAX_PLAUSIBLE_RUNTIME_MINUTES
    {
        return UNKNOWN.to_string();
    }

    let hours = minutes / 60;
    let mins = minutes % 60;

    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

/// Render a design voltage, guessing the unit from its magnitude.
pub fn format_voltage(raw: i64) -> String {
    if raw > MILLIVOLT_THRESHOLD {
        format!("{:.2}V", raw as f64 / 1000.0)
    } else {
        format!("{}V", raw)
    }
}

pub fn format_capacity(mwh: Option<u32>) -> String {
    match mwh {
        Some(value) => format!("{} mWh", value),
        None => UNKNOWN.to_string(),
    }
}

pub fn format_charge(percent: Option<u8>) -> String {
    match percent {
        Some(value) => format!("{}%", value),
        None => UNKNOWN.to_string(),
    }
}

/// Full-charge capacity as a percentage of design capacity, one decimal.
///
/// Exact ties round half to even, as `{:.1}` does. No clamping: a bad
/// fallback reading can push this past 100%.
pub fn compute_health(design: Option<u32>, full: Option<u32>) -> Option<f64> {
    let (design, full) = (design?, full?);
    if design == 0 {
        return None;
    }
    let ratio = full as f64 / design as f64 * 100.0;
    format!("{:.1}", ratio).parse().ok()
}

pub fn format_health(health: Option<f64>) -> String {
    match health {
        Some(value) => format!("{:.1}%", value),
        None => HEALTH_UNAVAILABLE.to_string(),
    }
}

/// Convert tenths of a Kelvin into Celsius.
pub fn format_temperature(raw: f64) -> String {
    format!("{:.1}°C", raw / 10.0 - KELVIN_OFFSET)
}

pub fn format_cycles(count: u32) -> String {
    format!("{} cycles", count)
}
