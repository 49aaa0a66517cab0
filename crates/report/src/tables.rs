//! Enumeration tables for the platform's battery status and chemistry codes.

use std::borrow::Cow;

/// `Win32_Battery.BatteryStatus` values.
pub const STATUS_CODES: &[(u16, &str)] = &[
    (1, "Discharging"),
    (2, "On AC Power"),
    (3, "Fully Charged"),
    (4, "Low"),
    (5, "Critical"),
    (6, "Charging"),
    (7, "Charging and High"),
    (8, "Charging and Low"),
    (9, "Charging and Critical"),
    (10, "Undefined"),
    (11, "Partially Charged"),
];

/// `Win32_Battery.Chemistry` values.
pub const CHEMISTRY_CODES: &[(u16, &str)] = &[
    (1, "Other"),
    (2, "Unknown"),
    (3, "Lead Acid"),
    (4, "Nickel Cadmium"),
    (5, "Nickel Metal Hydride"),
    (6, "Lithium Ion"),
    (7, "Zinc Air"),
    (8, "Lithium Polymer"),
];

fn lookup(table: &'static [(u16, &'static str)], code: u16) -> Cow<'static, str> {
    table
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| Cow::Borrowed(*label))
        .unwrap_or_else(|| Cow::Owned(format!("Unknown ({})", code)))
}

pub fn status_label(code: u16) -> Cow<'static, str> {
    lookup(STATUS_CODES, code)
}

pub fn chemistry_label(code: u16) -> Cow<'static, str> {
    lookup(CHEMISTRY_CODES, code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(STATUS_CODES.len(), 11);
        assert_eq!(CHEMISTRY_CODES.len(), 8);
    }

    #[test]
    fn test_known_codes() {
        assert_eq!(status_label(6), "Charging");
        assert_eq!(chemistry_label(6), "Lithium Ion");
        assert_eq!(status_label(1), "Discharging");
        assert_eq!(chemistry_label(8), "Lithium Polymer");
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(status_label(99), "Unknown (99)");
        assert_eq!(chemistry_label(99), "Unknown (99)");
        assert_eq!(status_label(0), "Unknown (0)");
    }
}
