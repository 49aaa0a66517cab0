//! Loosely-typed property bags returned by management queries.

use std::collections::BTreeMap;

use crate::source::CapacityReading;

/// Smallest integer the broad scan accepts as a capacity. Anything at or
/// below this is treated as a percentage or a flag.
const MIN_SCANNED_CAPACITY: i64 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Null,
}

impl PropertyValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(v) => Some(*v),
            PropertyValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed)
                }
            }
            _ => None,
        }
    }

    /// Non-negative integer that fits in `u32`.
    pub fn as_u32(&self) -> Option<u32> {
        self.as_int().and_then(|v| u32::try_from(v).ok())
    }

    /// Positive integer that fits in `u32`.
    pub fn as_positive_u32(&self) -> Option<u32> {
        self.as_u32().filter(|v| *v > 0)
    }
}

/// Property name to value, in the order the names sort.
pub type PropertyBag = BTreeMap<String, PropertyValue>;

/// First property in `names` (tried in order) holding a positive integer.
pub fn first_positive(bag: &PropertyBag, names: &[&str]) -> Option<u32> {
    names
        .iter()
        .filter_map(|name| bag.get(*name))
        .find_map(PropertyValue::as_positive_u32)
}

/// First property in `names` holding a count. Unlike capacities, zero is a
/// real reading here.
pub fn first_count(bag: &PropertyBag, names: &[&str]) -> Option<u32> {
    names
        .iter()
        .filter_map(|name| bag.get(*name))
        .find_map(PropertyValue::as_u32)
}

/// Pull capacities out of arbitrary objects by property name alone.
///
/// Only properties whose name mentions "capacity" or "charge" and whose value
/// is an integer above 1000 are considered. A name containing "design" feeds
/// the design capacity; one containing "full" or "charge" feeds the full
/// capacity. The first hit for each field wins.
pub fn classify_capacity_properties<'a>(
    bags: impl IntoIterator<Item = &'a PropertyBag>,
) -> CapacityReading {
    let mut reading = CapacityReading::default();

    for bag in bags {
        for (name, value) in bag {
            let lower = name.to_ascii_lowercase();
            if !lower.contains("capacity") && !lower.contains("charge") {
                continue;
            }

            let Some(value) = value
                .as_int()
                .filter(|v| *v > MIN_SCANNED_CAPACITY)
                .and_then(|v| u32::try_from(v).ok())
            else {
                continue;
            };

            if lower.contains("design") {
                reading.design.get_or_insert(value);
            } else if lower.contains("full") || lower.contains("charge") {
                reading.full.get_or_insert(value);
            }

            if reading.is_complete() {
                return reading;
            }
        }
    }

    reading
}
