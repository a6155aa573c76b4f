//! Three-level classification of a property value against its intervals.

use serde::{Deserialize, Serialize};

use crate::ranges::RangeTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Optimal,
    Acceptable,
    Problematic,
}

impl PropertyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Optimal => "optimal",
            PropertyStatus::Acceptable => "acceptable",
            PropertyStatus::Problematic => "problematic",
        }
    }
}

/// Classify `value` for the property `key`.
///
/// A key absent from the table is `Acceptable` unconditionally. Interval
/// bounds are inclusive. The table's `lower_is_better` flag is not consulted;
/// directionality lives in the interval authoring.
pub fn classify(table: &RangeTable, key: &str, value: f64) -> PropertyStatus {
    let Some(range) = table.get(key) else {
        return PropertyStatus::Acceptable;
    };
    if value >= range.optimal.0 && value <= range.optimal.1 {
        PropertyStatus::Optimal
    } else if value >= range.acceptable.0 && value <= range.acceptable.1 {
        PropertyStatus::Acceptable
    } else {
        PropertyStatus::Problematic
    }
}
