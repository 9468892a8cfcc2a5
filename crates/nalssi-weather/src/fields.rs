//! Typed access to the agency's per-day field naming.
//!
//! The mid-range endpoints flatten their per-day values into fields named
//! `{prefix}{day}{slot}`, e.g. `wf4Am`, `rnSt7Pm`, `wf9`, `taMin5`. This
//! module builds those keys explicitly and reads them with type-aware
//! accessors instead of scattering string-keyed lookups around.

use serde_json::Value;

/// Which slice of the day a field addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySlot {
    Am,
    Pm,
    /// Whole-day fields carry no slot suffix.
    Daily,
}

impl DaySlot {
    fn suffix(self) -> &'static str {
        match self {
            DaySlot::Am => "Am",
            DaySlot::Pm => "Pm",
            DaySlot::Daily => "",
        }
    }
}

/// Build the agency field name for a prefix, day and slot.
pub fn field_key(prefix: &str, day: u8, slot: DaySlot) -> String {
    format!("{}{}{}", prefix, day, slot.suffix())
}

/// Read a non-empty string field from a raw agency item.
pub fn str_field(item: &Value, key: &str) -> Option<String> {
    item.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Read an integer field from a raw agency item.
///
/// The agency is inconsistent about numeric types: the same field can
/// arrive as a JSON number or as a numeric string depending on endpoint.
pub fn int_field(item: &Value, key: &str) -> Option<i32> {
    match item.get(key)? {
        Value::Number(n) => n.as_i64().map(|v| v as i32),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
