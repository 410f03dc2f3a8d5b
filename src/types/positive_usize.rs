use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A positive non-zero usize (≥1)
///
/// List marker spacing must be at least one space. This type enforces that
/// constraint so a rule never has to reason about "0 spaces after a marker".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PositiveUsize(usize);

impl PositiveUsize {
    /// Create a new PositiveUsize, validating it's at least 1.
    ///
    /// # Errors
    /// Returns `PositiveUsizeError` if the value is 0.
    pub fn new(value: usize) -> Result<Self, PositiveUsizeError> {
        if value >= 1 {
            Ok(Self(value))
        } else {
            Err(PositiveUsizeError(value))
        }
    }

    /// Get the underlying value (guaranteed to be ≥1).
    pub fn get(self) -> usize {
        self.0
    }

    /// Convert from a default value (for use in config defaults).
    ///
    /// # Panics
    /// Panics if the value is 0. This is intended for const defaults only.
    pub const fn from_const(value: usize) -> Self {
        assert!(value >= 1, "PositiveUsize must be at least 1");
        Self(value)
    }

    /// Interpret a loosely typed config value.
    ///
    /// Integers, floats (truncated toward zero) and numeric strings are accepted.
    /// Returns `None` for anything that does not describe a count of at least 1.
    pub fn from_json_lenient(value: &serde_json::Value) -> Option<Self> {
        let number = match value {
            serde_json::Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(truncate_count)),
            serde_json::Value::String(s) => {
                let s = s.trim();
                s.parse::<u64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(truncate_count))
            }
            _ => None,
        }?;
        usize::try_from(number).ok().and_then(|n| Self::new(n).ok())
    }
}

fn truncate_count(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 1.0 && value <= u32::MAX as f64 {
        Some(value.trunc() as u64)
    } else {
        None
    }
}

/// Error type for invalid PositiveUsize values.
#[derive(Debug, Clone, Copy)]
pub struct PositiveUsizeError(usize);

impl fmt::Display for PositiveUsizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Value must be at least 1, got {}. Zero is not a valid value for this configuration.",
            self.0
        )
    }
}

impl std::error::Error for PositiveUsizeError {}

impl<'de> Deserialize<'de> for PositiveUsize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = usize::deserialize(deserializer)?;
        PositiveUsize::new(value).map_err(serde::de::Error::custom)
    }
}

impl Serialize for PositiveUsize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl From<PositiveUsize> for usize {
    fn from(val: PositiveUsize) -> Self {
        val.0
    }
}

impl Default for PositiveUsize {
    fn default() -> Self {
        Self(1)
    }
}

/// `deserialize_with` helper for options that must never fail to load.
///
/// Malformed values (zero, negative numbers, words, wrong types) fall back to 1.
pub fn deserialize_lenient_positive<'de, D>(deserializer: D) -> Result<PositiveUsize, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(PositiveUsize::from_json_lenient(&raw).unwrap_or_else(|| {
        log::warn!("Invalid spacing value {raw}, using 1");
        PositiveUsize::default()
    }))
}
