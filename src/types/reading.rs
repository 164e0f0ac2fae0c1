//! Records held by the local store.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout used by GIOŚ and kept verbatim in the store.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A sensor row: `sensors(sensor_id, name)`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Sensor {
    pub sensor_id: i64,
    pub name: String,
}

/// A reading row: `readings(sensor_id, timestamp, value)`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Reading {
    pub sensor_id: i64,
    /// Stored as received, never parsed on write.
    pub timestamp: String,
    /// `None` when the source reported `null`.
    pub value: Option<f64>,
}

impl Reading {
    pub fn new(sensor_id: i64, timestamp: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            sensor_id,
            timestamp: timestamp.into(),
            value,
        }
    }

    /// Parses the timestamp for plotting. Returns `None` when it does not follow
    /// [`TIMESTAMP_FORMAT`].
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }

    /// The `(timestamp, value)` pair consumed by [`crate::summarize`].
    pub fn point(&self) -> (String, Option<f64>) {
        (self.timestamp.clone(), self.value)
    }
}
