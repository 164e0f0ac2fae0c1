//! Measurement series as served by `data/getData/{sensor_id}`.

use serde::{Deserialize, Serialize};

/// A measurement series for one sensor.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Measurements {
    /// Parameter code of the series, e.g. "PM10".
    pub key: String,
    pub values: Vec<MeasurementValue>,
}

/// One entry of a [`Measurements`] series. `value` is `null` for hours the
/// station did not report.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MeasurementValue {
    pub date: String,
    pub value: Option<f64>,
}

impl Measurements {
    /// Flattens the series into `(timestamp, value)` pairs, nulls included.
    pub fn series(&self) -> Vec<(String, Option<f64>)> {
        self.values
            .iter()
            .map(|v| (v.date.clone(), v.value))
            .collect()
    }
}
