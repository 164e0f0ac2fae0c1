//! Sensor metadata as served by `station/sensors/{station_id}`.

use serde::{Deserialize, Serialize};

/// A single measuring position at a station, e.g. the PM10 sensor.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SensorInfo {
    /// Sensor identifier, also used as the primary key in the local store.
    pub id: i64,
    pub station_id: i64,
    pub param: Param,
}

/// The parameter a sensor measures.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    /// Full name, e.g. "pył zawieszony PM10". Stored as the sensor name.
    pub param_name: String,
    pub param_formula: Option<String>,
    pub param_code: Option<String>,
    pub id_param: Option<i64>,
}

impl SensorInfo {
    pub fn name(&self) -> &str {
        &self.param.param_name
    }
}
