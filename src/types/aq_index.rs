//! Air-quality index as served by `aqindex/getIndex/{station_id}`.

use serde::{Deserialize, Serialize};

/// Station-level air-quality index with its per-pollutant components.
///
/// GIOŚ omits or nulls components the station does not measure, so
/// everything except the station id is optional.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AqIndex {
    /// Station identifier.
    pub id: i64,
    #[serde(default)]
    pub st_calc_date: Option<String>,
    #[serde(default)]
    pub st_index_level: Option<IndexLevel>,
    #[serde(default)]
    pub st_source_data_date: Option<String>,
    #[serde(default)]
    pub so2_calc_date: Option<String>,
    #[serde(default)]
    pub so2_index_level: Option<IndexLevel>,
    #[serde(default)]
    pub no2_calc_date: Option<String>,
    #[serde(default)]
    pub no2_index_level: Option<IndexLevel>,
    #[serde(default)]
    pub pm10_calc_date: Option<String>,
    #[serde(default)]
    pub pm10_index_level: Option<IndexLevel>,
    #[serde(default)]
    pub pm25_calc_date: Option<String>,
    #[serde(default)]
    pub pm25_index_level: Option<IndexLevel>,
    #[serde(default)]
    pub o3_calc_date: Option<String>,
    #[serde(default)]
    pub o3_index_level: Option<IndexLevel>,
    #[serde(default)]
    pub st_index_status: Option<bool>,
    #[serde(default)]
    pub st_index_cr_param: Option<String>,
}

/// A categorical index level, e.g. `{ "id": 1, "indexLevelName": "Dobry" }`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndexLevel {
    pub id: i64,
    pub index_level_name: String,
}

impl AqIndex {
    /// Name of the overall station index level, if computed.
    pub fn overall_level(&self) -> Option<&str> {
        self.st_index_level
            .as_ref()
            .map(|level| level.index_level_name.as_str())
    }
}
