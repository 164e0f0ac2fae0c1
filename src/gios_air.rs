//! This module provides the main entry point of the crate. [`GiosAir`] ties the GIOŚ API
//! client to the local store so that fetched series are persisted as they arrive, and
//! exposes store queries and the summary engine next to it.

use crate::api::client::{ApiClient, DEFAULT_BASE_URL};
use crate::error::GiosError;
use crate::store::local_store::LocalStore;
use crate::summary::{summarize, Summary};
use crate::types::aq_index::AqIndex;
use crate::types::measurement::Measurements;
use crate::types::reading::Reading;
use crate::types::sensor::SensorInfo;
use crate::types::station::Station;
use crate::utils::default_database_path;
use bon::bon;
use log::info;
use std::path::PathBuf;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use gios_air::LatLon;
///
/// let warsaw = LatLon(52.2296756, 21.0122287);
/// assert_eq!(warsaw.0, 52.2296756);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// The main client: GIOŚ API access plus the local store it persists into.
///
/// Construction ensures the store schema exists, optionally after wiping the store.
///
/// # Examples
///
/// ```no_run
/// # use gios_air::{GiosAir, GiosError};
/// # fn run() -> Result<(), GiosError> {
/// let client = GiosAir::builder()
///     .database_path("air_quality.db")
///     .reset_store(true)
///     .build()?;
///
/// let readings = client.fetch_and_persist().station_id(114).call()?;
/// println!("Stored {} readings", readings.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GiosAir {
    api: ApiClient,
    store: LocalStore,
}

#[bon]
impl GiosAir {
    /// Builds a client.
    ///
    /// * `.database_path(..)`: store file. Defaults to `<data dir>/gios_air/air_quality.db`.
    /// * `.base_url(..)`: API root. Defaults to [`DEFAULT_BASE_URL`].
    /// * `.http_client(..)`: preconfigured blocking `reqwest` client.
    /// * `.reset_store(bool)`: delete the store file before creating the schema. Defaults to `false`.
    ///
    /// # Errors
    ///
    /// [`GiosError::DataDirResolution`] when no path is given and the platform has no data
    /// directory, [`GiosError::Api`] if the HTTP client cannot be built, and
    /// [`GiosError::Store`] if the store cannot be reset or initialised.
    #[builder]
    pub fn new(
        #[builder(into)] database_path: Option<PathBuf>,
        #[builder(into)] base_url: Option<String>,
        http_client: Option<reqwest::blocking::Client>,
        #[builder(default)] reset_store: bool,
    ) -> Result<Self, GiosError> {
        let database_path = match database_path {
            Some(path) => path,
            None => default_database_path().ok_or(GiosError::DataDirResolution)?,
        };
        let base_url = base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let api = match http_client {
            Some(http) => ApiClient::with_http_client(base_url, http),
            None => ApiClient::new(base_url)?,
        };

        let store = LocalStore::new(database_path);
        if reset_store {
            store.reset()?;
        }
        store.ensure_schema()?;
        info!("Using store at {}", store.path().display());

        Ok(Self { api, store })
    }

    /// Client on the default store location and API root.
    pub fn open_default() -> Result<Self, GiosError> {
        Self::builder().build()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn stations(&self) -> Result<Vec<Station>, GiosError> {
        Ok(self.api.stations()?)
    }

    pub fn sensors(&self, station_id: i64) -> Result<Vec<SensorInfo>, GiosError> {
        Ok(self.api.sensors(station_id)?)
    }

    pub fn measurements(&self, sensor_id: i64) -> Result<Measurements, GiosError> {
        Ok(self.api.measurements(sensor_id)?)
    }

    pub fn air_quality_index(&self, station_id: i64) -> Result<AqIndex, GiosError> {
        Ok(self.api.air_quality_index(station_id)?)
    }

    /// Fetches the series of one sensor and persists it: the sensor row first (kept if
    /// already present), then every entry, nulls included, one commit each.
    ///
    /// Returns the series as fetched.
    pub fn fetch_sensor(
        &self,
        sensor: &SensorInfo,
    ) -> Result<Vec<(String, Option<f64>)>, GiosError> {
        let series = self.api.measurements(sensor.id)?.series();

        self.store.upsert_sensor(sensor.id, sensor.name())?;
        for (timestamp, value) in &series {
            self.store.append_reading(sensor.id, timestamp, *value)?;
        }
        info!(
            "Persisted {} readings for sensor {} ({})",
            series.len(),
            sensor.id,
            sensor.name()
        );
        Ok(series)
    }

    /// Fetches and persists every sensor of a station.
    ///
    /// Returns all fetched readings, sensor by sensor in the order the API lists them.
    /// A failure stops the run; sensors handled before it stay persisted.
    #[builder]
    pub fn fetch_and_persist(&self, station_id: i64) -> Result<Vec<Reading>, GiosError> {
        let sensors = self.api.sensors(station_id)?;
        info!("Station {} has {} sensors", station_id, sensors.len());

        let mut readings = Vec::new();
        for sensor in &sensors {
            let series = self.fetch_sensor(sensor)?;
            readings.extend(
                series
                    .into_iter()
                    .map(|(timestamp, value)| Reading::new(sensor.id, timestamp, value)),
            );
        }
        Ok(readings)
    }

    /// Stored readings of a sensor between two `yyyy-mm-dd` bounds (string comparison).
    #[builder]
    pub fn query_range(
        &self,
        sensor_id: i64,
        from_date: &str,
        to_date: &str,
    ) -> Result<Vec<(String, Option<f64>)>, GiosError> {
        Ok(self.store.query_range(sensor_id, from_date, to_date)?)
    }

    /// Every stored reading of a sensor.
    pub fn query_all(&self, sensor_id: i64) -> Result<Vec<(String, Option<f64>)>, GiosError> {
        Ok(self.store.query_all(sensor_id)?)
    }

    /// See [`summarize`].
    pub fn summarize<T: AsRef<str>>(&self, series: &[(T, Option<f64>)]) -> Option<Summary> {
        summarize(series)
    }
}


#[cfg(test)]
mod tests {
    use super::test_server::serve;
    use super::*;
    use crate::summary::Trend;
    use tempfile::TempDir;

    const SENSORS: &str = r#"[
        {"id": 92, "stationId": 14, "param": {"paramName": "pył zawieszony PM10", "paramFormula": "PM10", "paramCode": "PM10", "idParam": 3}},
        {"id": 88, "stationId": 14, "param": {"paramName": "dwutlenek azotu", "paramFormula": "NO2", "paramCode": "NO2", "idParam": 6}}
    ]"#;
    const PM10: &str = r#"{"key": "PM10", "values": [
        {"date": "2021-01-02 10:00:00", "value": 40.0},
        {"date": "2020-06-01 10:00:00", "value": null},
        {"date": "2020-01-01 10:00:00", "value": 20.0}
    ]}"#;
    const NO2: &str = r#"{"key": "NO2", "values": [
        {"date": "2020-01-01 10:00:00", "value": 5.5}
    ]}"#;

    fn client(dir: &TempDir, base_url: String) -> GiosAir {
        GiosAir::builder()
            .database_path(dir.path().join("air_quality.db"))
            .base_url(base_url)
            .http_client(reqwest::blocking::Client::builder().no_proxy().build().unwrap())
            .build()
            .unwrap()
    }

    fn station_routes() -> Vec<(&'static str, &'static str)> {
        vec![
            ("station/sensors/14", SENSORS),
            ("data/getData/92", PM10),
            ("data/getData/88", NO2),
        ]
    }

    #[test]
    fn fetch_and_persist_stores_every_sensor() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(&dir, serve(station_routes()));

        let readings = client.fetch_and_persist().station_id(14).call().unwrap();
        assert_eq!(readings.len(), 4);
        assert_eq!(readings[0], Reading::new(92, "2021-01-02 10:00:00", Some(40.0)));
        assert_eq!(readings[3], Reading::new(88, "2020-01-01 10:00:00", Some(5.5)));

        let sensors = client.store().sensors().unwrap();
        let names: Vec<&str> = sensors.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["dwutlenek azotu", "pył zawieszony PM10"]);

        // Nulls are stored too.
        let stored = client.query_all(92).unwrap();
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[1], ("2020-06-01 10:00:00".to_string(), None));

        let first_half = client
            .query_range()
            .sensor_id(92)
            .from_date("2020-01-01")
            .to_date("2020-06-30")
            .call()
            .unwrap();
        assert_eq!(first_half.len(), 2);
        assert!(first_half.iter().all(|(ts, _)| !ts.starts_with("2021")));

        let summary = client.summarize(&stored).unwrap();
        assert_eq!(summary.min_at, "2020-01-01 10:00:00");
        assert_eq!(summary.max_at, "2021-01-02 10:00:00");
        assert_eq!(summary.mean_value, 30.0);
        assert_eq!(summary.trend, Trend::Downward);
    }

    #[test]
    fn refetch_duplicates_readings_but_not_sensors() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(&dir, serve(station_routes()));

        client.fetch_and_persist().station_id(14).call().unwrap();
        client.fetch_and_persist().station_id(14).call().unwrap();

        assert_eq!(client.store().sensors().unwrap().len(), 2);
        assert_eq!(client.query_all(92).unwrap().len(), 6);
    }

    #[test]
    fn missing_series_stops_before_writing_that_sensor() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(
            &dir,
            serve(vec![("station/sensors/14", SENSORS), ("data/getData/92", PM10)]),
        );

        let err = client.fetch_and_persist().station_id(14).call().unwrap_err();
        assert!(matches!(err, GiosError::Api(_)));

        // The sensor fetched before the failure stays persisted.
        assert_eq!(client.query_all(92).unwrap().len(), 3);
        assert!(client.store().sensor(88).unwrap().is_none());
    }

    #[test]
    fn reset_store_wipes_previous_data() {
        let dir = tempfile::tempdir().unwrap();
        let base = serve(station_routes());
        {
            let first = client(&dir, base.clone());
            first.fetch_and_persist().station_id(14).call().unwrap();
        }

        let reopened = client(&dir, base.clone());
        assert_eq!(reopened.query_all(92).unwrap().len(), 3);

        let wiped = GiosAir::builder()
            .database_path(dir.path().join("air_quality.db"))
            .base_url(base)
            .reset_store(true)
            .build()
            .unwrap();
        assert!(wiped.query_all(92).unwrap().is_empty());
        assert!(wiped.store().sensors().unwrap().is_empty());
    }

    #[test]
    #[ignore = "hits the live GIOŚ API"]
    fn live_fetch_first_station() -> Result<(), GiosError> {
        let dir = tempfile::tempdir().unwrap();
        let client = GiosAir::builder()
            .database_path(dir.path().join("live.db"))
            .build()?;
        let stations = client.stations()?;
        let readings = client
            .fetch_and_persist()
            .station_id(stations[0].id)
            .call()?;
        dbg!(readings.len());
        Ok(())
    }
}
