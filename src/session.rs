//! Explicit browsing context for a front end: which station and sensor are selected,
//! and what the last selection loaded.

use crate::error::GiosError;
use crate::gios_air::GiosAir;
use crate::stations::locate_station::StationLocator;
use crate::summary::{summarize, Summary};
use crate::types::aq_index::AqIndex;
use crate::types::sensor::SensorInfo;
use crate::types::station::Station;
use crate::validation::{parse_coordinates, parse_date_bound, parse_radius_km};
use log::info;

/// Selection state threaded through front-end actions.
///
/// Selecting a sensor fetches and persists its series; the fetched series backs
/// [`Session::analyze`], while [`Session::chart_series`] reads back from the store.
pub struct Session<'a> {
    client: &'a GiosAir,
    locator: StationLocator,
    station_id: Option<i64>,
    sensors: Vec<SensorInfo>,
    sensor_id: Option<i64>,
    series: Vec<(String, Option<f64>)>,
}

impl<'a> Session<'a> {
    /// Empty session; call [`Session::load_stations`] before selecting.
    pub fn new(client: &'a GiosAir) -> Self {
        Self::with_stations(client, Vec::new())
    }

    /// Session over an already fetched station list.
    pub fn with_stations(client: &'a GiosAir, stations: Vec<Station>) -> Self {
        Self {
            client,
            locator: StationLocator::new(stations),
            station_id: None,
            sensors: Vec::new(),
            sensor_id: None,
            series: Vec::new(),
        }
    }

    /// Fetches the station list and clears any selection.
    pub fn load_stations(&mut self) -> Result<&[Station], GiosError> {
        let stations = self.client.stations()?;
        *self = Self::with_stations(self.client, stations);
        Ok(self.locator.stations())
    }

    pub fn stations(&self) -> &[Station] {
        self.locator.stations()
    }

    pub fn locator(&self) -> &StationLocator {
        &self.locator
    }

    pub fn selected_station(&self) -> Option<&Station> {
        self.station_id.and_then(|id| self.locator.by_id(id))
    }

    pub fn sensors(&self) -> &[SensorInfo] {
        &self.sensors
    }

    pub fn selected_sensor(&self) -> Option<&SensorInfo> {
        self.sensor_id
            .and_then(|id| self.sensors.iter().find(|s| s.id == id))
    }

    /// The series loaded by the last sensor selection.
    pub fn series(&self) -> &[(String, Option<f64>)] {
        &self.series
    }

    /// Selects a station by name and fetches its sensors. Drops any sensor selection.
    pub fn select_station(&mut self, station_name: &str) -> Result<&[SensorInfo], GiosError> {
        let station_id = self
            .locator
            .by_name(station_name)
            .map(|s| s.id)
            .ok_or_else(|| GiosError::UnknownStation(station_name.to_string()))?;

        let sensors = self.client.sensors(station_id)?;
        info!("Selected station {} ({} sensors)", station_id, sensors.len());

        self.station_id = Some(station_id);
        self.sensors = sensors;
        self.sensor_id = None;
        self.series.clear();
        Ok(&self.sensors)
    }

    /// Selects a sensor of the current station by parameter name, then fetches and
    /// persists its series.
    pub fn select_sensor(&mut self, param_name: &str) -> Result<&[(String, Option<f64>)], GiosError> {
        if self.station_id.is_none() {
            return Err(GiosError::NoStationSelected);
        }
        let sensor = self
            .sensors
            .iter()
            .find(|s| s.name() == param_name)
            .cloned()
            .ok_or_else(|| GiosError::UnknownSensor(param_name.to_string()))?;

        let series = self.client.fetch_sensor(&sensor)?;
        self.sensor_id = Some(sensor.id);
        self.series = series;
        Ok(&self.series)
    }

    /// Summary of the series loaded for the selected sensor. `Ok(None)` when it has no values.
    pub fn analyze(&self) -> Result<Option<Summary>, GiosError> {
        if self.sensor_id.is_none() {
            return Err(GiosError::NoSensorSelected);
        }
        Ok(summarize(&self.series))
    }

    /// Stored readings of the selected sensor between two date bounds, for plotting.
    pub fn chart_series(
        &self,
        from_date: &str,
        to_date: &str,
    ) -> Result<Vec<(String, Option<f64>)>, GiosError> {
        let sensor_id = self.sensor_id.ok_or(GiosError::NoSensorSelected)?;
        let from_date = parse_date_bound(from_date)?;
        let to_date = parse_date_bound(to_date)?;
        Ok(self.client.store().query_range(sensor_id, from_date, to_date)?)
    }

    pub fn air_quality_index(&self) -> Result<AqIndex, GiosError> {
        let station_id = self.station_id.ok_or(GiosError::NoStationSelected)?;
        self.client.air_quality_index(station_id)
    }

    /// Names of the stations in `city` (case-insensitive).
    pub fn filter_by_city(&self, city: &str) -> Vec<&str> {
        self.locator
            .by_city(city)
            .into_iter()
            .map(|s| s.station_name.as_str())
            .collect()
    }

    /// Names of the stations within `radius_text` km of the typed coordinates, closest
    /// first. An empty radius lists every station by distance.
    pub fn filter_by_radius(
        &self,
        radius_text: &str,
        latitude_text: &str,
        longitude_text: &str,
    ) -> Result<Vec<&str>, GiosError> {
        let origin = parse_coordinates(latitude_text, longitude_text)?;
        let stations = if radius_text.trim().is_empty() {
            self.locator.by_distance(origin)
        } else {
            let radius_km = parse_radius_km(radius_text)?;
            self.locator.within_radius(origin, radius_km)
        };
        Ok(stations
            .into_iter()
            .map(|(s, _)| s.station_name.as_str())
            .collect())
    }
}
