//! Blocking client for the GIOŚ `pjp-api/rest` endpoints.

use crate::api::error::ApiError;
use crate::types::aq_index::AqIndex;
use crate::types::measurement::Measurements;
use crate::types::sensor::SensorInfo;
use crate::types::station::Station;
use log::{debug, info, warn};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

pub const DEFAULT_BASE_URL: &str = "https://api.gios.gov.pl/pjp-api/rest/";
const USER_AGENT: &str = concat!("gios-air/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper over the four read endpoints. Every call blocks until the response
/// is decoded; failures are returned as-is, never retried.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ApiError::ClientBuild)?;
        Ok(Self::with_http_client(base_url, http))
    }

    /// Uses a preconfigured `reqwest` client, e.g. one with custom TLS roots or proxy rules.
    pub fn with_http_client(base_url: &str, http: Client) -> Self {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `station/findAll`
    pub fn stations(&self) -> Result<Vec<Station>, ApiError> {
        let stations: Vec<Station> = self.get_json("station/findAll")?;
        info!("Fetched {} stations", stations.len());
        Ok(stations)
    }

    /// `station/sensors/{station_id}`
    pub fn sensors(&self, station_id: i64) -> Result<Vec<SensorInfo>, ApiError> {
        self.get_json(&format!("station/sensors/{station_id}"))
    }

    /// `data/getData/{sensor_id}`
    pub fn measurements(&self, sensor_id: i64) -> Result<Measurements, ApiError> {
        self.get_json(&format!("data/getData/{sensor_id}"))
    }

    /// `aqindex/getIndex/{station_id}`
    pub fn air_quality_index(&self, station_id: i64) -> Result<AqIndex, ApiError> {
        self.get_json(&format!("aqindex/getIndex/{station_id}"))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| ApiError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    ApiError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    ApiError::NetworkRequest(url, e)
                });
            }
        };

        response
            .json::<T>()
            .map_err(|e| ApiError::JsonDecode(url, e))
    }
}
