//! Defines the data structures representing GIOŚ measuring stations and their metadata,
//! including the city and commune they belong to. Also includes implementations
//! necessary for spatial indexing using the `rstar` crate.

use rstar::{PointDistance, RTreeObject, AABB};
use serde::{Deserialize, Deserializer, Serialize};

// --- Data Structures ---

/// Represents a single GIOŚ measuring station as returned by `station/findAll`.
///
/// The API serves coordinates as decimal strings (`"50.972167"`); they are parsed
/// into `f64` on deserialization. Numeric coordinates are accepted as well.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// The unique station identifier assigned by GIOŚ (e.g., `14`).
    pub id: i64,
    /// Human readable station name (e.g., "Działoszyn").
    pub station_name: String,
    /// Latitude in decimal degrees.
    #[serde(deserialize_with = "coordinate")]
    pub gegr_lat: f64,
    /// Longitude in decimal degrees.
    #[serde(deserialize_with = "coordinate")]
    pub gegr_lon: f64,
    /// The city the station is located in, if reported.
    #[serde(default)]
    pub city: Option<City>,
    /// Street address, if reported.
    #[serde(default)]
    pub address_street: Option<String>,
}

/// City metadata attached to a [`Station`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub commune: Option<Commune>,
}

/// Administrative units a [`City`] belongs to.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Commune {
    pub commune_name: Option<String>,
    pub district_name: Option<String>,
    pub province_name: Option<String>,
}

impl Station {
    /// Name of the station's city, if the API reported one.
    pub fn city_name(&self) -> Option<&str> {
        self.city.as_ref().map(|c| c.name.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCoordinate {
    Number(f64),
    Text(String),
}

fn coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawCoordinate::deserialize(deserializer)? {
        RawCoordinate::Number(value) => Ok(value),
        RawCoordinate::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid coordinate '{text}': {e}"))),
    }
}

// --- R-Tree Implementations ---

/// Implementation required by `rstar` to treat a `Station` as an object within an R-Tree.
impl RTreeObject for Station {
    type Envelope = AABB<[f64; 2]>;

    /// A station is a point, so its envelope is a degenerate AABB at (latitude, longitude).
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.gegr_lat, self.gegr_lon])
    }
}

/// Squared Euclidean distance in degree space, used for nearest-neighbour ordering only.
/// Real distances are computed with Haversine by the locator.
impl PointDistance for Station {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.gegr_lat - point[0];
        let dy = self.gegr_lon - point[1];
        dx * dx + dy * dy
    }
}
