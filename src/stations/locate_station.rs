use crate::types::station::Station;
use crate::LatLon;
use haversine::{distance, Location as HaversineLocation, Units};
use ordered_float::OrderedFloat;
use rstar::RTree;

/// Polar radius; no sphere `haversine` uses is smaller, so reach bounds derived from it hold.
const MIN_EARTH_RADIUS_KM: f64 = 6356.0;

/// Station list indexed for name, city and distance lookups.
#[derive(Debug, Clone)]
pub struct StationLocator {
    stations: Vec<Station>,
    rtree: RTree<Station>,
}

impl StationLocator {
    pub fn new(stations: Vec<Station>) -> Self {
        let rtree = RTree::bulk_load(stations.clone());
        StationLocator { stations, rtree }
    }

    /// All stations, in the order the API returned them.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn by_id(&self, id: i64) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// First station whose name matches exactly.
    pub fn by_name(&self, name: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.station_name == name)
    }

    /// Stations in `city`, compared case-insensitively. Keeps API order.
    pub fn by_city(&self, city: &str) -> Vec<&Station> {
        let wanted = city.trim().to_lowercase();
        self.stations
            .iter()
            .filter(|s| s.city_name().is_some_and(|c| c.to_lowercase() == wanted))
            .collect()
    }

    /// Every station with its Haversine distance from `origin`, closest first.
    pub fn by_distance(&self, origin: LatLon) -> Vec<(&Station, f64)> {
        let mut stations: Vec<(&Station, f64)> = self
            .stations
            .iter()
            .map(|s| (s, distance_km(origin, s)))
            .collect();
        stations.sort_by_key(|(_, d)| OrderedFloat(*d));
        stations
    }

    /// Stations no further than `radius_km` from `origin`, closest first.
    pub fn within_radius(&self, origin: LatLon, radius_km: f64) -> Vec<(&Station, f64)> {
        let Some(reach) = degree_reach(origin, radius_km) else {
            // Near a pole or the antimeridian degree space says nothing useful.
            return self
                .by_distance(origin)
                .into_iter()
                .take_while(|(_, d)| *d <= radius_km)
                .collect();
        };

        let mut found: Vec<(&Station, f64)> = Vec::new();
        for station in self.rtree.nearest_neighbor_iter(&[origin.0, origin.1]) {
            let d_lat = station.gegr_lat - origin.0;
            let d_lon = station.gegr_lon - origin.1;
            if d_lat * d_lat + d_lon * d_lon > reach * reach {
                break;
            }
            let dist_km = distance_km(origin, station);
            if dist_km <= radius_km {
                found.push((station, dist_km));
            }
        }

        found.sort_by_key(|(_, d)| OrderedFloat(*d));
        found
    }
}

/// Largest degree-space distance a point within `radius_km` of `origin` can have.
///
/// From the haversine formula, with `R` the sphere radius: `|Δlat| <= r / R`, and
/// `sin(Δlon / 2) <= sin(r / 2R) / cos(φ)` for the largest `|φ|` the point can reach.
/// `None` when that bound does not exist or crosses the antimeridian.
fn degree_reach(origin: LatLon, radius_km: f64) -> Option<f64> {
    if !radius_km.is_finite() || radius_km < 0.0 {
        return None;
    }
    let angle = radius_km / MIN_EARTH_RADIUS_KM;
    let d_lat = angle.to_degrees();
    let max_lat = origin.0.abs() + d_lat;
    if max_lat >= 90.0 {
        return None;
    }
    let ratio = (angle / 2.0).min(std::f64::consts::FRAC_PI_2).sin() / max_lat.to_radians().cos();
    if ratio >= 1.0 {
        return None;
    }
    let d_lon = (2.0 * ratio.asin()).to_degrees();
    if origin.1.abs() + d_lon > 180.0 {
        return None;
    }
    // Small margin for rounding in the distance computations.
    Some(d_lat.hypot(d_lon) * (1.0 + 1e-9) + 1e-9)
}

fn distance_km(origin: LatLon, station: &Station) -> f64 {
    distance(
        HaversineLocation {
            latitude: origin.0,
            longitude: origin.1,
        },
        HaversineLocation {
            latitude: station.gegr_lat,
            longitude: station.gegr_lon,
        },
        Units::Kilometers,
    )
}
