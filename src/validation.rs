//! Parsing of user-typed filter and date input. Malformed text is rejected, never coerced.

use crate::LatLon;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Radius '{0}' is not a valid non-negative number of kilometers")]
    InvalidRadius(String),

    #[error("Coordinate '{0}' is not a valid {1}")]
    InvalidCoordinate(String, &'static str),

    #[error("Date '{0}' does not start with a yyyy-mm-dd date")]
    InvalidDate(String),
}

/// Parses a radius in kilometers.
pub fn parse_radius_km(text: &str) -> Result<f64, ValidationError> {
    let invalid = || ValidationError::InvalidRadius(text.to_string());
    let radius = text.trim().parse::<f64>().map_err(|_| invalid())?;
    if !radius.is_finite() || radius < 0.0 {
        return Err(invalid());
    }
    Ok(radius)
}

/// Parses a latitude/longitude pair given as decimal degrees.
pub fn parse_coordinates(latitude: &str, longitude: &str) -> Result<LatLon, ValidationError> {
    let lat = parse_degrees(latitude, "latitude", 90.0)?;
    let lon = parse_degrees(longitude, "longitude", 180.0)?;
    Ok(LatLon(lat, lon))
}

fn parse_degrees(text: &str, kind: &'static str, limit: f64) -> Result<f64, ValidationError> {
    let invalid = || ValidationError::InvalidCoordinate(text.to_string(), kind);
    let value = text.trim().parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() || value.abs() > limit {
        return Err(invalid());
    }
    Ok(value)
}

/// Checks that a range bound starts with a real `yyyy-mm-dd` date and returns it
/// unchanged. The store compares bounds as strings, so the text itself is passed on.
pub fn parse_date_bound(text: &str) -> Result<&str, ValidationError> {
    let invalid = || ValidationError::InvalidDate(text.to_string());
    let prefix = text.get(..10).ok_or_else(invalid)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").map_err(|_| invalid())?;
    // "%Y" also accepts unpadded years; insist on the fixed-width form.
    if !prefix.as_bytes()[..4].iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }
    Ok(text)
}
