use gios_air::{
    parse_coordinates, parse_radius_km, ApiClient, GiosError, StationLocator, DEFAULT_BASE_URL,
};
use std::env;

fn main() -> Result<(), GiosError> {
    env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();
    let (lat, lon, radius) = match args.as_slice() {
        [lat, lon, radius] => (lat.as_str(), lon.as_str(), radius.as_str()),
        _ => ("52.2296756", "21.0122287", "10"),
    };
    let origin = parse_coordinates(lat, lon)?;
    let radius_km = parse_radius_km(radius)?;

    let api = ApiClient::new(DEFAULT_BASE_URL)?;
    let locator = StationLocator::new(api.stations()?);

    let found = locator.within_radius(origin, radius_km);
    println!("{} stations within {} km of {:?}", found.len(), radius_km, origin);
    for (station, distance_km) in found {
        println!(
            "{:>6} {:<45} {:>6.2} km  {}",
            station.id,
            station.station_name,
            distance_km,
            station.city_name().unwrap_or("-")
        );
    }
    Ok(())
}
