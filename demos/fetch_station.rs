use gios_air::{GiosAir, GiosError};
use std::env;

fn main() -> Result<(), GiosError> {
    env_logger::init();
    let station_id: i64 = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(114);

    let client = GiosAir::builder()
        .database_path("air_quality.db")
        .reset_store(true)
        .build()?;

    let readings = client.fetch_and_persist().station_id(station_id).call()?;
    println!("Stored {} readings for station {}", readings.len(), station_id);

    for sensor in client.store().sensors()? {
        let series = client
            .query_range()
            .sensor_id(sensor.sensor_id)
            .from_date("2020-01-01")
            .to_date("2030-01-01")
            .call()?;
        match client.summarize(&series) {
            Some(summary) => println!("\n{} ({}):\n{}", sensor.name, sensor.sensor_id, summary),
            None => println!("\n{} ({}): no data", sensor.name, sensor.sensor_id),
        }
    }

    let index = client.air_quality_index(station_id)?;
    println!(
        "\nAir quality index: {}",
        index.overall_level().unwrap_or("not computed")
    );
    Ok(())
}
