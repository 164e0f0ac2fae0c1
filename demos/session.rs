use gios_air::{GiosAir, GiosError, Session};

fn main() -> Result<(), GiosError> {
    env_logger::init();
    let client = GiosAir::builder()
        .database_path("air_quality.db")
        .reset_store(true)
        .build()?;
    let mut session = Session::new(&client);

    session.load_stations()?;
    let krakow = session.filter_by_city("Kraków");
    let Some(station) = krakow.first().map(|name| name.to_string()) else {
        println!("No stations in Kraków");
        return Ok(());
    };
    println!("Kraków stations: {:?}", krakow);

    let sensors = session.select_station(&station)?;
    let names: Vec<String> = sensors.iter().map(|s| s.name().to_string()).collect();
    println!("{station}: {names:?}");

    let Some(first) = names.first() else {
        return Ok(());
    };
    session.select_sensor(first)?;
    match session.analyze()? {
        Some(summary) => println!("{summary}"),
        None => println!("Not enough data to analyze"),
    }

    let chart = session.chart_series("2020-01-01", "2030-01-01")?;
    for reading in chart.iter().take(5) {
        println!("{:?}", reading);
    }
    Ok(())
}
