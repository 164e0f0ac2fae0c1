pub(crate) const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS sensors (
        sensor_id INTEGER PRIMARY KEY,
        name TEXT
    );
    -- No unique key: re-fetching a sensor appends duplicate rows.
    CREATE TABLE IF NOT EXISTS readings (
        sensor_id INTEGER,
        timestamp TEXT,
        value REAL,
        FOREIGN KEY(sensor_id) REFERENCES sensors(sensor_id)
    );
";

pub(crate) const INSERT_SENSOR: &str =
    "INSERT OR IGNORE INTO sensors (sensor_id, name) VALUES (?1, ?2)";

pub(crate) const INSERT_READING: &str =
    "INSERT INTO readings (sensor_id, timestamp, value) VALUES (?1, ?2, ?3)";

pub(crate) const SELECT_RANGE: &str = "SELECT timestamp, value FROM readings
     WHERE sensor_id = ?1 AND timestamp BETWEEN ?2 AND ?3
     ORDER BY rowid";

pub(crate) const SELECT_ALL: &str =
    "SELECT timestamp, value FROM readings WHERE sensor_id = ?1 ORDER BY rowid";

pub(crate) const SELECT_SENSOR: &str = "SELECT sensor_id, name FROM sensors WHERE sensor_id = ?1";

pub(crate) const SELECT_SENSORS: &str = "SELECT sensor_id, name FROM sensors ORDER BY sensor_id";
