//! File-backed SQLite store for sensors and their readings.
//!
//! Every operation opens its own connection and drops it before returning, so no
//! lock is held between calls and every statement commits on its own.

use crate::store::error::StoreError;
use crate::store::schema::{
    INSERT_READING, INSERT_SENSOR, SCHEMA, SELECT_ALL, SELECT_RANGE, SELECT_SENSOR,
    SELECT_SENSORS,
};
use crate::types::reading::Sensor;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::io;
use std::path::{Path, PathBuf};

/// Handle to the store file. Cheap to clone; holds no connection.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the store file. A missing file is not an error.
    pub fn reset(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Removed store {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Reset(self.path.clone(), e)),
        }
    }

    /// Creates the `sensors` and `readings` tables if they are absent.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| StoreError::Schema(self.path.clone(), e))?;
        debug!("Schema ready in {}", self.path.display());
        Ok(())
    }

    /// Inserts a sensor unless one with the same id exists. The first name wins.
    pub fn upsert_sensor(&self, sensor_id: i64, name: &str) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute(INSERT_SENSOR, params![sensor_id, name])
            .map_err(|e| StoreError::Write(self.path.clone(), e))?;
        Ok(())
    }

    /// Appends one reading. Duplicates are kept.
    pub fn append_reading(
        &self,
        sensor_id: i64,
        timestamp: &str,
        value: Option<f64>,
    ) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute(INSERT_READING, params![sensor_id, timestamp, value])
            .map_err(|e| StoreError::Write(self.path.clone(), e))?;
        Ok(())
    }

    /// Readings of `sensor_id` whose timestamp lies in `[from_date, to_date]`, compared
    /// as strings. Bounds must use the same `yyyy-mm-dd` prefix form as the stored
    /// timestamps. Note that `to_date = "2020-06-30"` excludes `"2020-06-30 01:00:00"`.
    pub fn query_range(
        &self,
        sensor_id: i64,
        from_date: &str,
        to_date: &str,
    ) -> Result<Vec<(String, Option<f64>)>, StoreError> {
        let conn = self.connect()?;
        self.select_series(&conn, SELECT_RANGE, params![sensor_id, from_date, to_date])
    }

    /// Every reading of `sensor_id`, in insertion order.
    pub fn query_all(&self, sensor_id: i64) -> Result<Vec<(String, Option<f64>)>, StoreError> {
        let conn = self.connect()?;
        self.select_series(&conn, SELECT_ALL, params![sensor_id])
    }

    pub fn sensor(&self, sensor_id: i64) -> Result<Option<Sensor>, StoreError> {
        let conn = self.connect()?;
        conn.query_row(SELECT_SENSOR, params![sensor_id], |row| {
            Ok(Sensor {
                sensor_id: row.get(0)?,
                name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            })
        })
        .optional()
        .map_err(|e| StoreError::Read(self.path.clone(), e))
    }

    pub fn sensors(&self) -> Result<Vec<Sensor>, StoreError> {
        let conn = self.connect()?;
        let read_err = |e: rusqlite::Error| StoreError::Read(self.path.clone(), e);
        let mut stmt = conn.prepare(SELECT_SENSORS).map_err(read_err)?;
        let sensors = stmt
            .query_map([], |row| {
                Ok(Sensor {
                    sensor_id: row.get(0)?,
                    name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                })
            })
            .map_err(read_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_err)?;
        Ok(sensors)
    }

    fn select_series(
        &self,
        conn: &Connection,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<(String, Option<f64>)>, StoreError> {
        let read_err = |e: rusqlite::Error| StoreError::Read(self.path.clone(), e);
        let mut stmt = conn.prepare(sql).map_err(read_err)?;
        let rows: Vec<(String, Option<f64>)> = stmt
            .query_map(params, |row| Ok((row.get(0)?, row.get(1)?)))
            .map_err(read_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_err)?;
        Ok(rows)
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::DirCreation(parent.to_path_buf(), e))?;
            }
        }
        let conn =
            Connection::open(&self.path).map_err(|e| StoreError::Open(self.path.clone(), e))?;
        // The bundled SQLite enforces foreign keys by default; readings may precede their sensor.
        conn.pragma_update(None, "foreign_keys", false)
            .map_err(|e| StoreError::Open(self.path.clone(), e))?;
        Ok(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fresh_store() -> (TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("air_quality.db"));
        store.ensure_schema().unwrap();
        (dir, store)
    }

    fn table_names(store: &LocalStore) -> Vec<String> {
        let conn = Connection::open(store.path()).unwrap();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap()
    }

    #[test]
    fn ensure_schema_is_idempotent() {
        let (_dir, store) = fresh_store();
        store.ensure_schema().unwrap();
        assert_eq!(table_names(&store), vec!["readings", "sensors"]);
    }

    #[test]
    fn first_sensor_name_wins() {
        let (_dir, store) = fresh_store();
        store.upsert_sensor(1, "PM10").unwrap();
        store.upsert_sensor(1, "PM2.5").unwrap();

        assert_eq!(
            store.sensors().unwrap(),
            vec![Sensor {
                sensor_id: 1,
                name: "PM10".to_string()
            }]
        );
        assert_eq!(store.sensor(1).unwrap().unwrap().name, "PM10");
        assert!(store.sensor(2).unwrap().is_none());
    }

    #[test]
    fn appended_reading_is_returned() {
        let (_dir, store) = fresh_store();
        store.upsert_sensor(1, "PM10").unwrap();
        store
            .append_reading(1, "2022-01-01 00:00:00", Some(50.0))
            .unwrap();

        assert_eq!(
            store.query_all(1).unwrap(),
            vec![("2022-01-01 00:00:00".to_string(), Some(50.0))]
        );
    }

    #[test]
    fn null_values_are_persisted() {
        let (_dir, store) = fresh_store();
        store.append_reading(7, "2022-01-01 01:00:00", None).unwrap();
        assert_eq!(
            store.query_all(7).unwrap(),
            vec![("2022-01-01 01:00:00".to_string(), None)]
        );
    }

    #[test]
    fn refetch_duplicates_rows() {
        let (_dir, store) = fresh_store();
        for _ in 0..2 {
            store.upsert_sensor(3, "NO2").unwrap();
            store
                .append_reading(3, "2022-03-01 10:00:00", Some(12.5))
                .unwrap();
        }
        assert_eq!(store.query_all(3).unwrap().len(), 2);
        assert_eq!(store.sensors().unwrap().len(), 1);
    }

    #[test]
    fn reading_without_sensor_is_accepted() {
        let (_dir, store) = fresh_store();
        store
            .append_reading(404, "2022-01-01 00:00:00", Some(1.0))
            .unwrap();
        assert!(store.sensor(404).unwrap().is_none());
        assert_eq!(store.query_all(404).unwrap().len(), 1);
    }

    #[test]
    fn connections_do_not_enforce_foreign_keys() {
        let (_dir, store) = fresh_store();
        let conn = store.connect().unwrap();
        let enabled: bool = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert!(!enabled);
    }

    #[test]
    fn query_range_compares_strings_and_keeps_insertion_order() {
        let (_dir, store) = fresh_store();
        let rows = [
            ("2020-03-01 00:00:00", Some(3.0)),
            ("2021-01-01 00:00:00", Some(9.0)),
            ("2020-01-01 00:00:00", Some(1.0)),
            ("2020-06-30", Some(6.0)),
            ("2020-06-30 12:00:00", Some(7.0)),
        ];
        for (ts, value) in rows {
            store.append_reading(1, ts, value).unwrap();
        }
        store.append_reading(2, "2020-02-01 00:00:00", Some(99.0)).unwrap();

        let result = store.query_range(1, "2020-01-01", "2020-06-30").unwrap();
        assert_eq!(
            result,
            vec![
                ("2020-03-01 00:00:00".to_string(), Some(3.0)),
                ("2020-01-01 00:00:00".to_string(), Some(1.0)),
                ("2020-06-30".to_string(), Some(6.0)),
            ]
        );
    }

    #[test]
    fn query_all_on_unknown_sensor_is_empty() {
        let (_dir, store) = fresh_store();
        assert!(store.query_all(12345).unwrap().is_empty());
    }

    #[test]
    fn reset_removes_everything() {
        let (_dir, store) = fresh_store();
        store.upsert_sensor(1, "PM10").unwrap();
        store.append_reading(1, "2022-01-01 00:00:00", Some(5.0)).unwrap();

        store.reset().unwrap();
        assert!(!store.path().exists());

        store.ensure_schema().unwrap();
        assert!(store.sensors().unwrap().is_empty());
        assert!(store.query_all(1).unwrap().is_empty());
    }

    #[test]
    fn reset_without_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("missing.db"));
        store.reset().unwrap();
        store.reset().unwrap();
    }

    #[test]
    fn creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("nested").join("deeper").join("aq.db"));
        store.ensure_schema().unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn query_before_schema_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("empty.db"));
        assert!(matches!(store.query_all(1), Err(StoreError::Read(..))));
    }
}
