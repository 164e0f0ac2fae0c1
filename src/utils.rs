use std::path::PathBuf;

const DATA_DIR_NAME: &str = "gios_air";
const DATABASE_FILE_NAME: &str = "air_quality.db";

/// `<platform data dir>/gios_air/air_quality.db`, e.g. `~/.local/share/gios_air/air_quality.db`.
pub fn default_database_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join(DATA_DIR_NAME).join(DATABASE_FILE_NAME))
}
