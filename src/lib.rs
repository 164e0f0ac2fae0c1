mod api;
mod error;
mod gios_air;
mod session;
mod stations;
mod store;
mod summary;
mod types;
mod utils;
mod validation;

pub use error::GiosError;
pub use gios_air::*;

pub use api::client::{ApiClient, DEFAULT_BASE_URL};
pub use api::error::ApiError;

pub use store::error::StoreError;
pub use store::local_store::LocalStore;

pub use summary::{summarize, Summary, Trend};

pub use session::Session;
pub use stations::locate_station::StationLocator;

pub use types::aq_index::{AqIndex, IndexLevel};
pub use types::measurement::{MeasurementValue, Measurements};
pub use types::reading::{Reading, Sensor, TIMESTAMP_FORMAT};
pub use types::sensor::{Param, SensorInfo};
pub use types::station::{City, Commune, Station};

pub use utils::default_database_path;
pub use validation::{parse_coordinates, parse_date_bound, parse_radius_km, ValidationError};
