use crate::api::error::ApiError;
use crate::store::error::StoreError;
use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GiosError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to determine data directory")]
    DataDirResolution,

    #[error("No station named '{0}'")]
    UnknownStation(String),

    #[error("No sensor measuring '{0}' at the selected station")]
    UnknownSensor(String),

    #[error("No station selected")]
    NoStationSelected,

    #[error("No sensor selected")]
    NoSensorSelected,
}
