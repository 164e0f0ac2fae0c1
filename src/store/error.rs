use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to create store directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to open store '{0}'")]
    Open(PathBuf, #[source] rusqlite::Error),

    #[error("Failed to create schema in store '{0}'")]
    Schema(PathBuf, #[source] rusqlite::Error),

    #[error("Failed to write to store '{0}'")]
    Write(PathBuf, #[source] rusqlite::Error),

    #[error("Failed to read from store '{0}'")]
    Read(PathBuf, #[source] rusqlite::Error),

    #[error("Failed to delete store '{0}'")]
    Reset(PathBuf, #[source] std::io::Error),
}
