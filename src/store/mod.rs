pub mod error;
pub mod local_store;
mod schema;
