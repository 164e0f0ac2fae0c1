pub mod aq_index;
pub mod measurement;
pub mod reading;
pub mod sensor;
pub mod station;
