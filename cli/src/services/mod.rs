pub mod csv_service;
pub mod data_source;

pub use csv_service::*;
pub use data_source::*;
