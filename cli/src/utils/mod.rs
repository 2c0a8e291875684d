pub mod date;
pub mod indicators;
pub mod logger;

pub use date::*;
pub use logger::*;
