pub mod analysis;
pub mod stock_data;

pub use analysis::*;
pub use stock_data::*;
