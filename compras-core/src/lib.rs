pub mod api;
pub mod calculations;
pub mod currency;
pub mod cuit;
pub mod models;
pub mod report;

pub use api::{ApiError, ComprasBackend};
pub use models::*;
