//! Application wiring for TruckOps

pub mod backend;
pub mod config;
pub mod routes;

pub use backend::Backend;
pub use config::Config;
pub use routes::Route;
