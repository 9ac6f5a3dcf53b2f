//! Core types for TruckOps

mod error;
mod session;

pub use error::*;
pub use session::*;
