//! Domain layer for TruckOps: load records, the add-load form,
//! and weekly aggregation.

pub mod model;
pub mod repository;
pub mod service;
