//! Persistent client-side storage for TruckOps

mod session;

pub use session::SessionStore;
