//! Infrastructure layer for TruckOps: remote table access, auth,
//! and the postal-code lookup.
//!
//! Everything here is blocking; callers run these from worker threads,
//! never from the UI thread.

pub mod supabase;
pub mod zip;

pub use supabase::{AuthClient, SupabaseClient, SupabaseLoadRepository};
pub use zip::{CityState, ZipLookupClient};
