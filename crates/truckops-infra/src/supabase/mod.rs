pub mod auth;
pub mod client;
pub mod loads_repo;

pub use auth::AuthClient;
pub use client::SupabaseClient;
pub use loads_repo::SupabaseLoadRepository;
