//! Repository trait definitions for remote data access

use truckops_types::{Error, Session};

use crate::model::{Load, NewLoad, RateSample};
use crate::service::weekly_stats::WeekWindow;

/// Repository for load records.
///
/// Implementations scope every query to the owning dispatcher; callers
/// never pass the dispatcher id per call.
pub trait LoadRepository {
    /// Insert one new load
    fn insert(&self, load: &NewLoad) -> Result<(), Error>;

    /// The dispatcher's most recent loads, ordered by date descending
    fn recent(&self, limit: usize) -> Result<Vec<Load>, Error>;

    /// Delete a load by id
    fn delete(&self, id: i64) -> Result<(), Error>;

    /// Date and rate of every load in the given week
    fn week_samples(&self, week: &WeekWindow) -> Result<Vec<RateSample>, Error>;

    /// Number of loads in the given week, counted on the store
    fn week_count(&self, week: &WeekWindow) -> Result<u64, Error>;
}

/// Authentication backend.
pub trait AuthProvider {
    /// Exchange credentials for a session triple
    fn sign_in(&self, email: &str, password: &str) -> Result<Session, Error>;

    /// Register a new account
    fn sign_up(&self, email: &str, password: &str) -> Result<(), Error>;

    /// Ask the backend to email a password reset link
    fn request_password_reset(&self, email: &str) -> Result<(), Error>;
}
