//! Supabase-backed implementation of the load repository
//!
//! Every query carries the `dispatcher_name` equality filter; this is
//! the only place ownership scoping is constructed, so a screen cannot
//! accidentally query another dispatcher's rows.

use truckops_domain::model::{Load, NewLoad, RateSample};
use truckops_domain::repository::LoadRepository;
use truckops_domain::service::weekly_stats::WeekWindow;
use truckops_types::{Error, Session};

use super::client::SupabaseClient;

const LOADS_TABLE: &str = "Loads";

/// Load repository bound to one dispatcher's session.
#[derive(Clone)]
pub struct SupabaseLoadRepository {
    client: SupabaseClient,
    session: Session,
}

impl SupabaseLoadRepository {
    pub fn new(client: SupabaseClient, session: Session) -> Self {
        Self { client, session }
    }

    pub fn dispatcher_id(&self) -> &str {
        &self.session.user_id
    }

    fn token(&self) -> &str {
        &self.session.access_token
    }
}

impl LoadRepository for SupabaseLoadRepository {
    fn insert(&self, load: &NewLoad) -> Result<(), Error> {
        self.client
            .table(LOADS_TABLE)
            .insert(load, self.token())
    }

    fn recent(&self, limit: usize) -> Result<Vec<Load>, Error> {
        self.client
            .table(LOADS_TABLE)
            .select("*")
            .eq("dispatcher_name", self.dispatcher_id())
            .order_desc("date")
            .limit(limit)
            .fetch(self.token())
    }

    fn delete(&self, id: i64) -> Result<(), Error> {
        self.client
            .table(LOADS_TABLE)
            .eq("id", &id.to_string())
            .delete(self.token())
    }

    fn week_samples(&self, week: &WeekWindow) -> Result<Vec<RateSample>, Error> {
        self.client
            .table(LOADS_TABLE)
            .select("date,total_rate")
            .gte("date", &week.start.to_string())
            .lt("date", &week.end.to_string())
            .eq("dispatcher_name", self.dispatcher_id())
            .fetch(self.token())
    }

    fn week_count(&self, week: &WeekWindow) -> Result<u64, Error> {
        self.client
            .table(LOADS_TABLE)
            .select("id")
            .gte("date", &week.start.to_string())
            .lt("date", &week.end.to_string())
            .eq("dispatcher_name", self.dispatcher_id())
            .count(self.token())
    }
}
