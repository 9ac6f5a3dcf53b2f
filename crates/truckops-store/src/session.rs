//! File-backed session store
//!
//! Holds the three string entries identifying the logged-in client
//! (`user_id`, `access_token`, `refresh_token`) in a JSON file under
//! the store directory. Every screen reads this on entry; logout
//! clears it.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use truckops_types::{Error, Result, Session};

const USER_ID: &str = "user_id";
const ACCESS_TOKEN: &str = "access_token";
const REFRESH_TOKEN: &str = "refresh_token";

/// Persistent key-value store for the session triple.
pub struct SessionStore {
    store_path: PathBuf,
    values: HashMap<String, String>,
}

impl SessionStore {
    /// Create or load a store in the given directory.
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("session.json");

        let values = if store_path.exists() {
            let file = File::open(&store_path)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).unwrap_or_default()
        } else {
            HashMap::new()
        };

        Ok(Self { store_path, values })
    }

    /// The default store directory under the platform data dir.
    pub fn default_dir() -> Result<PathBuf> {
        let dir = dirs::data_dir()
            .ok_or_else(|| Error::Store("No data directory available".to_string()))?
            .join("truckops");
        Ok(dir)
    }

    fn save(&self) -> Result<()> {
        let file = File::create(&self.store_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.values)?;
        Ok(())
    }

    /// The stored session, if all three entries are present.
    pub fn session(&self) -> Option<Session> {
        let session = Session::new(
            self.values.get(USER_ID)?.clone(),
            self.values.get(ACCESS_TOKEN)?.clone(),
            self.values.get(REFRESH_TOKEN)?.clone(),
        );
        session.is_complete().then_some(session)
    }

    /// Persist a freshly issued session.
    pub fn set_session(&mut self, session: &Session) -> Result<()> {
        self.values
            .insert(USER_ID.to_string(), session.user_id.clone());
        self.values
            .insert(ACCESS_TOKEN.to_string(), session.access_token.clone());
        self.values
            .insert(REFRESH_TOKEN.to_string(), session.refresh_token.clone());
        self.save()
    }

    /// Remove all session entries (logout).
    pub fn clear(&mut self) -> Result<()> {
        self.values.remove(USER_ID);
        self.values.remove(ACCESS_TOKEN);
        self.values.remove(REFRESH_TOKEN);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session() -> Session {
        Session::new("user-1".into(), "access".into(), "refresh".into())
    }

    #[test]
    fn empty_store_has_no_session() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path().to_path_buf()).unwrap();
        assert!(store.session().is_none());
    }

    #[test]
    fn session_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = SessionStore::open(dir.path().to_path_buf()).unwrap();
            store.set_session(&session()).unwrap();
        }
        let store = SessionStore::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.session(), Some(session()));
    }

    #[test]
    fn clear_removes_all_entries() {
        let dir = TempDir::new().unwrap();
        let mut store = SessionStore::open(dir.path().to_path_buf()).unwrap();
        store.set_session(&session()).unwrap();
        store.clear().unwrap();
        assert!(store.session().is_none());

        let reopened = SessionStore::open(dir.path().to_path_buf()).unwrap();
        assert!(reopened.session().is_none());
    }

    #[test]
    fn corrupt_file_falls_back_to_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("session.json"), "not json").unwrap();
        let store = SessionStore::open(dir.path().to_path_buf()).unwrap();
        assert!(store.session().is_none());
    }
}
