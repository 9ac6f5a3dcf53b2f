use serde::{Deserialize, Serialize};

/// The triple identifying a logged-in client.
///
/// All three values must be present for a session to be considered
/// valid; protected screens redirect to login otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl Session {
    pub fn new(user_id: String, access_token: String, refresh_token: String) -> Self {
        Self {
            user_id,
            access_token,
            refresh_token,
        }
    }

    /// A session with any blank entry counts as absent.
    pub fn is_complete(&self) -> bool {
        !self.user_id.is_empty() && !self.access_token.is_empty() && !self.refresh_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_session() {
        let s = Session::new("u1".into(), "at".into(), "rt".into());
        assert!(s.is_complete());
    }

    #[test]
    fn missing_token_is_incomplete() {
        let s = Session::new("u1".into(), "".into(), "rt".into());
        assert!(!s.is_complete());
    }
}
