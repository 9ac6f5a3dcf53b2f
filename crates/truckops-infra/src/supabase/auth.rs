//! GoTrue auth endpoints: password sign-in, signup, and reset emails

use serde::Deserialize;
use truckops_domain::repository::AuthProvider;
use truckops_types::{Error, Result, Session};

use super::client::SupabaseClient;

/// Client for the `/auth/v1` endpoints of one Supabase project.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: SupabaseClient,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
}

impl AuthClient {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.client.base_url(), path)
    }

    fn post_json(&self, url: &str, body: serde_json::Value) -> Result<reqwest::blocking::Response> {
        self.client
            .http()
            .post(url)
            .header("apikey", self.client.api_key())
            .json(&body)
            .send()
            .map_err(|e| Error::Network(e.to_string()))
    }
}

impl AuthProvider for AuthClient {
    fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let url = format!("{}?grant_type=password", self.auth_url("token"));
        let resp = self.post_json(
            &url,
            serde_json::json!({ "email": email, "password": password }),
        )?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%status, "sign-in rejected");
            return Err(Error::Auth(format!("Sign-in rejected with {status}")));
        }

        let body = resp.text().map_err(|e| Error::Network(e.to_string()))?;
        session_from_token_response(&body)
    }

    fn sign_up(&self, email: &str, password: &str) -> Result<()> {
        let resp = self.post_json(
            &self.auth_url("signup"),
            serde_json::json!({ "email": email, "password": password }),
        )?;
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%status, "signup rejected");
            return Err(Error::Auth(format!("Signup rejected with {status}")));
        }
        Ok(())
    }

    fn request_password_reset(&self, email: &str) -> Result<()> {
        let resp = self.post_json(
            &self.auth_url("recover"),
            serde_json::json!({ "email": email }),
        )?;
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%status, "password reset rejected");
            return Err(Error::Auth(format!(
                "Password reset rejected with {status}"
            )));
        }
        Ok(())
    }
}

/// Extract the session triple from a token grant response body.
fn session_from_token_response(body: &str) -> Result<Session> {
    let parsed: TokenResponse = serde_json::from_str(body)
        .map_err(|e| Error::Auth(format!("Malformed token response: {e}")))?;
    Ok(Session::new(
        parsed.user.id,
        parsed.access_token,
        parsed.refresh_token,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_yields_full_session() {
        let body = r#"{
            "access_token": "at-123",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "rt-456",
            "user": { "id": "user-789", "email": "d@example.com" }
        }"#;
        let session = session_from_token_response(body).unwrap();
        assert_eq!(session.user_id, "user-789");
        assert_eq!(session.access_token, "at-123");
        assert_eq!(session.refresh_token, "rt-456");
        assert!(session.is_complete());
    }

    #[test]
    fn malformed_token_response_is_auth_error() {
        let err = session_from_token_response("{}").unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
    }
}
