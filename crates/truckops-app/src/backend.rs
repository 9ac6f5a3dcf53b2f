//! Backend construction from configuration

use truckops_infra::{AuthClient, SupabaseClient, SupabaseLoadRepository, ZipLookupClient};
use truckops_types::{ConfigError, Result, Session};

use crate::config::Config;

/// The remote clients one configured backend provides.
#[derive(Debug, Clone)]
pub struct Backend {
    client: SupabaseClient,
    auth: AuthClient,
    zip: ZipLookupClient,
}

impl Backend {
    /// Build all clients from the config, or fail when it is
    /// incomplete. Startup routes to the setup screen on failure.
    pub fn connect(config: &Config) -> Result<Self> {
        if !config.is_configured() {
            return Err(ConfigError::NotConfigured.into());
        }
        let client = SupabaseClient::new(&config.supabase_url, &config.supabase_key)?;
        let auth = AuthClient::new(client.clone());
        let zip = ZipLookupClient::new()?;
        tracing::info!(url = %config.supabase_url, "backend configured");
        Ok(Self { client, auth, zip })
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    pub fn zip(&self) -> &ZipLookupClient {
        &self.zip
    }

    /// A load repository scoped to the given session.
    pub fn loads(&self, session: &Session) -> SupabaseLoadRepository {
        SupabaseLoadRepository::new(self.client.clone(), session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use truckops_types::Error;

    #[test]
    fn unconfigured_backend_fails_with_config_error() {
        let err = Backend::connect(&Config::default()).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::NotConfigured)));
    }

    #[test]
    fn configured_backend_connects() {
        let config = Config {
            supabase_url: "https://proj.supabase.co".to_string(),
            supabase_key: "anon".to_string(),
        };
        assert!(Backend::connect(&config).is_ok());
    }
}
