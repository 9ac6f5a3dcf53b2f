//! Backend configuration
//!
//! Two `KEY=value` lines in a local env file, written by the setup
//! screen and read once at process start. Process environment
//! variables of the same names take precedence over the file.

use std::path::{Path, PathBuf};

use truckops_types::{ConfigError, Result};

const URL_KEY: &str = "SUPABASE_URL";
const API_KEY_KEY: &str = "SUPABASE_KEY";

/// Connection settings for the hosted backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_key: String,
}

impl Config {
    /// Default env file path, next to the working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from(".env")
    }

    /// Load from the default path plus process environment.
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// Load from a specific env file. A missing file just yields an
    /// unconfigured instance; startup routing handles that case.
    pub fn load_from(path: &Path) -> Self {
        let mut config = Config::default();

        if let Ok(content) = std::fs::read_to_string(path) {
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    match key.trim() {
                        URL_KEY => config.supabase_url = value.trim().to_string(),
                        API_KEY_KEY => config.supabase_key = value.trim().to_string(),
                        _ => {}
                    }
                }
            }
        }

        if let Ok(url) = std::env::var(URL_KEY) {
            config.supabase_url = url;
        }
        if let Ok(key) = std::env::var(API_KEY_KEY) {
            config.supabase_key = key;
        }

        config
    }

    /// Both values present and non-empty.
    pub fn is_configured(&self) -> bool {
        !self.supabase_url.trim().is_empty() && !self.supabase_key.trim().is_empty()
    }

    /// Write the env file the setup screen produces.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = format!(
            "{URL_KEY}={}\n{API_KEY_KEY}={}\n",
            self.supabase_url, self.supabase_key
        );
        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_unconfigured() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("nope.env"));
        assert!(!config.is_configured());
    }

    #[test]
    fn parses_key_value_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "# backend\nSUPABASE_URL=https://proj.supabase.co\nSUPABASE_KEY=anon\n",
        )
        .unwrap();
        let config = Config::load_from(&path);
        assert_eq!(config.supabase_url, "https://proj.supabase.co");
        assert_eq!(config.supabase_key, "anon");
        assert!(config.is_configured());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        let config = Config {
            supabase_url: "https://proj.supabase.co".to_string(),
            supabase_key: "anon".to_string(),
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn blank_values_do_not_count_as_configured() {
        let config = Config {
            supabase_url: "https://proj.supabase.co".to_string(),
            supabase_key: "  ".to_string(),
        };
        assert!(!config.is_configured());
    }
}
