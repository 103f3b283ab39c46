use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

use crate::provider::cwb::DEFAULT_ENDPOINT;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// authorization_key = "CWB-0123..."
/// endpoint = "https://opendata.cwb.gov.tw/api/v1/rest/datastore/O-A0003-001"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Open-data authorization key sent as the `Authorization` query parameter.
    pub authorization_key: Option<String>,

    /// Overrides the observation endpoint; the public dataset URL when absent.
    pub endpoint: Option<String>,
}

impl Config {
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Pick the key to use: an explicit one (flag or environment) wins over the file.
    pub fn resolve_authorization(&self, explicit: Option<String>) -> Result<String> {
        explicit
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.authorization_key.clone())
            .ok_or_else(|| {
                anyhow!(
                    "No authorization key configured.\n\
                     Hint: run `cwb-obs configure` or set CWB_AUTHORIZATION_KEY."
                )
            })
    }

    /// Store the key, keeping any endpoint override.
    pub fn set_authorization_key(&mut self, key: String) {
        self.authorization_key = Some(key.trim().to_string());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(&path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("tw", "cwb-obs", "cwb-obs")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_errors_when_no_key_anywhere() {
        let cfg = Config::default();
        let err = cfg.resolve_authorization(None).unwrap_err();

        assert!(err.to_string().contains("No authorization key configured"));
        assert!(err.to_string().contains("cwb-obs configure"));
    }

    #[test]
    fn explicit_key_wins_over_file() {
        let mut cfg = Config::default();
        cfg.set_authorization_key("FILE_KEY".into());

        let key = cfg.resolve_authorization(Some("ENV_KEY".into())).expect("key must resolve");
        assert_eq!(key, "ENV_KEY");
    }

    #[test]
    fn blank_explicit_key_falls_back_to_file() {
        let mut cfg = Config::default();
        cfg.set_authorization_key("  FILE_KEY \n".into());

        let key = cfg.resolve_authorization(Some("  ".into())).expect("key must resolve");
        assert_eq!(key, "FILE_KEY");
    }

    #[test]
    fn endpoint_defaults_to_public_dataset() {
        assert_eq!(Config::default().endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn toml_roundtrip_keeps_both_fields() {
        let cfg = Config {
            authorization_key: Some("KEY".into()),
            endpoint: Some("http://localhost:8080/obs".into()),
        };

        let text = cfg.to_toml().expect("config should serialize");
        let back = Config::from_toml(&text).expect("config should parse");

        assert_eq!(back.authorization_key.as_deref(), Some("KEY"));
        assert_eq!(back.endpoint(), "http://localhost:8080/obs");
    }

    #[test]
    fn empty_file_is_default_config() {
        let cfg = Config::from_toml("").expect("empty config should parse");

        assert!(cfg.authorization_key.is_none());
        assert!(cfg.endpoint.is_none());
    }

    #[test]
    fn missing_file_is_default_config() {
        let cfg = Config::load_from(Path::new("/nonexistent/cwb-obs/config.toml"))
            .expect("missing file should not be an error");

        assert!(cfg.authorization_key.is_none());
    }
}
