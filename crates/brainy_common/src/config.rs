//! Configuration for the Brainy Tutor client.
//!
//! Loads settings from the XDG config file or uses defaults. The service
//! base URL is the one required setting; `BRAINY_BASE_URL` overrides the
//! file so scripted environments never need one.

use crate::error::TutorError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Env var overriding the configured base URL.
pub const BASE_URL_ENV: &str = "BRAINY_BASE_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorConfig {
    /// Remote tutoring service base URL. Required before any submission.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Default tutoring persona.
    #[serde(default = "default_profile")]
    pub profile: String,

    /// UI theme preference. Stored here because it shares the settings
    /// file; the core never reads it.
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_timeout() -> u64 {
    30
}

fn default_profile() -> String {
    crate::query::DEFAULT_PROFILE.to_string()
}

fn default_theme() -> String {
    "system".to_string()
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout(),
            profile: default_profile(),
            theme: default_theme(),
        }
    }
}

impl TutorConfig {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("brainy")
            .join("config.toml")
    }

    /// Load from the default location, falling back to defaults when the
    /// file is missing or unreadable. Env override applied last.
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> Self {
        let mut config = match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };

        config.apply_env_override(std::env::var(BASE_URL_ENV).ok());
        config
    }

    fn apply_env_override(&mut self, value: Option<String>) {
        if let Some(url) = value {
            if !url.trim().is_empty() {
                self.base_url = Some(url);
            }
        }
    }

    /// The base URL, or the fatal configuration error raised before any
    /// network attempt.
    pub fn require_base_url(&self) -> Result<&str, TutorError> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                TutorError::Configuration(format!(
                    "service base URL is not set; add base_url to {} or set {}",
                    Self::default_path().display(),
                    BASE_URL_ENV
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_without_file() {
        let dir = tempdir().unwrap();
        let config = TutorConfig::load_from(&dir.path().join("missing.toml"));
        assert!(config.base_url.is_none());
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.profile, "default");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = \"https://tutor.example\"\n").unwrap();

        let config = TutorConfig::load_from(&path);
        assert_eq!(config.base_url.as_deref(), Some("https://tutor.example"));
        assert_eq!(config.theme, "system");
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = [broken").unwrap();

        let config = TutorConfig::load_from(&path);
        assert!(config.base_url.is_none());
    }

    #[test]
    fn env_override_wins_over_file_value() {
        let mut config = TutorConfig {
            base_url: Some("https://from-file.example".to_string()),
            ..Default::default()
        };
        config.apply_env_override(Some("https://from-env.example".to_string()));
        assert_eq!(config.base_url.as_deref(), Some("https://from-env.example"));

        // Blank and absent env values leave the file value alone.
        config.apply_env_override(Some("   ".to_string()));
        config.apply_env_override(None);
        assert_eq!(config.base_url.as_deref(), Some("https://from-env.example"));
    }

    #[test]
    fn missing_base_url_is_a_configuration_error() {
        let config = TutorConfig::default();
        let err = config.require_base_url().unwrap_err();
        assert!(matches!(err, TutorError::Configuration(_)));
    }

    #[test]
    fn blank_base_url_is_a_configuration_error() {
        let config = TutorConfig {
            base_url: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.require_base_url().is_err());
    }
}
