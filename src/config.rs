//! Configuration Management
//!
//! Handles persistent connection settings for the Netlify datasource.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default base URL of the Netlify REST API
pub const DEFAULT_BASE_URL: &str = "https://api.netlify.com/api/v1";

/// Environment variable consulted for the access token
const TOKEN_ENV_VAR: &str = "NETLIFY_ACCESS_TOKEN";

/// Connection settings
///
/// The access token is write-only: it can be set and tested for presence,
/// but is never exposed for display or logging.
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Base URL of the Netlify REST API
    #[serde(default)]
    pub base_url: Option<String>,
    /// Access token used as the bearer credential
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    /// Default site id applied when a query leaves its site id empty
    #[serde(default)]
    pub site_id: Option<String>,
    /// Account id used by account-scoped entities
    #[serde(default)]
    pub account_id: Option<String>,
}

impl Settings {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("netlify-datasource").join("config.json"))
    }

    /// Load configuration from disk, with the token overridable from the
    /// environment
    pub fn load() -> Self {
        let mut settings = Self::load_from_disk();

        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.is_empty() {
                settings.access_token = Some(token);
            }
        }

        settings
    }

    fn load_from_disk() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Settings pointed at a specific API endpoint
    ///
    /// Used by tools and tests that talk to something other than the
    /// production API; everything else starts empty.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    /// Get effective base URL (config > built-in default)
    pub fn effective_base_url(&self) -> String {
        self.base_url
            .clone()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Get the configured default site id, or empty when none is set
    pub fn effective_site_id(&self) -> String {
        self.site_id.clone().unwrap_or_default()
    }

    /// Get the configured account id, or empty when none is set
    pub fn effective_account_id(&self) -> String {
        self.account_id.clone().unwrap_or_default()
    }

    /// Replace the access token; an empty token clears it
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        let token = token.into();
        self.access_token = if token.is_empty() { None } else { Some(token) };
    }

    /// Forget the stored access token
    pub fn clear_access_token(&mut self) {
        self.access_token = None;
    }

    /// Whether an access token is present, without revealing it
    pub fn token_configured(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// The bearer credential, readable only inside the crate
    pub(crate) fn bearer_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Check that the settings are usable for API calls
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.effective_base_url())
            .with_context(|| format!("invalid base url: {}", self.effective_base_url()))?;

        anyhow::ensure!(self.token_configured(), "access token is not configured");

        Ok(())
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<configured>"),
            )
            .field("site_id", &self.site_id)
            .field("account_id", &self.account_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings {
            base_url: Some("http://localhost:3000".to_string()),
            site_id: Some("my-site-id".to_string()),
            ..Settings::default()
        };
        settings.set_access_token("my-access-token");
        settings
    }

    #[test]
    fn test_valid_settings_pass_validation() {
        let settings = valid_settings();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.effective_base_url(), "http://localhost:3000");
        assert_eq!(settings.effective_site_id(), "my-site-id");
    }

    #[test]
    fn test_missing_token_fails_validation() {
        let mut settings = valid_settings();
        settings.clear_access_token();

        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("access token"));
    }

    #[test]
    fn test_empty_token_is_not_configured() {
        let mut settings = Settings::default();
        assert!(!settings.token_configured());

        settings.set_access_token("");
        assert!(!settings.token_configured());

        settings.set_access_token("tok");
        assert!(settings.token_configured());
    }

    #[test]
    fn test_base_url_defaults_when_unset() {
        let settings = Settings::default();
        assert_eq!(settings.effective_base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_debug_never_prints_token() {
        let settings = valid_settings();
        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("my-access-token"));
        assert!(rendered.contains("<configured>"));
    }

    #[test]
    fn test_token_is_not_serialized_when_absent() {
        let settings = Settings {
            base_url: Some("http://localhost:3000".to_string()),
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("access_token"));
    }
}
