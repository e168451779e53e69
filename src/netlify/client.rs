//! Netlify Client
//!
//! Main client for interacting with the Netlify REST API, combining the
//! connection settings and HTTP functionality.

use super::http::HttpClient;
use crate::config::Settings;
use anyhow::{Context, Result};
use serde_json::Value;

/// Main Netlify API client
#[derive(Clone)]
pub struct NetlifyClient {
    settings: Settings,
    http: HttpClient,
}

impl NetlifyClient {
    /// Create a new client from validated settings
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let http = HttpClient::new()?;

        Ok(Self { settings, http })
    }

    /// The connection settings this client was built from
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Make a GET request to the Netlify API
    pub async fn get(&self, url: &str) -> Result<Value> {
        let token = self
            .settings
            .bearer_token()
            .context("access token is not configured")?;

        self.http.get(url, token).await
    }

    /// Fetch a URL and normalize the response into a row list
    pub async fn get_rows(&self, url: &str) -> Result<Vec<Value>> {
        let response = self.get(url).await?;
        Ok(rows_from_response(response))
    }

    /// Build a Netlify API URL from a relative path
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.settings.effective_base_url().trim_end_matches('/'),
            path
        )
    }

    /// Build a site-scoped API URL
    pub fn site_url(&self, site_id: &str, resource: &str) -> String {
        self.api_url(&format!(
            "sites/{}/{}",
            urlencoding::encode(site_id),
            resource
        ))
    }

    /// Expand an entity path pattern into a full URL
    ///
    /// `{site_id}` is filled from the requested site id, falling back to the
    /// configured default; `{account_id}` comes from the settings. A pattern
    /// whose placeholder has no value available is an error.
    pub fn entity_url(&self, pattern: &str, site_id: &str) -> Result<String> {
        let mut path = pattern.to_string();

        if path.contains("{site_id}") {
            let sid = if site_id.is_empty() {
                self.settings.effective_site_id()
            } else {
                site_id.to_string()
            };
            anyhow::ensure!(!sid.is_empty(), "no site id available");
            path = path.replace("{site_id}", &urlencoding::encode(&sid));
        }

        if path.contains("{account_id}") {
            let aid = self.settings.effective_account_id();
            anyhow::ensure!(!aid.is_empty(), "no account id configured");
            path = path.replace("{account_id}", &urlencoding::encode(&aid));
        }

        Ok(self.api_url(&path))
    }
}

/// Normalize an API response into rows
///
/// List endpoints return a JSON array; the build-status endpoint returns a
/// single object, which becomes a one-row result.
fn rows_from_response(response: Value) -> Vec<Value> {
    match response {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_client() -> NetlifyClient {
        let mut settings = Settings::with_base_url("https://api.netlify.example/api/v1/");
        settings.site_id = Some("default-site".to_string());
        settings.account_id = Some("acct-1".to_string());
        settings.set_access_token("test-token");
        NetlifyClient::new(settings).unwrap()
    }

    #[test]
    fn test_api_url_trims_trailing_slash() {
        let client = test_client();
        assert_eq!(
            client.api_url("sites"),
            "https://api.netlify.example/api/v1/sites"
        );
    }

    #[test]
    fn test_site_url_encodes_site_id() {
        let client = test_client();
        assert_eq!(
            client.site_url("my site", "builds"),
            "https://api.netlify.example/api/v1/sites/my%20site/builds"
        );
    }

    #[test]
    fn test_entity_url_uses_requested_site_id() {
        let client = test_client();
        let url = client.entity_url("sites/{site_id}/deploys", "abc123").unwrap();
        assert_eq!(url, "https://api.netlify.example/api/v1/sites/abc123/deploys");
    }

    #[test]
    fn test_entity_url_falls_back_to_default_site_id() {
        let client = test_client();
        let url = client.entity_url("sites/{site_id}/builds", "").unwrap();
        assert_eq!(
            url,
            "https://api.netlify.example/api/v1/sites/default-site/builds"
        );
    }

    #[test]
    fn test_entity_url_fills_account_id() {
        let client = test_client();
        let url = client.entity_url("{account_id}/builds/status", "").unwrap();
        assert_eq!(
            url,
            "https://api.netlify.example/api/v1/acct-1/builds/status"
        );
    }

    #[test]
    fn test_entity_url_without_site_id_errors() {
        let mut settings = Settings::with_base_url("https://api.netlify.example/api/v1");
        settings.set_access_token("test-token");
        let client = NetlifyClient::new(settings).unwrap();

        let err = client.entity_url("sites/{site_id}/builds", "").unwrap_err();
        assert!(err.to_string().contains("no site id"));
    }

    #[test]
    fn test_rows_from_array_response() {
        let rows = rows_from_response(json!([{"id": "a"}, {"id": "b"}]));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_rows_from_object_response_is_single_row() {
        let rows = rows_from_response(json!({"active": 1}));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["active"], 1);
    }

    #[test]
    fn test_rows_from_null_response_is_empty() {
        assert!(rows_from_response(Value::Null).is_empty());
    }
}
