//! Netlify Sites
//!
//! Functions for listing the sites the configured token can see. This is the
//! lookup capability behind the site-id cache and the variable enumeration.

use super::client::NetlifyClient;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Site information
#[derive(Debug, Clone)]
pub struct Site {
    pub id: String,
    pub name: String,
    pub state: String,
    pub url: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&Value> for Site {
    fn from(value: &Value) -> Self {
        Self {
            id: value
                .get("id")
                .and_then(|v| v.as_str())
                .unwrap_or("-")
                .to_string(),
            name: value
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or("-")
                .to_string(),
            state: value
                .get("state")
                .and_then(|v| v.as_str())
                .unwrap_or("UNKNOWN")
                .to_string(),
            url: value
                .get("url")
                .and_then(|v| v.as_str())
                .unwrap_or("-")
                .to_string(),
            created_at: value
                .get("created_at")
                .and_then(|v| v.as_str())
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

/// List all sites owned by the configured account
pub async fn list_sites(client: &NetlifyClient) -> Result<Vec<Site>> {
    let url = client.api_url("sites");
    let response = client.get(&url).await?;

    let sites = response
        .as_array()
        .map(|arr| arr.iter().map(Site::from).collect())
        .unwrap_or_default();

    Ok(sites)
}

/// Get site ids as a simple list
pub async fn list_site_ids(client: &NetlifyClient) -> Result<Vec<String>> {
    let sites = list_sites(client).await?;
    Ok(sites.into_iter().map(|s| s.id).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_site_from_full_value() {
        let value = json!({
            "id": "abc123",
            "name": "my-site",
            "state": "current",
            "url": "https://my-site.netlify.app",
            "created_at": "2023-01-15T10:30:00Z"
        });

        let site = Site::from(&value);
        assert_eq!(site.id, "abc123");
        assert_eq!(site.name, "my-site");
        assert_eq!(site.state, "current");
        assert!(site.created_at.is_some());
    }

    #[test]
    fn test_site_from_sparse_value_uses_placeholders() {
        let site = Site::from(&json!({}));
        assert_eq!(site.id, "-");
        assert_eq!(site.state, "UNKNOWN");
        assert!(site.created_at.is_none());
    }
}
