//! Site Id Cache
//!
//! Process-wide cache of the site-id enumeration consumed by the editor UI
//! and the dashboard variable path. Created empty, populated on first use,
//! invalidated only by an explicit refresh.

use super::client::NetlifyClient;
use super::sites;
use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct CacheState {
    site_ids: Option<Vec<String>>,
    refreshed_at: Option<DateTime<Utc>>,
}

/// Cached site-id enumeration with caller-driven refresh
///
/// The lock is held across the physical lookup, so refreshes are serialized:
/// a caller queued behind an initial populate observes the fresh value and
/// performs no second fetch. A failed refresh leaves the previous value
/// untouched.
#[derive(Debug, Default)]
pub struct SiteIdCache {
    state: Mutex<CacheState>,
}

impl SiteIdCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached site ids, fetching them on first use
    pub async fn get(&self, client: &NetlifyClient) -> Result<Vec<String>> {
        let mut state = self.state.lock().await;

        if let Some(ids) = &state.site_ids {
            return Ok(ids.clone());
        }

        fetch_into(&mut state, client).await
    }

    /// Force a fetch, replacing the cached value on success
    pub async fn refresh(&self, client: &NetlifyClient) -> Result<Vec<String>> {
        let mut state = self.state.lock().await;
        fetch_into(&mut state, client).await
    }
}

async fn fetch_into(state: &mut CacheState, client: &NetlifyClient) -> Result<Vec<String>> {
    if let Some(previous) = state.refreshed_at {
        tracing::debug!("replacing site id enumeration from {}", previous);
    }

    // On error the previous cached value stays in place
    let ids = sites::list_site_ids(client).await?;

    state.site_ids = Some(ids.clone());
    state.refreshed_at = Some(Utc::now());
    tracing::info!("site id cache refreshed: {} sites", ids.len());

    Ok(ids)
}
