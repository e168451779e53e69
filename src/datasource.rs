//! Datasource
//!
//! Composition root tying the query layer to the Netlify client: a query
//! flows validate -> resolve -> execute -> project, and the same machinery
//! doubles as the dashboard variable source that enumerates site ids.

use crate::config::Settings;
use crate::error::QueryError;
use crate::netlify::client::NetlifyClient;
use crate::netlify::lookup::SiteIdCache;
use crate::netlify::sites;
use crate::query::projector::{self, ResultSet, VariableOption};
use crate::query::resolver::{self, VariableBindings};
use crate::query::spec::QuerySpec;
use crate::query::{catalog, EntityDef};
use anyhow::Result;
use futures::future::try_join_all;
use serde_json::Value;

/// A configured datasource instance
pub struct Datasource {
    client: NetlifyClient,
    site_id_cache: SiteIdCache,
}

impl Datasource {
    /// Create a datasource from validated settings
    pub fn new(settings: Settings) -> Result<Self> {
        let client = NetlifyClient::new(settings)?;

        Ok(Self {
            client,
            site_id_cache: SiteIdCache::new(),
        })
    }

    /// The underlying API client
    pub fn client(&self) -> &NetlifyClient {
        &self.client
    }

    /// Run a query: resolve variables, validate, execute, project
    pub async fn query(
        &self,
        spec: &QuerySpec,
        bindings: &VariableBindings,
    ) -> Result<ResultSet, QueryError> {
        let (resolved, result) = self.run(spec, bindings).await?;
        Ok(projector::project(
            result,
            &resolved.parsing_options.selected_fields,
        ))
    }

    /// Run a query as a variable source, producing label/value options
    ///
    /// The selected fields pick the label and value columns; see
    /// [`projector::enumerate`] for the exact rule.
    pub async fn enumerate_query(
        &self,
        spec: &QuerySpec,
        bindings: &VariableBindings,
    ) -> Result<Vec<VariableOption>, QueryError> {
        let (resolved, result) = self.run(spec, bindings).await?;
        Ok(projector::enumerate(
            &result,
            &resolved.parsing_options.selected_fields,
        ))
    }

    async fn run(
        &self,
        spec: &QuerySpec,
        bindings: &VariableBindings,
    ) -> Result<(QuerySpec, ResultSet), QueryError> {
        let mut resolved = resolver::resolve(spec, bindings);

        // The configured default site id is the lowest-precedence source
        if resolved.site_id.is_empty() {
            resolved.site_id = self.client.settings().effective_site_id();
        }

        resolved.validate_ready()?;

        let result = self
            .execute(&resolved)
            .await
            .map_err(QueryError::Execution)?;

        Ok((resolved, result))
    }

    /// Execute a resolved query against the API
    async fn execute(&self, spec: &QuerySpec) -> Result<ResultSet> {
        anyhow::ensure!(!spec.entity.is_empty(), "missing query entity");

        let Some(def) = catalog::get_entity(&spec.entity) else {
            anyhow::bail!("unidentified query entity: {}", spec.entity);
        };

        let rows = if def.requires_site_id {
            self.fetch_per_site(def, &spec.site_id).await?
        } else {
            let url = self.client.entity_url(&def.path, "")?;
            self.client.get_rows(&url).await?
        };

        Ok(ResultSet::new(&def.frame, rows))
    }

    /// Fan a site-scoped query out over every requested site
    ///
    /// Sites are queried concurrently; rows concatenate in input order and
    /// the first error fails the whole query.
    async fn fetch_per_site(&self, def: &EntityDef, site_id: &str) -> Result<Vec<Value>> {
        let site_ids = resolver::parse_site_ids(site_id);
        tracing::info!(entity = %def.key, sites = site_ids.len(), "dispatching query");

        let fetches = site_ids.iter().map(|sid| {
            let url = self.client.entity_url(&def.path, sid);
            async move { self.client.get_rows(&url?).await }
        });

        let per_site = try_join_all(fetches).await?;
        Ok(per_site.into_iter().flatten().collect())
    }

    /// The cached site-id enumeration, fetched on first use
    pub async fn site_ids(&self) -> Result<Vec<String>, QueryError> {
        self.site_id_cache
            .get(&self.client)
            .await
            .map_err(QueryError::Lookup)
    }

    /// Force a refresh of the cached site-id enumeration
    pub async fn refresh_site_ids(&self) -> Result<Vec<String>, QueryError> {
        self.site_id_cache
            .refresh(&self.client)
            .await
            .map_err(QueryError::Lookup)
    }

    /// The dashboard variable-query surface: site ids as selectable options
    ///
    /// Bindings are accepted for contract parity with the query path; the
    /// site-id lookup itself takes no parameters.
    pub async fn enumerate(
        &self,
        _bindings: &VariableBindings,
    ) -> Result<Vec<VariableOption>, QueryError> {
        let ids = self.site_ids().await?;

        let rows = ids
            .into_iter()
            .map(|id| serde_json::json!({ "site_id": id }))
            .collect();
        let result = ResultSet::new("site_ids", rows);

        Ok(projector::enumerate(&result, &[]))
    }

    /// Verify the configured connection by listing sites
    pub async fn check_health(&self) -> Result<String> {
        sites::list_sites(&self.client).await?;
        Ok("Data source is working".to_string())
    }
}
