//! netlify-datasource
//!
//! Query layer for the Netlify REST API: compose a declarative query
//! against an entity kind (builds, deployments, forms, ...), validate its
//! required parameters, substitute dashboard variables, execute it, and
//! filter the result. The same layer doubles as a dashboard-variable source
//! that enumerates site ids.
//!
//! # Module Structure
//!
//! - [`config`] - Persisted connection settings
//! - [`netlify`] - API client, site listing, and the site-id cache
//! - [`query`] - Entity catalog, query spec, resolution, projection
//! - [`datasource`] - Composition root wiring the above together
//! - [`error`] - The error taxonomy surfaced to callers

pub mod config;
pub mod datasource;
pub mod error;
pub mod netlify;
pub mod query;

pub use config::Settings;
pub use datasource::Datasource;
pub use error::QueryError;
pub use query::{QuerySpec, VariableBindings};

/// Version injected at compile time via NFDS_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("NFDS_VERSION") {
    Some(v) => v,
    None => "dev",
};
