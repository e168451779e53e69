//! Error taxonomy for the query core
//!
//! Failures are surfaced to the immediate caller and scoped to the single
//! query or enumeration attempt that produced them.

use thiserror::Error;

/// Errors produced by the query and enumeration paths
#[derive(Debug, Error)]
pub enum QueryError {
    /// A required parameter is missing; execution was not attempted.
    #[error("query for entity '{entity}' requires a site id")]
    ValidationIncomplete { entity: String },

    /// The site-id lookup failed; a previously cached value, if any, is
    /// retained.
    #[error("site lookup failed: {0}")]
    Lookup(#[source] anyhow::Error),

    /// The backend call failed; the underlying error passes through
    /// unmodified.
    #[error("query execution failed: {0}")]
    Execution(#[source] anyhow::Error),
}

impl QueryError {
    /// Whether the error is a validation failure rather than a backend one
    pub fn is_validation(&self) -> bool {
        matches!(self, QueryError::ValidationIncomplete { .. })
    }
}
