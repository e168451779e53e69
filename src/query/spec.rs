//! Query specification
//!
//! The declarative query model built by an editor or variable-query session,
//! and its readiness for execution. A spec may be transiently invalid while
//! the operator edits it; readiness is enforced at resolution time, not at
//! construction time.

use super::catalog;
use crate::error::QueryError;
use serde::{Deserialize, Serialize};

/// Post-processing options applied to a fetched result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParsingOptions {
    /// Fields to keep, in output order; empty means no filter
    pub selected_fields: Vec<String>,
}

/// A declarative query against the Netlify API
///
/// The wire format matches the persisted dashboard JSON: `entity`, `siteId`,
/// `parsingOptions.selectedFields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuerySpec {
    /// Caller-assigned identifier echoed back with results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
    /// Entity kind; free-form to tolerate dashboards from newer entity sets
    pub entity: String,
    /// Site id, possibly still holding `$variable` placeholders
    pub site_id: String,
    pub parsing_options: ParsingOptions,
}

/// Effective validity of a spec for execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// A site-scoped entity with an empty site id
    Incomplete,
    /// All required parameters present
    Ready,
}

impl QuerySpec {
    /// Create a spec for an entity with everything else empty
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            ..Self::default()
        }
    }

    /// Create a spec seeded with the catalog's default entity
    pub fn seeded() -> Self {
        Self::new(&catalog::default_entity().key)
    }

    /// Current readiness, recomputed from the entity and site id
    pub fn readiness(&self) -> Readiness {
        if catalog::requires_site_id(&self.entity) && self.site_id.is_empty() {
            Readiness::Incomplete
        } else {
            Readiness::Ready
        }
    }

    /// Error unless the spec is ready for execution
    pub fn validate_ready(&self) -> Result<(), QueryError> {
        match self.readiness() {
            Readiness::Ready => Ok(()),
            Readiness::Incomplete => Err(QueryError::ValidationIncomplete {
                entity: self.entity.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_scoped_entity_without_site_id_is_incomplete() {
        let mut spec = QuerySpec::new("builds");
        assert_eq!(spec.readiness(), Readiness::Incomplete);

        spec.site_id = "abc123".to_string();
        assert_eq!(spec.readiness(), Readiness::Ready);
    }

    #[test]
    fn test_clearing_site_id_reverts_to_incomplete() {
        let mut spec = QuerySpec::new("deployments");
        spec.site_id = "abc123".to_string();
        assert_eq!(spec.readiness(), Readiness::Ready);

        spec.site_id.clear();
        assert_eq!(spec.readiness(), Readiness::Incomplete);
    }

    #[test]
    fn test_switching_to_site_scoped_entity_reverts_to_incomplete() {
        let mut spec = QuerySpec::new("sites");
        assert_eq!(spec.readiness(), Readiness::Ready);

        spec.entity = "forms".to_string();
        assert_eq!(spec.readiness(), Readiness::Incomplete);
    }

    #[test]
    fn test_unknown_entity_is_always_ready() {
        let spec = QuerySpec::new("edge-functions");
        assert_eq!(spec.readiness(), Readiness::Ready);
    }

    #[test]
    fn test_validate_ready_surfaces_entity_name() {
        let spec = QuerySpec::new("builds");
        let err = spec.validate_ready().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("builds"));
    }

    #[test]
    fn test_seeded_spec_uses_default_entity() {
        assert_eq!(QuerySpec::seeded().entity, "builds");
    }

    #[test]
    fn test_wire_format_round_trip() {
        let json = r#"{
            "refId": "A",
            "entity": "form-submissions",
            "siteId": "abc123",
            "parsingOptions": { "selectedFields": ["name", "email"] }
        }"#;

        let spec: QuerySpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.entity, "form-submissions");
        assert_eq!(spec.site_id, "abc123");
        assert_eq!(spec.parsing_options.selected_fields, ["name", "email"]);

        let out = serde_json::to_value(&spec).unwrap();
        assert_eq!(out["siteId"], "abc123");
        assert_eq!(out["parsingOptions"]["selectedFields"][0], "name");
    }

    #[test]
    fn test_missing_fields_default() {
        let spec: QuerySpec = serde_json::from_str(r#"{"entity": "sites"}"#).unwrap();
        assert!(spec.site_id.is_empty());
        assert!(spec.parsing_options.selected_fields.is_empty());
    }
}
