//! Entity Catalog - Load entity definitions from JSON
//!
//! This module loads the supported entity kinds from an embedded JSON file
//! and provides lookup functions for the rest of the crate. Unknown entity
//! values are treated permissively: dashboards may be saved against entity
//! kinds this build does not know yet.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded entity definitions (compiled into the binary)
const ENTITY_FILE: &str = include_str!("entities.json");

/// Entity definition from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct EntityDef {
    /// Key identifier persisted in dashboards
    pub key: String,
    pub label: String,
    pub description: String,
    /// Whether queries for this entity need a site id
    pub requires_site_id: bool,
    /// REST path pattern, with `{site_id}` / `{account_id}` placeholders
    pub path: String,
    /// Name of the produced result frame
    pub frame: String,
}

/// Root structure of entities.json
#[derive(Debug, Clone, Deserialize)]
struct EntityConfig {
    entities: Vec<EntityDef>,
}

struct Catalog {
    // Registration order matters: the first entry seeds empty queries
    entities: Vec<EntityDef>,
    by_key: HashMap<String, usize>,
}

/// Global catalog loaded from JSON
static CATALOG: OnceLock<Catalog> = OnceLock::new();

fn catalog() -> &'static Catalog {
    CATALOG.get_or_init(|| {
        let config: EntityConfig = serde_json::from_str(ENTITY_FILE)
            .unwrap_or_else(|e| panic!("Failed to parse embedded entity JSON: {}", e));

        let by_key = config
            .entities
            .iter()
            .enumerate()
            .map(|(i, def)| (def.key.clone(), i))
            .collect();

        Catalog {
            entities: config.entities,
            by_key,
        }
    })
}

/// Get an entity definition by key
pub fn get_entity(key: &str) -> Option<&'static EntityDef> {
    let catalog = catalog();
    catalog.by_key.get(key).map(|&i| &catalog.entities[i])
}

/// Get all entity keys in registration order (for completion and editors)
pub fn all_entity_keys() -> Vec<&'static str> {
    catalog().entities.iter().map(|e| e.key.as_str()).collect()
}

/// The entity used to seed a query that has none yet
pub fn default_entity() -> &'static EntityDef {
    &catalog().entities[0]
}

/// Whether a query for this entity needs a site id
///
/// Unrecognized keys answer `false` rather than erroring, so persisted
/// dashboards created against a future entity set keep loading.
pub fn requires_site_id(key: &str) -> bool {
    get_entity(key).map(|e| e.requires_site_id).unwrap_or(false)
}
