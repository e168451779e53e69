//! Query model
//!
//! The declarative query layer: a data-driven catalog of entity kinds,
//! the query specification and its readiness rules, variable resolution,
//! result projection, and the generation tokens that keep async responses
//! ordered.
//!
//! # Architecture
//!
//! - [`catalog`] - Loads entity definitions from embedded JSON
//! - [`spec`] - The query data model and its readiness state machine
//! - [`resolver`] - Substitutes dashboard variables into query parameters
//! - [`projector`] - Field-selection filtering and variable enumeration
//! - [`session`] - Generation tokens for stale-response discard

pub mod catalog;
pub mod projector;
pub mod resolver;
pub mod session;
pub mod spec;

pub use catalog::{all_entity_keys, default_entity, get_entity, requires_site_id, EntityDef};
pub use projector::{enumerate, project, ResultSet, VariableOption};
pub use resolver::{interpolate, parse_site_ids, resolve, VariableBindings};
pub use session::{Generation, QuerySession};
pub use spec::{ParsingOptions, QuerySpec, Readiness};
