//! Result projection
//!
//! Applies the optional field-selection filter to a fetched result set, and
//! turns results into label/value pairs when a query backs a dashboard
//! variable.

use serde::Serialize;
use serde_json::{Map, Value};

/// An ordered, named set of rows produced by the executor
///
/// Rows are JSON objects; the only structure the core inspects is the set of
/// field names present in the response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSet {
    /// Frame name, e.g. "builds"
    pub name: String,
    pub rows: Vec<Value>,
}

impl ResultSet {
    pub fn new(name: impl Into<String>, rows: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Field names across all rows, in first-seen order
    pub fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();

        for row in &self.rows {
            if let Some(obj) = row.as_object() {
                for key in obj.keys() {
                    if !names.iter().any(|n| n == key) {
                        names.push(key.clone());
                    }
                }
            }
        }

        names
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One selectable value offered to a dashboard variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableOption {
    pub label: String,
    pub value: String,
}

/// Filter a result down to the selected fields
///
/// An empty selection is the identity: no filter configured. Otherwise each
/// row keeps only the named fields, output field order following the
/// selection order; names absent from a row are silently skipped, since
/// schemas evolve independently of saved queries. Row order is preserved.
pub fn project(result: ResultSet, selected_fields: &[String]) -> ResultSet {
    if selected_fields.is_empty() {
        return result;
    }

    let rows = result
        .rows
        .into_iter()
        .map(|row| {
            let Some(obj) = row.as_object() else {
                return row;
            };

            let mut projected = Map::new();
            for field in selected_fields {
                if let Some(value) = obj.get(field) {
                    projected.insert(field.clone(), value.clone());
                }
            }
            Value::Object(projected)
        })
        .collect();

    ResultSet::new(result.name, rows)
}

/// Produce label/value pairs for a dashboard variable
///
/// The first selected field supplies the label and the second the value;
/// with a single selected field it supplies both. Further fields are
/// ignored. An empty selection falls back to the first field present in the
/// result. Rows lacking the chosen fields are skipped.
pub fn enumerate(result: &ResultSet, selected_fields: &[String]) -> Vec<VariableOption> {
    let (label_field, value_field) = match selected_fields {
        [] => {
            let names = result.field_names();
            let Some(first) = names.into_iter().next() else {
                return Vec::new();
            };
            (first.clone(), first)
        }
        [single] => (single.clone(), single.clone()),
        [label, value, ..] => (label.clone(), value.clone()),
    };

    result
        .rows
        .iter()
        .filter_map(|row| {
            let label = field_as_string(row, &label_field)?;
            let value = field_as_string(row, &value_field)?;
            Some(VariableOption { label, value })
        })
        .collect()
}

/// Render a row field as display text
fn field_as_string(row: &Value, field: &str) -> Option<String> {
    match row.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
