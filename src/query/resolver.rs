//! Variable resolution
//!
//! Substitutes dashboard variables into a query's string parameters before
//! dispatch. Resolution is pure: it never mutates its input, never fails,
//! and leaves unresolvable placeholders as literal text, since unresolved
//! variables are a legitimate transient state during dashboard load
//! ordering.

use super::spec::QuerySpec;
use std::collections::HashMap;
use std::ops::Range;

/// Host-supplied variable values, read-only to this crate
///
/// Two layers with strict precedence: a directly scoped value wins over the
/// general template value, which wins over the original literal text.
#[derive(Debug, Clone, Default)]
pub struct VariableBindings {
    values: HashMap<String, String>,
    scoped: HashMap<String, String>,
}

impl VariableBindings {
    /// Create an empty binding set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create bindings from the template layer only
    pub fn from_values(values: HashMap<String, String>) -> Self {
        Self {
            values,
            scoped: HashMap::new(),
        }
    }

    /// Bind a template-level variable
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Bind a scoped variable, which wins over the template layer
    pub fn set_scoped(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.scoped.insert(name.into(), value.into());
    }

    /// Look up a name across both layers, most specific first
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.scoped
            .get(name)
            .or_else(|| self.values.get(name))
            .map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.scoped.is_empty()
    }
}

/// A parsed placeholder reference in a string
#[derive(Debug, Clone, PartialEq, Eq)]
struct Placeholder {
    name: String,
    /// Byte range of the whole reference, `$` included
    span: Range<usize>,
}

/// Scan a string for `$name` and `${name}` references
///
/// A bare `$` must be followed by a letter or underscore to count; an
/// unclosed `${` ends the scan. All boundaries land on ASCII characters, so
/// byte indexing stays on char boundaries.
fn scan_placeholders(input: &str) -> Vec<Placeholder> {
    let bytes = input.as_bytes();
    let mut refs = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }

        if bytes.get(i + 1) == Some(&b'{') {
            let Some(close) = input[i + 2..].find('}') else {
                break;
            };
            let name = input[i + 2..i + 2 + close].trim().to_string();
            let end = i + 2 + close + 1;
            if !name.is_empty() {
                refs.push(Placeholder { name, span: i..end });
            }
            i = end;
        } else {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
                end += 1;
            }
            if end > start && (bytes[start].is_ascii_alphabetic() || bytes[start] == b'_') {
                refs.push(Placeholder {
                    name: input[start..end].to_string(),
                    span: i..end,
                });
                i = end;
            } else {
                i += 1;
            }
        }
    }

    refs
}

/// Substitute bound variables into one string parameter
///
/// Unbound names pass through as their literal reference text.
pub fn interpolate(input: &str, bindings: &VariableBindings) -> String {
    let refs = scan_placeholders(input);
    if refs.is_empty() {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut last = 0;

    for var_ref in &refs {
        out.push_str(&input[last..var_ref.span.start]);

        match bindings.lookup(&var_ref.name) {
            Some(value) => out.push_str(value),
            None => out.push_str(&input[var_ref.span.clone()]),
        }

        last = var_ref.span.end;
    }

    out.push_str(&input[last..]);
    out
}

/// Resolve every string parameter of a spec against the bindings
///
/// Returns a new spec; the input is untouched. The same precedence rule
/// applies uniformly to the entity, the site id, and the selected field
/// names.
pub fn resolve(spec: &QuerySpec, bindings: &VariableBindings) -> QuerySpec {
    let mut resolved = spec.clone();

    resolved.entity = interpolate(&spec.entity, bindings);
    resolved.site_id = interpolate(&spec.site_id, bindings);
    resolved.parsing_options.selected_fields = spec
        .parsing_options
        .selected_fields
        .iter()
        .map(|field| interpolate(field, bindings))
        .collect();

    resolved
}

/// Expand a resolved site id into the list of sites to query
///
/// A multi-value variable renders as `{a,b,c}`; anything else is a single
/// site id.
pub fn parse_site_ids(site_id: &str) -> Vec<String> {
    if let Some(inner) = site_id.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        return inner.split(',').map(|s| s.trim().to_string()).collect();
    }

    vec![site_id.to_string()]
}
