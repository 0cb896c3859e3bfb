//! Structural validation of run-time values against schema nodes.
//!
//! The check is coercion-free and reports a single boolean. A null value is
//! read as "empty": an empty object for object nodes, an empty list for array
//! nodes. Whether an empty object is acceptable depends on whether the node
//! requires anything, directly or through any of its properties, and that
//! question is answered once per node instance per run.

use crate::schema::{SchemaKind, SchemaNode};
use crate::value::{kind_of, to_value, Value};
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, trace};

/// Check `value` against `schema`.
///
/// A missing schema accepts everything.
#[must_use]
pub fn satisfies(schema: Option<&SchemaNode>, value: &Value) -> bool {
    match schema {
        Some(schema) => Satisfier::new().check(schema, value),
        None => true,
    }
}

/// Check a concretely typed input against `schema`.
///
/// The input is normalized to the generic value form first; an input that
/// cannot be normalized does not satisfy any schema.
#[must_use]
pub fn satisfies_typed<T: Serialize + ?Sized>(schema: Option<&SchemaNode>, input: &T) -> bool {
    let Some(schema) = schema else {
        return true;
    };
    match to_value(input) {
        Ok(value) => Satisfier::new().check(schema, &value),
        Err(err) => {
            debug!(%err, "typed input rejected before validation");
            false
        }
    }
}

/// Counters for the required-field cache of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SatisfyStats {
    /// Lookups answered from the cache
    pub cache_hits: u64,
    /// Lookups that walked the node
    pub cache_misses: u64,
}

/// Where and why a value stopped matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Slash-separated path from the root value, `/` for the root itself
    pub path: String,
    /// What was expected there
    pub reason: String,
}

/// One validation run.
///
/// Holds the identity-keyed cache of "does this node require anything" so a
/// large array of nulls costs one walk per distinct node, not one per
/// element. The cache is reset at the start of every [`Satisfier::check`],
/// which keeps it valid: node addresses are only stable while the schema is
/// borrowed.
#[derive(Debug, Default)]
pub struct Satisfier {
    required_cache: FxHashMap<usize, bool>,
    stats: SatisfyStats,
    reason: Option<String>,
    segments: Vec<String>,
    last_failure: Option<Mismatch>,
}

impl Satisfier {
    /// Create a fresh run
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `value` against `schema`
    pub fn check(&mut self, schema: &SchemaNode, value: &Value) -> bool {
        self.required_cache.clear();
        self.stats = SatisfyStats::default();
        self.reason = None;
        self.segments.clear();
        self.last_failure = None;

        let ok = self.node(schema, value);
        if !ok {
            let mismatch = self.take_mismatch();
            debug!(
                path = %mismatch.path,
                reason = %mismatch.reason,
                "value does not satisfy schema"
            );
            self.last_failure = Some(mismatch);
        }
        ok
    }

    /// Cache counters of the last run
    #[must_use]
    pub fn stats(&self) -> SatisfyStats {
        self.stats
    }

    /// First mismatch of the last run, if it failed
    #[must_use]
    pub fn last_failure(&self) -> Option<&Mismatch> {
        self.last_failure.as_ref()
    }

    fn node(&mut self, schema: &SchemaNode, value: &Value) -> bool {
        if value.is_null() {
            return self.null(schema);
        }
        match schema.kind {
            SchemaKind::String => self.expect(value.is_string(), schema.kind, value),
            SchemaKind::Number => self.expect(value.is_number(), schema.kind, value),
            SchemaKind::Boolean => self.expect(value.is_boolean(), schema.kind, value),
            SchemaKind::Array => {
                let Some(elements) = value.as_array() else {
                    return self.expect(false, schema.kind, value);
                };
                let Some(items) = schema.items.as_deref() else {
                    return true;
                };
                for (index, element) in elements.iter().enumerate() {
                    let ok = self.node(items, element);
                    if !self.within(ok, || index.to_string()) {
                        return false;
                    }
                }
                true
            }
            SchemaKind::Object => {
                let Some(map) = value.as_object() else {
                    return self.expect(false, schema.kind, value);
                };
                for name in &schema.required {
                    if map.get(name).is_none_or(Value::is_null) {
                        let ok = self.fail("missing required field".to_string());
                        return self.within(ok, || name.clone());
                    }
                }
                for (name, child) in &schema.properties {
                    let Some(field) = map.get(name) else {
                        continue;
                    };
                    // An optional null reads as absent, except that an
                    // object still may not hide required fields behind it.
                    if field.is_null() && child.kind != SchemaKind::Object {
                        continue;
                    }
                    let ok = self.node(child, field);
                    if !self.within(ok, || name.clone()) {
                        return false;
                    }
                }
                true
            }
        }
    }

    /// A null stands for an empty object or an empty list.
    fn null(&mut self, schema: &SchemaNode) -> bool {
        match schema.kind {
            SchemaKind::Array => true,
            SchemaKind::Object => {
                if self.has_required(schema) {
                    self.fail("null where required fields are declared".to_string())
                } else {
                    true
                }
            }
            kind => self.fail(format!("expected {}, got null", kind)),
        }
    }

    fn has_required(&mut self, schema: &SchemaNode) -> bool {
        if schema.kind != SchemaKind::Object {
            return false;
        }
        let key = schema as *const SchemaNode as usize;
        if let Some(&cached) = self.required_cache.get(&key) {
            self.stats.cache_hits += 1;
            trace!(node = key, cached, "required-field cache hit");
            return cached;
        }
        self.stats.cache_misses += 1;
        let result = schema.has_own_required()
            || schema
                .properties
                .values()
                .any(|child| self.has_required(child));
        self.required_cache.insert(key, result);
        result
    }

    fn expect(&mut self, ok: bool, kind: SchemaKind, value: &Value) -> bool {
        if ok {
            true
        } else {
            self.fail(format!("expected {}, got {}", kind, kind_of(value)))
        }
    }

    fn fail(&mut self, reason: String) -> bool {
        if self.reason.is_none() {
            self.reason = Some(reason);
        }
        false
    }

    /// Record the path segment of a failing child while unwinding
    fn within(&mut self, ok: bool, segment: impl FnOnce() -> String) -> bool {
        if !ok {
            self.segments.push(segment());
        }
        ok
    }

    fn take_mismatch(&mut self) -> Mismatch {
        let mut segments = std::mem::take(&mut self.segments);
        segments.reverse();
        Mismatch {
            path: format!("/{}", segments.join("/")),
            reason: self.reason.take().unwrap_or_default(),
        }
    }
}
