//! Cache fingerprint over the node's configuration sources.
//!
//! Any change to processing options, lint rules, or ignore rules must
//! invalidate every cached result; a content-only key would serve stale
//! diagnostics after a rule change. The fingerprint feeds three canonical
//! serializations into one incremental BLAKE3 digest, in a fixed order, so
//! the result depends only on structure, never on map insertion order.

use serde_json::{Map, Value};

/// Serializes `value` with object keys sorted recursively.
///
/// Two structurally equal values always serialize identically, whatever
/// order their keys were inserted in.
pub fn canonical_json(value: &Value) -> String {
    serde_json::to_string(&canonicalize(value)).unwrap_or_default()
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            let mut sorted = Map::new();
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// Computes the node fingerprint over its three configuration sources.
///
/// Absent inputs contribute an empty update rather than being skipped, so
/// the digest stays structurally stable. The output is lowercase hex.
pub fn compute(
    options: &Value,
    rule_config: Option<&Value>,
    ignore_source: Option<&str>,
) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(canonical_json(options).as_bytes());
    hasher.update(rule_config.map(canonical_json).unwrap_or_default().as_bytes());
    hasher.update(ignore_source.unwrap_or_default().as_bytes());
    hasher.finalize().to_hex().to_string()
}
