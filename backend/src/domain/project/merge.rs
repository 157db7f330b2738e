//! Deep-merge policy for partial project updates.
//!
//! For a key present in both values: two objects merge recursively, any
//! other pair is won outright by the partial. Arrays are replaced, never
//! concatenated, so appending requires a read-modify-write of the full list.

use serde_json::{Map, Value};

/// Deep-merges `partial` onto `current`.
pub fn deep_merge(current: &Value, partial: &Value) -> Value {
    match (current, partial) {
        (Value::Object(current), Value::Object(partial)) => {
            let mut merged: Map<String, Value> = current.clone();
            for (key, incoming) in partial {
                let next = match merged.get(key) {
                    Some(existing) if existing.is_object() && incoming.is_object() => {
                        deep_merge(existing, incoming)
                    }
                    _ => incoming.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Value::Object(merged)
        }
        (_, partial) => partial.clone(),
    }
}

/// Top-level merge: every key of `overlay` replaces the key in `base`.
pub fn shallow_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            let mut merged = base.clone();
            for (key, value) in overlay {
                merged.insert(key.clone(), value.clone());
            }
            Value::Object(merged)
        }
        (_, overlay) => overlay.clone(),
    }
}
