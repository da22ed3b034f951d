//! Path-addressed merge, completion estimation, and compaction for the
//! profile document.

use serde_json::{Map, Value};

use super::catalog::{CATEGORIES, HOUSEKEEPING_KEYS};

/// Deep-merge an ordered list of dot-addressed updates into `document`,
/// returning a new document. The input is never mutated.
///
/// Rules:
/// - null updates are skipped entirely — merges never unset a field;
/// - intermediate segments are created as objects, replacing any non-object
///   value found along the way;
/// - later updates to the same path win within one call (call order is
///   precedence);
/// - idempotent: applying the same update list twice equals applying it once.
pub fn merge(document: &Value, updates: &[(String, Value)]) -> Value {
    let mut result = if document.is_object() {
        document.clone()
    } else {
        Value::Object(Map::new())
    };

    for (path, value) in updates {
        if value.is_null() {
            continue;
        }
        set_path(&mut result, path, value.clone());
    }

    result
}

/// Walk/create intermediate objects for every segment but the last, then set
/// the leaf.
fn set_path(root: &mut Value, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    let mut current = root;

    for segment in &segments[..segments.len() - 1] {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let map = current.as_object_mut().expect("just ensured object");
        let entry = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        current = entry;
    }

    if !current.is_object() {
        *current = Value::Object(Map::new());
    }
    if let Some(last) = segments.last() {
        current
            .as_object_mut()
            .expect("just ensured object")
            .insert(last.to_string(), value);
    }
}

/// Count the non-empty leaves under a value.
///
/// Objects contribute the sum of their children; non-empty arrays and any
/// other non-null, non-empty-string value contribute 1.
fn count_filled_leaves(value: &Value) -> u32 {
    match value {
        Value::Null => 0,
        Value::String(s) if s.is_empty() => 0,
        Value::Array(items) => {
            if items.is_empty() {
                0
            } else {
                1
            }
        }
        Value::Object(map) => map.values().map(count_filled_leaves).sum(),
        _ => 1,
    }
}

/// Estimate how complete the document is, as a percentage.
///
/// Each fixed category earns 1.0 credit with more than two filled leaves,
/// 0.5 with one or two, 0 when empty. The percentage is the rounded share of
/// earned credit over the category count.
pub fn estimate_completion(document: &Value) -> u8 {
    let mut credits = 0.0_f64;
    for category in CATEGORIES {
        let count = document
            .get(category)
            .map(count_filled_leaves)
            .unwrap_or(0);
        credits += match count {
            0 => 0.0,
            1 | 2 => 0.5,
            _ => 1.0,
        };
    }
    (100.0 * credits / CATEGORIES.len() as f64).round() as u8
}

/// Produce a pruned copy of the document for the model boundary: null
/// leaves, empty strings, empty arrays, empty objects (post-pruning), and
/// housekeeping keys are removed. The persisted document is never replaced
/// by this.
pub fn compact(document: &Value) -> Value {
    prune(document).unwrap_or_else(|| Value::Object(Map::new()))
}

fn prune(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(items) => {
            if items.is_empty() {
                None
            } else {
                let kept: Vec<Value> = items.iter().filter_map(prune).collect();
                if kept.is_empty() { None } else { Some(Value::Array(kept)) }
            }
        }
        Value::Object(map) => {
            let mut kept = Map::new();
            for (key, child) in map {
                if HOUSEKEEPING_KEYS.contains(&key.as_str()) {
                    continue;
                }
                if let Some(pruned) = prune(child) {
                    kept.insert(key.clone(), pruned);
                }
            }
            if kept.is_empty() { None } else { Some(Value::Object(kept)) }
        }
        other => Some(other.clone()),
    }
}
