//! # Partial Config Merging
//!
//! Rules shared by config updates and device resolution:
//!
//! - Objects merge key-wise; keys missing from the patch keep their value
//! - Scalars and arrays in the patch replace the base value
//! - `null` in the patch removes the key (optional fields become unset)
//! - An object whose discriminator (`actionType`) changes is replaced whole,
//!   so payload fields of the old variant do not leak into the new one

use serde_json::{Map, Value};

/// Keys that select a variant inside a tagged group.
const DISCRIMINATOR_KEYS: &[&str] = &["actionType"];

/// Name of a JSON value's kind, for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Merge `patch` over `base`, consuming `base`.
pub fn merge_partial(base: Value, patch: &Value) -> Value {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            if changes_discriminator(&base, patch) {
                return Value::Object(strip_nulls(patch));
            }
            Value::Object(merge_maps(base, patch))
        }
        (_, patch) => strip_nulls_value(patch),
    }
}

/// Merge `overlay` over a borrowed `base` (used when the base must survive).
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    merge_partial(base.clone(), overlay)
}

/// Merge two partial objects, as when layering a new device override over
/// a stored one. Unlike [`merge_partial`], `null` is kept so it can still
/// clear the base field when the combined override is applied.
pub fn combine_partials(existing: &Map<String, Value>, patch: &Map<String, Value>) -> Map<String, Value> {
    let mut out = existing.clone();
    for (key, value) in patch {
        let combined = match (out.remove(key), value) {
            (Some(Value::Object(old)), Value::Object(new)) if !changes_discriminator(&old, new) => {
                Value::Object(combine_partials(&old, new))
            }
            (_, value) => value.clone(),
        };
        out.insert(key.clone(), combined);
    }
    out
}

fn merge_maps(mut base: Map<String, Value>, patch: &Map<String, Value>) -> Map<String, Value> {
    for (key, value) in patch {
        if value.is_null() {
            base.remove(key);
            continue;
        }
        let merged = match base.remove(key) {
            Some(existing) => merge_partial(existing, value),
            None => strip_nulls_value(value),
        };
        base.insert(key.clone(), merged);
    }
    base
}

fn changes_discriminator(base: &Map<String, Value>, patch: &Map<String, Value>) -> bool {
    DISCRIMINATOR_KEYS.iter().any(|key| match patch.get(*key) {
        Some(new) => base.get(*key) != Some(new),
        None => false,
    })
}

fn strip_nulls(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.clone(), strip_nulls_value(v)))
        .collect()
}

fn strip_nulls_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(strip_nulls(map)),
        other => other.clone(),
    }
}

/// First key path present in `input` but absent from `canonical`.
///
/// `canonical` is the re-encoding of a decoded config, so any extra key in
/// `input` is a field the type does not declare. Null-valued keys are
/// ignored since decoding treats them as unset. Array elements are compared
/// by position.
pub fn find_unknown_path(input: &Value, canonical: &Value) -> Option<String> {
    match (input, canonical) {
        (Value::Object(input), Value::Object(canonical)) => {
            for (key, value) in input {
                if value.is_null() {
                    continue;
                }
                match canonical.get(key) {
                    None => return Some(key.clone()),
                    Some(expected) => {
                        if let Some(rest) = find_unknown_path(value, expected) {
                            return Some(join_path(key, &rest));
                        }
                    }
                }
            }
            None
        }
        (Value::Array(input), Value::Array(canonical)) => {
            input.iter().zip(canonical).enumerate().find_map(|(i, (a, b))| {
                find_unknown_path(a, b).map(|rest| join_path(&format!("[{i}]"), &rest))
            })
        }
        _ => None,
    }
}

fn join_path(head: &str, rest: &str) -> String {
    if rest.starts_with('[') {
        format!("{head}{rest}")
    } else {
        format!("{head}.{rest}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_nested_objects_merge() {
        let base = json!({ "header": { "text": "A", "height": 40 }, "columns": 4 });
        let merged = merge_partial(base, &json!({ "header": { "text": "B" } }));
        assert_eq!(merged, json!({ "header": { "text": "B", "height": 40 }, "columns": 4 }));
    }

    #[test]
    fn test_arrays_replace() {
        let base = json!({ "productIds": ["a", "b"] });
        let merged = merge_partial(base, &json!({ "productIds": ["c"] }));
        assert_eq!(merged, json!({ "productIds": ["c"] }));
    }

    #[test]
    fn test_null_removes_key() {
        let base = json!({ "title": "Sale", "height": 10 });
        let merged = merge_partial(base, &json!({ "title": null }));
        assert_eq!(merged, json!({ "height": 10 }));
    }

    #[test]
    fn test_discriminator_change_replaces_object() {
        let base = json!({ "action": { "actionType": "open-product", "productId": "p" } });
        let merged = merge_partial(base, &json!({ "action": { "actionType": "open-tab", "tab": "home" } }));
        assert_eq!(merged, json!({ "action": { "actionType": "open-tab", "tab": "home" } }));
    }

    #[test]
    fn test_same_discriminator_merges() {
        let base = json!({ "action": { "actionType": "open-product", "productId": "p" } });
        let merged = merge_partial(base, &json!({ "action": { "actionType": "open-product", "productId": "q" } }));
        assert_eq!(merged, json!({ "action": { "actionType": "open-product", "productId": "q" } }));
    }

    #[test]
    fn test_deep_merge_leaves_base_untouched() {
        let base = json!({ "height": 10, "margin": { "top": 1, "left": 2 } });
        let merged = deep_merge(&base, &json!({ "margin": { "top": 5 } }));
        assert_eq!(merged, json!({ "height": 10, "margin": { "top": 5, "left": 2 } }));
        assert_eq!(base, json!({ "height": 10, "margin": { "top": 1, "left": 2 } }));
    }

    #[test]
    fn test_combine_partials_keeps_both() {
        let existing = json!({ "header": { "text": "A" } });
        let patch = json!({ "header": { "height": 60 }, "title": null });
        let combined = combine_partials(existing.as_object().unwrap(), patch.as_object().unwrap());
        assert_eq!(
            Value::Object(combined),
            json!({ "header": { "text": "A", "height": 60 }, "title": null })
        );
    }

    #[test]
    fn test_find_unknown_path() {
        let canonical = json!({ "margin": { "top": 0 }, "items": [{ "name": "x" }] });
        assert_eq!(find_unknown_path(&canonical, &canonical), None);
        assert_eq!(
            find_unknown_path(&json!({ "margin": { "top": 0, "skew": 1 } }), &canonical),
            Some("margin.skew".to_string())
        );
        assert_eq!(
            find_unknown_path(&json!({ "items": [{ "name": "x", "rank": 2 }] }), &canonical),
            Some("items[0].rank".to_string())
        );
        assert_eq!(
            find_unknown_path(&json!({ "colour": "red" }), &canonical),
            Some("colour".to_string())
        );
    }
}
