//! Dot-path access into `serde_json::Value` trees.
//!
//! Paths are dot-separated segments; a segment that parses as an index steps
//! into arrays (`payor.0.display`). Used both for probing nested source
//! payloads and for assembling nested template output.

use serde_json::{Map, Value};

/// Reads the value at a dot-path. Returns `None` when any segment is absent
/// or the shape does not match the path.
#[must_use]
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Writes a value at a dot-path, creating intermediate objects or arrays as
/// needed. Numeric segments create arrays and pad missing slots with `null`.
pub fn set_path(root: &mut Value, path: &str, value: Value) {
    let mut current = root;
    let segments: Vec<&str> = path.split('.').collect();
    for (i, segment) in segments.iter().enumerate() {
        let last = i + 1 == segments.len();
        match segment.parse::<usize>() {
            Ok(index) => {
                if !current.is_array() {
                    *current = Value::Array(Vec::new());
                }
                let Value::Array(items) = current else {
                    return;
                };
                while items.len() <= index {
                    items.push(Value::Null);
                }
                if last {
                    items[index] = value;
                    return;
                }
                current = &mut items[index];
            }
            Err(_) => {
                if !current.is_object() {
                    *current = Value::Object(Map::new());
                }
                let Value::Object(map) = current else {
                    return;
                };
                if last {
                    map.insert((*segment).to_string(), value);
                    return;
                }
                current = map.entry((*segment).to_string()).or_insert(Value::Null);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_steps_through_objects_and_arrays() {
        let value = json!({"payor": [{"display": "Aetna"}], "subscriber": {"id": "A1"}});
        assert_eq!(get_path(&value, "payor.0.display"), Some(&json!("Aetna")));
        assert_eq!(get_path(&value, "subscriber.id"), Some(&json!("A1")));
        assert_eq!(get_path(&value, "subscriber.name"), None);
        assert_eq!(get_path(&value, "payor.3.display"), None);
    }

    #[test]
    fn set_builds_nested_structure() {
        let mut value = Value::Object(Map::new());
        set_path(&mut value, "patientInfo.patientName", json!("Jane Doe"));
        set_path(&mut value, "identifier.0.value", json!("MBR123"));
        assert_eq!(value["patientInfo"]["patientName"], json!("Jane Doe"));
        assert_eq!(value["identifier"][0]["value"], json!("MBR123"));
    }

    #[test]
    fn set_overwrites_mismatched_shapes() {
        let mut value = json!({"a": "scalar"});
        set_path(&mut value, "a.b", json!(1));
        assert_eq!(value["a"]["b"], json!(1));
    }
}
