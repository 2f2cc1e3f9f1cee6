//! Conversion of decoded YAML documents into string-keyed JSON trees
//!
//! YAML mappings may use numbers or booleans as keys (`2: {...}`), which a
//! path query cannot address. Every key is stringified before querying.

use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;

use crate::document::error::QueryError;

/// Recursively convert a YAML value into a JSON value whose maps are all
/// keyed by strings.
///
/// String, number and boolean keys are stringified. Null, sequence and
/// mapping keys cannot be addressed by a path query and are rejected.
pub fn normalize(value: YamlValue) -> Result<Value, QueryError> {
    match value {
        YamlValue::Null => Ok(Value::Null),
        YamlValue::Bool(b) => Ok(Value::Bool(b)),
        YamlValue::Number(n) => Ok(convert_number(&n)),
        YamlValue::String(s) => Ok(Value::String(s)),
        YamlValue::Sequence(items) => items
            .into_iter()
            .map(normalize)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        YamlValue::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(key_to_string(key)?, normalize(value)?);
            }
            Ok(Value::Object(map))
        }
        YamlValue::Tagged(tagged) => normalize(tagged.value),
    }
}

fn key_to_string(key: YamlValue) -> Result<String, QueryError> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Tagged(tagged) => key_to_string(tagged.value),
        other => Err(QueryError::InvalidKey {
            key: render_yaml(&other),
        }),
    }
}

fn convert_number(n: &serde_yaml::Number) -> Value {
    if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else {
        // .nan and .inf have no JSON counterpart; keep their YAML spelling
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(n.to_string()))
    }
}

fn render_yaml(value: &YamlValue) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| format!("{:?}", value))
}
