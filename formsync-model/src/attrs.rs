//! Attribute bags.

use serde_json::Value;

/// Field-level configuration: label, validation rules, options, tracking metadata.
pub type Attrs = serde_json::Map<String, Value>;

/// Returns true for values that count as "not set" on the content side:
/// `null`, `false`, `""`, `"0"`, numeric zero, and empty lists or maps.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty() || s == "0",
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Drops every falsy entry, so a missing attribute and an explicitly empty
/// one compare as the same thing.
pub fn strip_falsy(attrs: &Attrs) -> Attrs {
    attrs
        .iter()
        .filter(|(_, v)| !is_falsy(v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Reads a non-empty string attribute.
pub fn string_attr<'a>(attrs: &'a Attrs, key: &str) -> Option<&'a str> {
    attrs
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
