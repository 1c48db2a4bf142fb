//! Redaction of sensitive keys
//!
//! Error context maps travel to logs and back to the calling agent. Any key
//! that looks like a credential is replaced before either happens.

use serde_json::{Map, Value};

/// Placeholder written in place of a redacted value
pub const REDACTED: &str = "[REDACTED]";

/// Key fragments that mark a value as sensitive (compared case-insensitively,
/// with `-` and `_` ignored)
const SENSITIVE_KEY_FRAGMENTS: &[&str] = &[
    "apikey",
    "token",
    "password",
    "passwd",
    "secret",
    "authorization",
    "credential",
    "cookie",
];

/// Returns true if `key` names a credential-like value
pub fn is_sensitive_key(key: &str) -> bool {
    let normalized: String = key
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .collect::<String>()
        .to_ascii_lowercase();

    SENSITIVE_KEY_FRAGMENTS
        .iter()
        .any(|fragment| normalized.contains(fragment))
}

/// Return a copy of `context` with sensitive values replaced, recursing into
/// nested objects and arrays
pub fn redact_map(context: &Map<String, Value>) -> Map<String, Value> {
    context
        .iter()
        .map(|(key, value)| {
            if is_sensitive_key(key) {
                (key.clone(), Value::String(REDACTED.to_string()))
            } else {
                (key.clone(), redact_value(value))
            }
        })
        .collect()
}

/// Redact sensitive keys anywhere inside a JSON value
pub fn redact_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(redact_map(map)),
        Value::Array(items) => Value::Array(items.iter().map(redact_value).collect()),
        other => other.clone(),
    }
}
