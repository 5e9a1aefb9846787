use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

const REDACTED: &str = "[REDACTED]";

/// Key-name pattern for `redactSensitive` (§4.5): any key whose name
/// contains one of these words, case-insensitive, gets its value scrubbed.
static SENSITIVE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)key|token|secret|password|credential|auth|bearer|api.?key").expect("static redaction pattern is valid"));

/// Recursively replace values of sensitive-looking keys with `"[REDACTED]"`.
/// Objects nested inside objects are recursed into; arrays are left alone,
/// even when they hold objects (§4.5).
pub fn redact_sensitive(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (key, val) in map {
                if SENSITIVE_KEY.is_match(key) {
                    out.insert(key.clone(), Value::String(REDACTED.to_string()));
                } else {
                    out.insert(key.clone(), redact_sensitive(val));
                }
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn redacts_matching_keys_at_any_depth() {
        let raw = json!({
            "apiKey": "sk-live-123",
            "nested": {"password": "hunter2", "ok": "fine"},
        });
        let redacted = redact_sensitive(&raw);
        assert_eq!(
            redacted,
            json!({
                "apiKey": "[REDACTED]",
                "nested": {"password": "[REDACTED]", "ok": "fine"},
            })
        );
    }

    #[test]
    fn leaves_arrays_untouched_even_with_sensitive_looking_contents() {
        let raw = json!({"tokens": [{"secret": "s"}]});
        let redacted = redact_sensitive(&raw);
        assert_eq!(redacted["tokens"], json!([{"secret": "s"}]));
    }

    #[test]
    fn non_sensitive_keys_pass_through() {
        let raw = json!({"basin": "permian", "depth": 8000});
        assert_eq!(redact_sensitive(&raw), raw);
    }
}
