use std::collections::BTreeMap;

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Recursively re-key every object in `value` in sorted order so two
/// structurally equal values with differently-ordered keys serialize
/// identically (§4.2, Idempotency key; §9, "Idempotency key stability").
/// Arrays keep their element order — only key order is canonicalized.
fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut out = serde_json::Map::new();
            for (key, val) in entries {
                out.insert(key.clone(), canonicalize(val));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

fn digest16(payload: &Value) -> String {
    let canonical = canonicalize(payload);
    let serialized = serde_json::to_string(&canonical).expect("canonical JSON always serializes");
    let hash = Sha256::digest(serialized.as_bytes());
    hash.iter().take(8).map(|b| format!("{b:02x}")).collect()
}

/// SHA-256 of the canonical `{tool, args, session}` triple, truncated to
/// 16 hex characters (§4.2). Deterministic regardless of input key order.
pub fn generate_idempotency_key(
    tool_name: &str,
    args: &BTreeMap<String, Value>,
    session_id: Option<&str>,
) -> String {
    let payload = serde_json::json!({
        "tool": tool_name,
        "args": args,
        "session": session_id.unwrap_or("default"),
    });
    digest16(&payload)
}

/// The confirmation-gate action id: the same derivation, seeded with a
/// `confirm-<epoch-ms>` marker in place of a session id (§4.2).
pub fn generate_action_id(tool_name: &str, args: &BTreeMap<String, Value>, epoch_ms: i64) -> String {
    let session = format!("confirm-{epoch_ms}");
    generate_idempotency_key(tool_name, args, Some(&session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deterministic_across_key_order() {
        let mut a = BTreeMap::new();
        a.insert("wellId".to_string(), json!("W-1"));
        a.insert("basin".to_string(), json!("permian"));

        let mut b = BTreeMap::new();
        b.insert("basin".to_string(), json!("permian"));
        b.insert("wellId".to_string(), json!("W-1"));

        assert_eq!(
            generate_idempotency_key("geowiz.analyze", &a, Some("s-1")),
            generate_idempotency_key("geowiz.analyze", &b, Some("s-1")),
        );
    }

    #[test]
    fn is_sixteen_hex_characters() {
        let key = generate_idempotency_key("geowiz.analyze", &BTreeMap::new(), None);
        assert_eq!(key.len(), 16);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn nested_object_key_order_does_not_change_the_hash() {
        let mut a = BTreeMap::new();
        a.insert("nested".to_string(), json!({"b": 1, "a": 2}));
        let mut b = BTreeMap::new();
        b.insert("nested".to_string(), json!({"a": 2, "b": 1}));

        assert_eq!(
            generate_idempotency_key("econobot.analyze", &a, None),
            generate_idempotency_key("econobot.analyze", &b, None),
        );
    }

    #[test]
    fn missing_session_falls_back_to_default() {
        let key_none = generate_idempotency_key("geowiz.analyze", &BTreeMap::new(), None);
        let key_default = generate_idempotency_key("geowiz.analyze", &BTreeMap::new(), Some("default"));
        assert_eq!(key_none, key_default);
    }

    #[test]
    fn action_id_differs_from_plain_idempotency_key() {
        let args = BTreeMap::new();
        let action = generate_action_id("decision.analyze", &args, 1_700_000_000_000);
        let plain = generate_idempotency_key("decision.analyze", &args, None);
        assert_ne!(action, plain);
    }
}
