use serde_json::Value;

/// Resolve a 0-100 confidence score (§4.4): an explicit caller-supplied
/// value wins outright; otherwise look for a top-level `confidence` number
/// in `raw`, then one level deep inside any object-valued key; otherwise 0.
pub fn extract(raw: &Value, explicit: Option<u8>) -> u8 {
    if let Some(value) = explicit {
        return value;
    }

    let Some(obj) = raw.as_object() else {
        return 0;
    };

    if let Some(found) = obj.get("confidence").and_then(as_confidence) {
        return found;
    }

    obj.values()
        .filter_map(Value::as_object)
        .find_map(|nested| nested.get("confidence").and_then(as_confidence))
        .unwrap_or(0)
}

fn as_confidence(value: &Value) -> Option<u8> {
    value.as_f64().map(|n| n.clamp(0.0, 100.0).round() as u8)
}
