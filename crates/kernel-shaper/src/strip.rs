use serde_json::Value;

/// Verbose keys stripped at the `standard` detail level, wherever they
/// occur in the object tree (§4.4).
const VERBOSE_KEYS: &[&str] = &[
    "sensitivityAnalysis",
    "monteCarloResults",
    "rawData",
    "depthData",
    "curveData",
];

/// Recursively remove `VERBOSE_KEYS` from `value` and every nested object,
/// leaving arrays and scalars otherwise untouched.
pub fn strip_verbose(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (k, v) in map {
                if VERBOSE_KEYS.contains(&k.as_str()) {
                    continue;
                }
                out.insert(k.clone(), strip_verbose(v));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(strip_verbose).collect()),
        other => other.clone(),
    }
}
