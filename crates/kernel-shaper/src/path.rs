use serde_json::Value;

/// Walk a dot-separated path (`"formationQuality.reservoirQuality"`) through
/// nested objects, returning `None` at the first missing or non-object
/// segment.
pub fn get<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |cur, segment| cur.get(segment))
}

pub fn get_str<'a>(root: &'a Value, path: &str) -> Option<&'a str> {
    get(root, path).and_then(Value::as_str)
}

pub fn get_f64(root: &Value, path: &str) -> Option<f64> {
    get(root, path).and_then(Value::as_f64)
}

/// The final segment of a dotted path: `"formationQuality.reservoirQuality"`
/// → `"reservoirQuality"`.
pub fn last_segment(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}
