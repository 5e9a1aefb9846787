use serde_json::{Map, Value};

use crate::domain::Domain;
use crate::fields::summary_paths;
use crate::path;

/// Build the `summary` detail-level payload: the domain's fixed field set
/// flattened to its last path segment, falling back to the raw payload's
/// first three keys when there's no domain, and always keeping top-level
/// `confidence` (§4.4).
pub fn extract_summary(raw: &Value, domain: Option<Domain>) -> Value {
    let mut out = Map::new();

    match domain {
        Some(domain) => {
            for field_path in summary_paths(domain) {
                if let Some(value) = path::get(raw, field_path) {
                    out.insert(path::last_segment(field_path).to_string(), value.clone());
                }
            }
        }
        None => {
            if let Some(obj) = raw.as_object() {
                for (key, value) in obj.iter().take(3) {
                    out.insert(key.clone(), value.clone());
                }
            }
        }
    }

    if let Some(confidence) = raw.get("confidence") {
        out.insert("confidence".to_string(), confidence.clone());
    }

    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_geological_summary_fields() {
        let raw = json!({
            "formationQuality": {"reservoirQuality": "good", "hydrocarbonPotential": "high"},
            "investmentPerspective": {"recommendedAction": "proceed", "geologicalConfidence": 80},
            "professionalSummary": "solid prospect",
            "confidence": 82,
        });
        let summary = extract_summary(&raw, Some(Domain::Geological));
        assert_eq!(
            summary,
            json!({
                "reservoirQuality": "good",
                "hydrocarbonPotential": "high",
                "recommendedAction": "proceed",
                "geologicalConfidence": 80,
                "professionalSummary": "solid prospect",
                "confidence": 82,
            })
        );
    }

    #[test]
    fn no_domain_falls_back_to_first_three_keys() {
        let raw = json!({"alpha": 1, "beta": 2, "gamma": 3, "delta": 4, "confidence": 50});
        let summary = extract_summary(&raw, None);
        let obj = summary.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        assert_eq!(obj.get("confidence"), Some(&json!(50)));
    }

    #[test]
    fn missing_fields_are_simply_absent() {
        let raw = json!({"risk": {}});
        let summary = extract_summary(&raw, Some(Domain::Risk));
        assert_eq!(summary, json!({}));
    }
}
