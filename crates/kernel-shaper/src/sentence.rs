use serde_json::Value;

use crate::domain::Domain;
use crate::path;

const UNKNOWN: &str = "unknown";
const NOT_AVAILABLE: &str = "N/A";

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Two-sentences-max human summary, templated per domain (§4.4). Missing
/// nested fields render as `"N/A"` for numeric metrics and `"unknown"` for
/// categorical ones, matching what each template actually names.
pub fn build(raw: &Value, domain: Option<Domain>, confidence: u8) -> String {
    match domain {
        Some(Domain::Geological) => {
            let quality = path::get_str(raw, "formationQuality.reservoirQuality")
                .map(capitalize)
                .unwrap_or_else(|| capitalize(UNKNOWN));
            let action = path::get_str(raw, "investmentPerspective.recommendedAction")
                .unwrap_or(NOT_AVAILABLE);
            format!("{quality} reservoir quality. Recommended action: {action}. Confidence: {confidence}%.")
        }
        Some(Domain::Economic) => {
            let npv = path::get_f64(raw, "economic.npv")
                .map(|n| format!("{:.1}", n / 1e6))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            let irr = path::get_f64(raw, "economic.irr")
                .map(|n| n.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            format!("NPV: ${npv}M, IRR: {irr}%. Confidence: {confidence}%.")
        }
        Some(Domain::Curve) => {
            let eur = path::get_f64(raw, "curve.eur.oil")
                .map(|n| format!("{:.0}", n / 1000.0))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            let grade = path::get_str(raw, "curve.qualityGrade").unwrap_or(UNKNOWN);
            format!("EUR: {eur}K BOE, grade: {grade}. Confidence: {confidence}%.")
        }
        Some(Domain::Risk) => {
            let score = path::get_f64(raw, "risk.score")
                .map(|n| n.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            format!("Overall risk score: {score}/100. Confidence: {confidence}%.")
        }
        Some(Domain::Market) | Some(Domain::Gis) | None => {
            format!("Analysis complete. Confidence: {confidence}%.")
        }
    }
}
