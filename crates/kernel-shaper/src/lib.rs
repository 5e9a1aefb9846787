//! Turns a worker's raw JSON payload into the kernel's standardized
//! `AgentOSResponse` envelope: detail-level shaping, domain detection,
//! confidence extraction, and a templated summary sentence (§4.4).

mod confidence;
mod domain;
mod fields;
mod path;
mod sentence;
mod strip;
mod summarize;

pub use domain::Domain;

use chrono::Utc;
use serde_json::Value;

use kernel_types::{AgentOSResponse, DetailLevel, ErrorDetail, ResponseMetadata};

/// Inputs to `shape`, mirroring the call's execution context (§4.4).
#[derive(Debug, Clone, Default)]
pub struct ShapeOptions {
    pub detail_level: Option<DetailLevel>,
    pub server: Option<String>,
    pub persona: Option<String>,
    pub execution_ms: u64,
    pub confidence: Option<u8>,
}

/// Build a success envelope from a worker's raw payload.
pub fn shape(raw: Value, opts: ShapeOptions) -> AgentOSResponse {
    let detail_level = opts.detail_level.unwrap_or_default();
    let domain = domain::detect(&raw);
    let confidence = confidence::extract(&raw, opts.confidence);

    let data = match detail_level {
        DetailLevel::Full => raw.clone(),
        DetailLevel::Standard => strip::strip_verbose(&raw),
        DetailLevel::Summary => summarize::extract_summary(&raw, domain),
    };

    let summary = sentence::build(&raw, domain, confidence);

    AgentOSResponse {
        success: true,
        summary,
        confidence,
        data,
        detail_level,
        completeness: 100,
        missing_sub_analyses: Vec::new(),
        degraded: false,
        metadata: ResponseMetadata {
            server: opts.server,
            persona: opts.persona,
            execution_ms: opts.execution_ms,
            timestamp: Utc::now().to_rfc3339(),
            idempotency_key: None,
            retry_attempts: None,
            total_retry_delay_ms: None,
        },
        error: None,
    }
}

/// Build a failure envelope around a pre-classified `ErrorDetail`. Shares
/// the same metadata shape as `shape` so callers never hand-assemble an
/// `AgentOSResponse` directly.
pub fn shape_error(error: ErrorDetail, opts: ShapeOptions) -> AgentOSResponse {
    AgentOSResponse {
        success: false,
        summary: error.message.clone(),
        confidence: 0,
        data: Value::Null,
        detail_level: opts.detail_level.unwrap_or_default(),
        completeness: 0,
        missing_sub_analyses: Vec::new(),
        degraded: false,
        metadata: ResponseMetadata {
            server: opts.server,
            persona: opts.persona,
            execution_ms: opts.execution_ms,
            timestamp: Utc::now().to_rfc3339(),
            idempotency_key: None,
            retry_attempts: None,
            total_retry_delay_ms: None,
        },
        error: Some(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel_types::ErrorType;
    use serde_json::json;

    #[test]
    fn full_detail_passes_raw_data_through_unchanged() {
        let raw = json!({"geological": {}, "sensitivityAnalysis": {"x": 1}});
        let response = shape(
            raw.clone(),
            ShapeOptions {
                detail_level: Some(DetailLevel::Full),
                ..Default::default()
            },
        );
        assert_eq!(response.data, raw);
        assert!(response.success);
    }

    #[test]
    fn standard_detail_strips_verbose_keys() {
        let raw = json!({"geological": {}, "sensitivityAnalysis": {"x": 1}});
        let response = shape(
            raw,
            ShapeOptions {
                detail_level: Some(DetailLevel::Standard),
                ..Default::default()
            },
        );
        assert_eq!(response.data, json!({"geological": {}}));
    }

    #[test]
    fn summary_detail_builds_domain_summary_and_sentence() {
        let raw = json!({
            "geological": {},
            "formationQuality": {"reservoirQuality": "excellent"},
            "investmentPerspective": {"recommendedAction": "acquire"},
            "confidence": 91,
        });
        let response = shape(
            raw,
            ShapeOptions {
                detail_level: Some(DetailLevel::Summary),
                server: Some("geowiz".to_string()),
                execution_ms: 120,
                ..Default::default()
            },
        );
        assert_eq!(response.confidence, 91);
        assert_eq!(response.completeness, 100);
        assert!(response.summary.starts_with("Excellent reservoir quality."));
        assert_eq!(response.data["recommendedAction"], json!("acquire"));
        assert_eq!(response.metadata.server, Some("geowiz".to_string()));
    }

    #[test]
    fn default_detail_level_is_standard() {
        let raw = json!({"rawData": {"huge": true}, "keep": 1});
        let response = shape(raw, ShapeOptions::default());
        assert_eq!(response.detail_level, DetailLevel::Standard);
        assert_eq!(response.data, json!({"keep": 1}));
    }

    #[test]
    fn shape_error_builds_a_zero_completeness_envelope() {
        let error = ErrorDetail {
            error_type: ErrorType::Retryable,
            message: "ETIMEDOUT".to_string(),
            reason: None,
            recovery_steps: Vec::new(),
            alternative_tools: Vec::new(),
            retry_after_ms: Some(2000),
        };
        let response = shape_error(error, ShapeOptions::default());
        assert!(!response.success);
        assert_eq!(response.completeness, 0);
        assert_eq!(response.confidence, 0);
        assert_eq!(response.summary, "ETIMEDOUT");
    }
}
