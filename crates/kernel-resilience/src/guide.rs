use kernel_types::{ErrorDetail, ErrorType, RecoveryGuide};

use crate::patterns::{classify_error, retry_delay_ms};

/// Fixed alternative-tools table (§4.3). Servers with no meaningful
/// overlap — `test`, `reporter`, `decision` — map to an empty list.
const ALTERNATIVE_TOOLS: &[(&str, &[&str])] = &[
    ("geowiz", &["research.analyze"]),
    ("econobot", &["market.analyze", "research.analyze"]),
    ("curve-smith", &["econobot.analyze", "geowiz.analyze"]),
    ("risk-analysis", &["econobot.analyze", "market.analyze"]),
    ("market", &["econobot.analyze", "research.analyze"]),
    ("research", &["geowiz.analyze", "market.analyze"]),
    ("legal", &["title.analyze"]),
    ("title", &["legal.analyze"]),
    ("drilling", &["curve-smith.analyze", "geowiz.analyze"]),
    ("infrastructure", &["development.analyze"]),
    ("development", &["infrastructure.analyze"]),
    ("test", &[]),
    ("reporter", &[]),
    ("decision", &[]),
];

fn alternatives_for(server: &str) -> Vec<String> {
    ALTERNATIVE_TOOLS
        .iter()
        .find(|(name, _)| *name == server)
        .map(|(_, tools)| tools.iter().map(|t| t.to_string()).collect())
        .unwrap_or_default()
}

/// Server name a tool belongs to, given either a fully-qualified
/// `server.tool` name or a bare server name.
fn server_of(tool_or_server: &str) -> &str {
    tool_or_server
        .split_once('.')
        .map(|(server, _)| server)
        .unwrap_or(tool_or_server)
}

fn recovery_steps_for(error_type: ErrorType, server: &str) -> Vec<String> {
    match error_type {
        ErrorType::AuthRequired => vec![
            "Verify credentials are configured for this tool.".to_string(),
            "Confirm the caller's role has the required permission.".to_string(),
            format!("If {server} continues to deny access, escalate to an admin."),
        ],
        ErrorType::UserAction => vec![
            "Provide the missing file or input the tool requires.".to_string(),
            format!("Re-run {server} once the required input is available."),
        ],
        ErrorType::Retryable => vec![
            "Wait for the suggested retry delay before trying again.".to_string(),
            format!("If {server} remains unavailable, consider alternative tools."),
        ],
        ErrorType::Permanent => vec![
            "Check the request arguments against the tool's expected schema.".to_string(),
            format!("{server} rejected this request outright; retrying will not help."),
        ],
    }
}

/// `addRecoveryGuide` (§4.3): classify `message` and build a full
/// `RecoveryGuide` personalized with `tool_name`'s owning server.
pub fn recovery_guide(message: &str, tool_name: &str) -> RecoveryGuide {
    let error_type = classify_error(message);
    let server = server_of(tool_name);
    RecoveryGuide {
        error_type: Some(error_type),
        reason: Some(message.to_string()),
        recovery_steps: recovery_steps_for(error_type, server),
        alternative_tools: alternatives_for(server),
        retry_after_ms: matches!(error_type, ErrorType::Retryable)
            .then(|| retry_delay_ms(message)),
    }
}

/// `classifyErrorDetail` (§4.3): enrich an existing `ErrorDetail` in place
/// with classification-derived fields, preserving its original message.
pub fn classify_error_detail(detail: &mut ErrorDetail, tool_name: &str) {
    let guide = recovery_guide(&detail.message, tool_name);
    detail.error_type = guide.error_type.unwrap_or(ErrorType::Retryable);
    detail.reason = guide.reason;
    detail.recovery_steps = guide.recovery_steps;
    detail.alternative_tools = guide.alternative_tools;
    detail.retry_after_ms = guide.retry_after_ms;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geology_overlaps_with_research() {
        let guide = recovery_guide("ETIMEDOUT", "geowiz.analyze");
        assert_eq!(guide.alternative_tools, vec!["research.analyze".to_string()]);
        assert_eq!(guide.error_type, Some(ErrorType::Retryable));
        assert_eq!(guide.retry_after_ms, Some(2000));
    }

    #[test]
    fn test_and_reporter_have_no_alternatives() {
        assert!(alternatives_for("test").is_empty());
        assert!(alternatives_for("reporter").is_empty());
    }

    #[test]
    fn classify_error_detail_enriches_in_place() {
        let mut detail = ErrorDetail {
            error_type: ErrorType::Retryable,
            message: "invalid las".to_string(),
            reason: None,
            recovery_steps: Vec::new(),
            alternative_tools: Vec::new(),
            retry_after_ms: None,
        };
        classify_error_detail(&mut detail, "curve-smith.analyze");
        assert_eq!(detail.error_type, ErrorType::Permanent);
        assert!(detail.alternative_tools.contains(&"econobot.analyze".to_string()));
    }
}
