use serde::{Deserialize, Serialize};

/// Error taxonomy (§7): transient/permanent/credential/human-action-needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    Retryable,
    Permanent,
    AuthRequired,
    UserAction,
}

impl ErrorType {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorType::Retryable => "retryable",
            ErrorType::Permanent => "permanent",
            ErrorType::AuthRequired => "auth_required",
            ErrorType::UserAction => "user_action",
        }
    }
}

/// The output of `addRecoveryGuide`/`classifyErrorDetail` (§4.3): a
/// classification plus actionable next steps, independent of the raw error
/// message it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecoveryGuide {
    pub error_type: Option<ErrorType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default)]
    pub recovery_steps: Vec<String>,
    #[serde(default)]
    pub alternative_tools: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_ms: Option<u64>,
}

/// One failed request inside a scatter-gather or bundle phase result (§4.2,
/// §8 scenario 2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureDetail {
    pub tool_name: String,
    pub message: String,
    pub recovery_guide: RecoveryGuide,
}
