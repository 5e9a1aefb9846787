use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::recovery::ErrorType;
use crate::tool::DetailLevel;

/// Failure classification attached to a non-success envelope (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub error_type: ErrorType,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default)]
    pub recovery_steps: Vec<String>,
    #[serde(default)]
    pub alternative_tools: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_ms: Option<u64>,
}

/// Execution metadata attached to every envelope (§3).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
    pub execution_ms: u64,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_retry_delay_ms: Option<u64>,
}

/// The standardized response shape the kernel returns for every call (§3,
/// `AgentOSResponse`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentOSResponse {
    pub success: bool,
    pub summary: String,
    pub confidence: u8,
    pub data: Value,
    pub detail_level: DetailLevel,
    pub completeness: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_sub_analyses: Vec<String>,
    #[serde(default)]
    pub degraded: bool,
    pub metadata: ResponseMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

impl AgentOSResponse {
    pub fn is_success(&self) -> bool {
        self.success
    }
}
