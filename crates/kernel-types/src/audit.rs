use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::recovery::ErrorType;

/// What an audit entry records about a call (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Request,
    Response,
    Error,
    Denied,
}

/// One append-only log line (§3, §6). Field order matches the wire format
/// documented in §6 (no required order, kept here for readability).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub tool: String,
    pub action: AuditAction,
    pub parameters: BTreeMap<String, Value>,
    pub user_id: String,
    pub session_id: String,
    pub role: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
}
