use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tool::DetailLevel;

/// A single tool invocation request from an agent (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRequest {
    /// Fully qualified (`server.tool`) or short (bare server/prefix) name.
    pub tool_name: String,
    #[serde(default)]
    pub args: BTreeMap<String, Value>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub detail_level: Option<DetailLevel>,
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

impl ToolRequest {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            args: BTreeMap::new(),
            session_id: None,
            detail_level: None,
            idempotency_key: None,
        }
    }

    pub fn with_args(mut self, args: BTreeMap<String, Value>) -> Self {
        self.args = args;
        self
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_detail_level(mut self, level: DetailLevel) -> Self {
        self.detail_level = Some(level);
        self
    }

    pub fn detail_level_or_default(&self) -> DetailLevel {
        self.detail_level.unwrap_or_default()
    }
}
