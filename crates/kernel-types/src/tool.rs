use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool kind, assigned at registration per the Registry's classification rule
/// (§4.1): `reporter`/`decision` servers emit `Command` tools, everyone else
/// emits `Query`. `Discovery` exists for future meta-tools (`listTools`, etc.)
/// that may be registered directly rather than owned by a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    Query,
    Command,
    Discovery,
}

/// Response verbosity requested by the caller or applied by the shaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailLevel {
    Summary,
    Standard,
    Full,
}

impl Default for DetailLevel {
    fn default() -> Self {
        DetailLevel::Standard
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DetailLevel::Summary => "summary",
            DetailLevel::Standard => "standard",
            DetailLevel::Full => "full",
        };
        write!(f, "{s}")
    }
}

/// Behavioral flags carried by a tool descriptor (§3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolFlags {
    pub read_only: bool,
    pub destructive: bool,
    pub requires_confirmation: bool,
}

/// A single invocable capability on a worker, `{server}.{tool}` (§3).
///
/// Invariant: `name` is unique across the registry that holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Fully-qualified name, `{server}.{tool}`.
    pub name: String,
    pub server: String,
    pub tool_type: ToolType,
    pub description: String,
    pub capabilities: Vec<String>,
    pub supported_detail_levels: Vec<DetailLevel>,
    pub flags: ToolFlags,
    pub smart_defaults: BTreeMap<String, Value>,
}

impl ToolDescriptor {
    /// Build the primary `{server}.analyze` tool for a server, applying the
    /// classification rule from §4.1.
    pub fn primary_for_server(
        server: &str,
        description: impl Into<String>,
        capabilities: Vec<String>,
        command_servers: &[&str],
        confirmation_servers: &[&str],
    ) -> Self {
        let tool_type = if command_servers.contains(&server) {
            ToolType::Command
        } else {
            ToolType::Query
        };
        let flags = ToolFlags {
            read_only: tool_type == ToolType::Query,
            destructive: confirmation_servers.contains(&server),
            requires_confirmation: confirmation_servers.contains(&server),
        };
        Self {
            name: format!("{server}.analyze"),
            server: server.to_string(),
            tool_type,
            description: description.into(),
            capabilities,
            supported_detail_levels: vec![
                DetailLevel::Summary,
                DetailLevel::Standard,
                DetailLevel::Full,
            ],
            flags,
            smart_defaults: BTreeMap::new(),
        }
    }
}
