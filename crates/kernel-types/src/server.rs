use serde::{Deserialize, Serialize};

/// Connection state of a worker process, mutated by the transport layer
/// (§3, `ServerInfo`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
    Error,
}

/// Input configuration for a worker, supplied at kernel init (§6).
///
/// `script` is opaque to the kernel — it belongs to the transport layer and
/// is never read here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub name: String,
    pub script: String,
    pub description: String,
    pub persona: String,
    pub domain: String,
    pub capabilities: Vec<String>,
}

/// Registry-derived view of a worker (§3, `ServerInfo`).
///
/// Lifecycle: created at kernel init from a `ServerConfig`; `status` is
/// mutated by the transport layer; never destroyed for the kernel's
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub domain: String,
    pub persona: String,
    pub tool_count: usize,
    pub capabilities: Vec<String>,
    pub status: ConnectionStatus,
}
