use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;

/// The raw, unshaped response a transport call resolves to (§6, External
/// interfaces). `shape`/`shape_error` in `kernel-shaper` turn this into an
/// `AgentOSResponse`; the executor never exposes it directly.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportEnvelope {
    pub success: bool,
    pub data: Option<Value>,
    pub confidence: Option<u8>,
    pub error: Option<TransportError>,
}

impl TransportEnvelope {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            confidence: None,
            error: None,
        }
    }

    pub fn ok_with_confidence(data: Value, confidence: u8) -> Self {
        Self {
            success: true,
            data: Some(data),
            confidence: Some(confidence),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            confidence: None,
            error: Some(TransportError {
                message: message.into(),
            }),
        }
    }
}

/// A failure reported by a worker. Classification (§4.3) always re-derives
/// from `message` via the resilience pattern tables rather than trusting a
/// worker-supplied type tag, so only the message is carried here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub message: String,
}

/// `Err` represents a thrown exception from the transport layer itself —
/// distinct from a structured `TransportEnvelope { success: false, .. }` —
/// wrapped as a permanent error at the executor boundary (§7).
pub type TransportResult = anyhow::Result<TransportEnvelope>;

/// The single injected function coupling the kernel to the tool protocol
/// (§6): `(serverName, args) → envelope`. Opaque transport mechanics
/// (stdio JSON-RPC, HTTP, in-process) live entirely on the other side of
/// this boundary.
pub type TransportFn =
    Arc<dyn Fn(String, BTreeMap<String, Value>) -> BoxFuture<'static, TransportResult> + Send + Sync>;
