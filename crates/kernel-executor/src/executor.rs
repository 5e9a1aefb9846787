use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use crate::config::ExecutorConfig;
use crate::transport::TransportFn;
use kernel_types::PendingAction;

/// Execution engine (§4.2): single-call retry, scatter-gather, bundle
/// phase resolution, and the confirmation gate. Owns its injected
/// transport and every `PendingAction` for the kernel's lifetime (§3,
/// Ownership) — the registry it resolves tools against is passed in per
/// call rather than owned here.
pub struct Executor {
    pub(crate) config: ExecutorConfig,
    pub(crate) transport: RwLock<Option<TransportFn>>,
    pub(crate) pending_actions: Mutex<HashMap<String, PendingAction>>,
}

impl Executor {
    pub fn new(config: ExecutorConfig) -> Self {
        Self {
            config,
            transport: RwLock::new(None),
            pending_actions: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> ExecutorConfig {
        self.config
    }

    /// Inject the transport function (§6). May be called again to swap
    /// transports (e.g. in tests); there is no "already set" error.
    pub fn set_transport(&self, transport: TransportFn) {
        *self.transport.write().expect("transport lock poisoned") = Some(transport);
    }

    pub fn is_connected(&self) -> bool {
        self.transport.read().expect("transport lock poisoned").is_some()
    }

    pub(crate) fn pending_action_count(&self) -> usize {
        self.pending_actions.lock().expect("pending actions lock poisoned").len()
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new(ExecutorConfig::default())
    }
}
