use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, RwLock};

use kernel_auth::AuthDecision;
use kernel_executor::{
    self as executor, BundleResponse, Executor, ScatterGatherResult, TransportFn,
};
use kernel_registry::{Registry, ServerFilter};
use kernel_session::{SessionInfo, SessionManager};
use kernel_types::{
    AgentOSResponse, AuditAction, ErrorDetail, ErrorType, Preferences, Session, SessionId,
    ServerConfig, ServerInfo, TaskBundle, ToolDescriptor, ToolRequest, UserIdentity,
};
use serde_json::Value;

use crate::config::KernelConfig;
use crate::error::{Error, Result};

/// Composition root (§4.8): wires the registry, executor, session manager,
/// auth, and audit middleware behind one surface. Construct once per
/// process; every method takes `&self` — internal state is synchronized,
/// not owned exclusively by a caller.
pub struct Kernel {
    config: KernelConfig,
    registry: RwLock<Arc<Registry>>,
    executor: Executor,
    sessions: Mutex<SessionManager>,
    audit: kernel_audit::AuditLog,
    initialized: std::sync::atomic::AtomicBool,
}

impl Kernel {
    pub fn new(config: KernelConfig) -> Self {
        let audit = kernel_audit::AuditLog::new(config.audit_config());
        let executor = Executor::new(config.executor_config());
        Self {
            config,
            registry: RwLock::new(Arc::new(Registry::default())),
            executor,
            sessions: Mutex::new(SessionManager::new()),
            audit,
            initialized: std::sync::atomic::AtomicBool::new(false),
        }
    }

    pub fn with_default_config() -> Self {
        Self::new(KernelConfig::default().with_env_overrides())
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Populate the registry from `configs`. Idempotent: a second call is a
    /// no-op and returns `false` (§4.8).
    pub fn initialize(&self, configs: &[ServerConfig]) -> bool {
        use std::sync::atomic::Ordering;
        if self.initialized.swap(true, Ordering::SeqCst) {
            return false;
        }
        *self.registry.write().expect("registry lock poisoned") = Arc::new(Registry::new(configs));
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(std::sync::atomic::Ordering::SeqCst)
    }

    // ---- Discovery (§4.1, §4.8) -------------------------------------

    pub fn list_servers(&self, filter: Option<&ServerFilter>) -> Vec<ServerInfo> {
        self.registry.read().expect("registry lock poisoned").list_servers(filter)
    }

    pub fn describe_tools(&self, server_name: Option<&str>) -> Vec<ToolDescriptor> {
        self.registry.read().expect("registry lock poisoned").list_tools(server_name)
    }

    pub fn find_capability(&self, query: &str) -> Vec<ToolDescriptor> {
        self.registry.read().expect("registry lock poisoned").find_by_capability(query)
    }

    pub fn resolve_server(&self, tool_name: &str) -> Option<String> {
        self.registry.read().expect("registry lock poisoned").resolve_server(tool_name)
    }

    pub fn list_bundles(&self) -> Vec<&'static str> {
        vec![
            "quick_screen",
            "full_due_diligence",
            "geological_deep_dive",
            "financial_review",
        ]
    }

    // ---- Execution (§4.2, §4.8) --------------------------------------

    pub fn set_executor_fn(&self, transport: TransportFn) {
        self.executor.set_transport(transport);
    }

    /// Raw single-call execution: no auth check, no audit entries (§4.8).
    pub async fn execute(&self, request: &ToolRequest) -> AgentOSResponse {
        let registry = self.registry.read().expect("registry lock poisoned").clone();
        self.executor.execute(request, &registry).await
    }

    /// `authCheck` without executing (§4.8).
    pub fn auth_check(&self, tool_name: &str, session_id: Option<&SessionId>) -> AuthDecision {
        let identity = self.identity_for(session_id);
        kernel_auth::check(tool_name, &identity, self.config.security.require_auth)
    }

    /// Full pipeline: auth → audit(request) → execute → audit(response or
    /// error or denial) (§4.8).
    pub async fn call_tool(&self, request: ToolRequest, session_id: Option<SessionId>) -> AgentOSResponse {
        let identity = self.identity_for(session_id.as_ref());
        let role = identity.role;
        let decision = kernel_auth::check(&request.tool_name, &identity, self.config.security.require_auth);

        let user_id = identity.user_id.clone();
        let session_id_str = session_id.as_ref().map(|s| s.as_str().to_string()).unwrap_or_default();

        if !decision.allowed {
            let entry = kernel_audit::build_entry(
                request.tool_name.clone(),
                AuditAction::Denied,
                request.args.clone(),
                user_id,
                session_id_str,
                role.to_string(),
                Some(false),
                None,
            );
            self.audit.log_denial(&entry);

            let reason = decision.reason.clone().unwrap_or_default();
            let error = ErrorDetail {
                error_type: ErrorType::AuthRequired,
                message: format!("Access denied for {}: {reason}", request.tool_name),
                reason: Some(reason),
                recovery_steps: vec![format!(
                    "Escalate to role {} or higher to call this tool.",
                    decision.required_role.map(|r| r.to_string()).unwrap_or_else(|| "a higher".to_string())
                )],
                alternative_tools: Vec::new(),
                retry_after_ms: None,
            };
            return kernel_shaper::shape_error(
                error,
                kernel_shaper::ShapeOptions {
                    detail_level: request.detail_level,
                    ..Default::default()
                },
            );
        }

        let request_entry = kernel_audit::build_entry(
            request.tool_name.clone(),
            AuditAction::Request,
            request.args.clone(),
            user_id.clone(),
            session_id_str.clone(),
            role.to_string(),
            None,
            None,
        );
        self.audit.log_request(&request_entry);

        let started = std::time::Instant::now();
        let response = self.execute(&request).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        let action = if response.success { AuditAction::Response } else { AuditAction::Error };
        let mut response_entry = kernel_audit::build_entry(
            request.tool_name.clone(),
            action,
            request.args.clone(),
            user_id,
            session_id_str,
            role.to_string(),
            Some(response.success),
            Some(duration_ms),
        );
        response_entry.error_type = response.error.as_ref().map(|e| e.error_type);
        if response.success {
            self.audit.log_response(&response_entry);
        } else {
            self.audit.log_error(&response_entry);
        }

        if let Some(session_id) = session_id {
            if let Some(session) = self.sessions.lock().expect("sessions lock poisoned").get_session_mut(&session_id) {
                session.store_result(request.tool_name.clone(), response.clone());
            }
        }

        response
    }

    fn identity_for(&self, session_id: Option<&SessionId>) -> UserIdentity {
        session_id
            .and_then(|id| self.sessions.lock().expect("sessions lock poisoned").get_session(id).map(|s| s.identity.clone()))
            .unwrap_or_else(UserIdentity::demo)
    }

    // ---- Parallel and bundled (§4.2, §4.9) ---------------------------

    pub async fn execute_parallel(&self, requests: &[ToolRequest]) -> ScatterGatherResult {
        let registry = self.registry.read().expect("registry lock poisoned").clone();
        self.executor.execute_parallel(requests, &registry).await
    }

    pub async fn quick_screen(&self, tract_args: Option<BTreeMap<String, Value>>) -> BundleResponse {
        self.run_bundle(&executor::quick_screen(), tract_args).await
    }

    pub async fn full_analysis(&self, tract_args: Option<BTreeMap<String, Value>>) -> BundleResponse {
        self.run_bundle(&executor::full_due_diligence(), tract_args).await
    }

    pub async fn geological_deep_dive(&self, tract_args: Option<BTreeMap<String, Value>>) -> BundleResponse {
        self.run_bundle(&kernel_bundles::geological_deep_dive(), tract_args).await
    }

    pub async fn financial_review(&self, tract_args: Option<BTreeMap<String, Value>>) -> BundleResponse {
        self.run_bundle(&kernel_bundles::financial_review(), tract_args).await
    }

    /// Run `full_due_diligence`, then replace the `decision.analyze` step's
    /// result with a confirmation-gated pending action (§4.8).
    pub async fn should_we_invest(&self, tract_args: Option<BTreeMap<String, Value>>) -> BundleResponse {
        let bundle = executor::full_due_diligence();
        let mut result = self.run_bundle(&bundle, tract_args.clone()).await;

        let registry = self.registry.read().expect("registry lock poisoned").clone();
        let request = ToolRequest::new("decision.analyze").with_args(tract_args.unwrap_or_default());
        let gated = self.executor.execute_with_confirmation(request, &registry).await;
        result.results.insert("decision.analyze".to_string(), gated);
        result
    }

    async fn run_bundle(&self, bundle: &TaskBundle, tract_args: Option<BTreeMap<String, Value>>) -> BundleResponse {
        let registry = self.registry.read().expect("registry lock poisoned").clone();
        self.executor
            .execute_bundle(bundle, &tract_args.unwrap_or_default(), &registry)
            .await
    }

    // ---- Confirmation gate (§4.2, §4.8) ------------------------------

    pub async fn confirm_action(&self, action_id: &str) -> AgentOSResponse {
        let registry = self.registry.read().expect("registry lock poisoned").clone();
        self.executor.confirm_action(action_id, &registry).await
    }

    pub fn cancel_action(&self, action_id: &str) -> bool {
        self.executor.cancel_action(action_id)
    }

    // ---- Sessions (§4.7, §4.8) ----------------------------------------

    pub fn create_session(&self, identity: Option<UserIdentity>, preferences: Option<Preferences>) -> Session {
        self.sessions.lock().expect("sessions lock poisoned").create_session(identity, preferences)
    }

    pub fn get_session(&self, id: &SessionId) -> Option<SessionInfo> {
        self.sessions.lock().expect("sessions lock poisoned").get_session(id).map(SessionInfo::from)
    }

    /// The full `Session` — results map included — rather than the
    /// lightweight `SessionInfo` `getSession` returns (§4.8).
    pub fn get_session_raw(&self, id: &SessionId) -> Option<Session> {
        self.sessions.lock().expect("sessions lock poisoned").get_session(id).cloned()
    }

    pub fn who_am_i(&self, id: &SessionId) -> Result<UserIdentity> {
        self.sessions
            .lock()
            .expect("sessions lock poisoned")
            .get_session(id)
            .map(|s| s.identity.clone())
            .ok_or_else(|| Error::SessionNotFound(id.to_string()))
    }

    pub fn destroy_session(&self, id: &SessionId) -> bool {
        self.sessions.lock().expect("sessions lock poisoned").destroy_session(id)
    }

    pub fn list_sessions(&self) -> Vec<SessionInfo> {
        self.sessions.lock().expect("sessions lock poisoned").list_sessions()
    }

    // ---- Idempotency (§4.2, §4.8) --------------------------------------

    pub fn generate_idempotency_key(
        &self,
        tool_name: &str,
        args: &BTreeMap<String, Value>,
        session_id: Option<&str>,
    ) -> String {
        executor::generate_idempotency_key(tool_name, args, session_id)
    }
}
