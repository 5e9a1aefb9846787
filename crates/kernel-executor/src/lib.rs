mod bundle;
mod confirm;
mod config;
mod executor;
mod idempotency;
mod phases;
mod presets;
mod scatter;
mod single;
mod transport;

pub use bundle::{BundlePhaseResult, BundleResponse};
pub use config::ExecutorConfig;
pub use executor::Executor;
pub use idempotency::{generate_action_id, generate_idempotency_key};
pub use phases::resolve_phases;
pub use presets::{full_due_diligence, quick_screen};
pub use scatter::ScatterGatherResult;
pub use transport::{TransportEnvelope, TransportError, TransportFn, TransportResult};

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use futures::FutureExt;
    use kernel_registry::Registry;
    use kernel_types::{BundleStep, GatherStrategy, ServerConfig, TaskBundle, ToolRequest};
    use serde_json::json;

    use super::*;

    fn registry() -> Registry {
        Registry::new(&[
            ServerConfig {
                name: "geowiz".to_string(),
                script: "geowiz.py".to_string(),
                persona: "The Geologist".to_string(),
                description: "geology analysis".to_string(),
                domain: "geology".to_string(),
                capabilities: vec!["geology".to_string()],
            },
            ServerConfig {
                name: "decision".to_string(),
                script: "decision.py".to_string(),
                persona: "The Decision Maker".to_string(),
                description: "final recommendation".to_string(),
                domain: "decision".to_string(),
                capabilities: vec!["decision".to_string()],
            },
        ])
    }

    fn always_succeeds() -> TransportFn {
        Arc::new(|_server, _args| {
            async move { Ok(TransportEnvelope::ok(json!({"ok": true}))) }.boxed()
        })
    }

    fn fails_twice_then_succeeds() -> TransportFn {
        let attempts = Arc::new(std::sync::atomic::AtomicU32::new(0));
        Arc::new(move |_server, _args| {
            let attempts = attempts.clone();
            async move {
                let n = attempts.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                if n < 2 {
                    Ok(TransportEnvelope::failure("ETIMEDOUT"))
                } else {
                    Ok(TransportEnvelope::ok(json!({"ok": true})))
                }
            }
            .boxed()
        })
    }

    #[tokio::test]
    async fn execute_returns_permanent_error_for_unknown_tool() {
        let executor = Executor::new(ExecutorConfig::default());
        executor.set_transport(always_succeeds());
        let response = executor
            .execute(&ToolRequest::new("nosuchserver.analyze"), &registry())
            .await;
        assert!(!response.success);
    }

    #[tokio::test]
    async fn execute_retries_retryable_failures_until_success() {
        let executor = Executor::new(ExecutorConfig {
            retry_backoff_ms: 1,
            ..ExecutorConfig::default()
        });
        executor.set_transport(fails_twice_then_succeeds());
        let response = executor
            .execute(&ToolRequest::new("geowiz.analyze"), &registry())
            .await;
        assert!(response.success);
        assert_eq!(response.metadata.retry_attempts, Some(2));
    }

    #[tokio::test]
    async fn execute_parallel_reports_partial_completeness() {
        let executor = Executor::new(ExecutorConfig::default());
        executor.set_transport(Arc::new(|server, _args| {
            async move {
                if server == "geowiz" {
                    Ok(TransportEnvelope::ok(json!({"ok": true})))
                } else {
                    Ok(TransportEnvelope::failure("invalid las file"))
                }
            }
            .boxed()
        }));
        let requests = vec![
            ToolRequest::new("geowiz.analyze"),
            ToolRequest::new("decision.analyze"),
        ];
        let gathered = executor.execute_parallel(&requests, &registry()).await;
        assert_eq!(gathered.completeness, 50);
        assert_eq!(gathered.failures.len(), 1);
    }

    #[tokio::test]
    async fn confirmation_gate_requires_an_explicit_confirm() {
        let executor = Executor::new(ExecutorConfig::default());
        executor.set_transport(always_succeeds());
        let registry = registry();

        let gated = executor
            .execute_with_confirmation(ToolRequest::new("decision.analyze"), &registry)
            .await;
        assert!(gated.data["requires_confirmation"].as_bool().unwrap());
        let action_id = gated.metadata.idempotency_key.clone().unwrap();

        let confirmed = executor.confirm_action(&action_id, &registry).await;
        assert!(confirmed.success);

        let second = executor.confirm_action(&action_id, &registry).await;
        assert!(!second.success);
    }

    #[tokio::test]
    async fn cancel_action_removes_a_pending_action() {
        let executor = Executor::new(ExecutorConfig::default());
        executor.set_transport(always_succeeds());
        let registry = registry();
        let gated = executor
            .execute_with_confirmation(ToolRequest::new("decision.analyze"), &registry)
            .await;
        let action_id = gated.metadata.idempotency_key.unwrap();
        assert!(executor.cancel_action(&action_id));
        assert!(!executor.cancel_action(&action_id));
    }

    #[tokio::test]
    async fn execute_bundle_runs_dependent_steps_in_order() {
        let executor = Executor::new(ExecutorConfig::default());
        executor.set_transport(always_succeeds());
        let bundle = TaskBundle {
            name: "quick_screen".to_string(),
            description: "two-step bundle".to_string(),
            steps: vec![
                BundleStep::new("geowiz.analyze").parallel(),
                BundleStep::new("decision.analyze").depends_on(["geowiz.analyze"]),
            ],
            gather_strategy: GatherStrategy::All,
        };
        let result = executor
            .execute_bundle(&bundle, &BTreeMap::new(), &registry())
            .await;
        assert!(result.overall_success);
        assert_eq!(result.completeness, 100);
        assert_eq!(result.phases.len(), 2);
        assert_eq!(result.results.len(), 2);
    }
}
