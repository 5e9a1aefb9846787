use chrono::Utc;
use kernel_registry::Registry;
use kernel_types::{AgentOSResponse, PendingAction, ResponseMetadata, ToolRequest};
use serde_json::json;

use crate::executor::Executor;
use crate::idempotency::generate_action_id;

impl Executor {
    /// Invoke `request` through the confirmation gate (§4.2). A tool that
    /// doesn't require confirmation just executes; a gated one is parked
    /// as a `PendingAction` and the caller gets back a zero-confidence,
    /// zero-completeness envelope carrying the action id.
    pub async fn execute_with_confirmation(
        &self,
        request: ToolRequest,
        registry: &Registry,
    ) -> AgentOSResponse {
        let Some(descriptor) = registry.get_tool(&request.tool_name) else {
            return self.permanent_envelope(
                &request.tool_name,
                None,
                format!("Unknown tool: {}", request.tool_name),
                0,
            );
        };
        if !descriptor.flags.requires_confirmation {
            return self.execute(&request, registry).await;
        }

        let epoch_ms = Utc::now().timestamp_millis();
        let action_id = generate_action_id(&request.tool_name, &request.args, epoch_ms);
        let description = format!("Confirm {} before it takes effect.", request.tool_name);
        let pending = PendingAction {
            action_id: action_id.clone(),
            tool_name: request.tool_name.clone(),
            args: request.args.clone(),
            created_at: Utc::now(),
            description,
        };

        self.pending_actions
            .lock()
            .expect("pending actions lock poisoned")
            .insert(action_id.clone(), pending.clone());

        AgentOSResponse {
            success: true,
            summary: format!("{} requires confirmation before it takes effect.", request.tool_name),
            confidence: 0,
            data: json!({
                "requires_confirmation": true,
                "pending_action": {
                    "actionId": pending.action_id,
                    "toolName": pending.tool_name,
                    "description": pending.description,
                },
            }),
            detail_level: request.detail_level_or_default(),
            completeness: 0,
            missing_sub_analyses: Vec::new(),
            degraded: false,
            metadata: ResponseMetadata {
                server: Some(descriptor.server.clone()),
                persona: registry.get_server(&descriptor.server).map(|s| s.persona.clone()),
                execution_ms: 0,
                timestamp: Utc::now().to_rfc3339(),
                idempotency_key: Some(action_id),
                retry_attempts: None,
                total_retry_delay_ms: None,
            },
            error: None,
        }
    }

    /// Execute a stored pending action. Removal happens before the
    /// transport call (compare-and-delete, §9) so a second concurrent
    /// `confirm_action` for the same id always observes "not found."
    pub async fn confirm_action(&self, action_id: &str, registry: &Registry) -> AgentOSResponse {
        let pending = self
            .pending_actions
            .lock()
            .expect("pending actions lock poisoned")
            .remove(action_id);
        let Some(pending) = pending else {
            return self.permanent_envelope(action_id, None, "No pending action found".to_string(), 0);
        };
        let request = ToolRequest::new(pending.tool_name).with_args(pending.args);
        self.execute(&request, registry).await
    }

    /// Discard a pending action without executing it. Returns whether one
    /// existed.
    pub fn cancel_action(&self, action_id: &str) -> bool {
        self.pending_actions
            .lock()
            .expect("pending actions lock poisoned")
            .remove(action_id)
            .is_some()
    }
}
