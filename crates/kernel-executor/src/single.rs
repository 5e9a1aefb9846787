use std::time::{Duration, Instant};

use kernel_registry::Registry;
use kernel_resilience::recovery_guide;
use kernel_shaper::{shape, shape_error, ShapeOptions};
use kernel_types::{AgentOSResponse, ErrorDetail, ErrorType, ToolRequest};
use rand::Rng;

use crate::executor::Executor;

impl Executor {
    /// Single-call invocation (§4.2): resolve the owning server, call the
    /// transport under a timeout, retry retryable failures with
    /// exponential backoff and jitter, and return a well-formed envelope
    /// either way — this never returns a Rust `Err`.
    pub async fn execute(&self, request: &ToolRequest, registry: &Registry) -> AgentOSResponse {
        let Some(descriptor) = registry.get_tool(&request.tool_name) else {
            let mut response = self.permanent_envelope(
                &request.tool_name,
                None,
                format!("Unknown tool: {}", request.tool_name),
                0,
            );
            response.detail_level = request.detail_level_or_default();
            return response;
        };
        let server = descriptor.server.clone();
        let persona = registry.get_server(&server).map(|s| s.persona.clone());
        let detail_level = request.detail_level_or_default();

        let mut attempt: u32 = 0;
        let mut total_delay_ms: u64 = 0;

        loop {
            let Some(transport) = self.transport.read().expect("transport lock poisoned").clone() else {
                let mut response = self.permanent_envelope(
                    &request.tool_name,
                    Some(&server),
                    "Executor not connected to a transport".to_string(),
                    0,
                );
                response.detail_level = detail_level;
                return response;
            };

            let start = Instant::now();
            let timeout = Duration::from_millis(self.config.tool_timeout_ms);
            let call = (transport)(server.clone(), request.args.clone());
            let outcome = tokio::time::timeout(timeout, call).await;
            let execution_ms = start.elapsed().as_millis() as u64;

            let failure_message = match outcome {
                Ok(Ok(envelope)) if envelope.success => {
                    let raw = envelope.data.unwrap_or(serde_json::Value::Null);
                    let mut response = shape(
                        raw,
                        ShapeOptions {
                            detail_level: Some(detail_level),
                            server: Some(server.clone()),
                            persona: persona.clone(),
                            execution_ms,
                            confidence: envelope.confidence,
                        },
                    );
                    if attempt > 0 {
                        response.metadata.retry_attempts = Some(attempt);
                        response.metadata.total_retry_delay_ms = Some(total_delay_ms);
                    }
                    return response;
                }
                Ok(Ok(envelope)) => envelope
                    .error
                    .map(|e| e.message)
                    .unwrap_or_else(|| "worker reported failure with no message".to_string()),
                Ok(Err(err)) => {
                    // A thrown exception from the transport itself is
                    // wrapped as permanent — it never goes through
                    // classification (§7).
                    let mut response = self.permanent_envelope(
                        &request.tool_name,
                        Some(&server),
                        err.to_string(),
                        execution_ms,
                    );
                    response.detail_level = detail_level;
                    if attempt > 0 {
                        response.metadata.retry_attempts = Some(attempt);
                        response.metadata.total_retry_delay_ms = Some(total_delay_ms);
                    }
                    return response;
                }
                Err(_elapsed) => format!(
                    "Tool call to {server} timed out after {}ms",
                    self.config.tool_timeout_ms
                ),
            };

            let guide = recovery_guide(&failure_message, &request.tool_name);
            let error_type = guide.error_type.unwrap_or(ErrorType::Retryable);

            if error_type == ErrorType::Retryable && attempt < self.config.max_retries {
                let delay_ms = self.backoff_delay_ms(&failure_message, attempt);
                total_delay_ms += delay_ms;
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                attempt += 1;
                continue;
            }

            let error = ErrorDetail {
                error_type,
                message: failure_message,
                reason: guide.reason,
                recovery_steps: guide.recovery_steps,
                alternative_tools: guide.alternative_tools,
                retry_after_ms: guide.retry_after_ms,
            };
            let mut response = shape_error(
                error,
                ShapeOptions {
                    detail_level: Some(detail_level),
                    server: Some(server),
                    persona,
                    execution_ms,
                    confidence: None,
                },
            );
            if attempt > 0 {
                response.metadata.retry_attempts = Some(attempt);
                response.metadata.total_retry_delay_ms = Some(total_delay_ms);
            }
            return response;
        }
    }

    /// Base delay suggested by resilience for `message`, scaled by
    /// `config.retry_backoff_ms` relative to its 1000 ms default, then
    /// doubled per attempt and jittered 0–30% (§4.2, §9).
    pub(crate) fn backoff_delay_ms(&self, message: &str, attempt: u32) -> u64 {
        let suggested = kernel_resilience::retry_delay_ms(message) as f64;
        let scale = self.config.retry_backoff_ms as f64 / 1000.0;
        let base = suggested * scale;
        let backoff = base * 2f64.powi(attempt as i32);
        let jitter = rand::thread_rng().gen_range(0.0..0.30);
        (backoff * (1.0 + jitter)).round() as u64
    }

    /// Build a permanent-error envelope directly, bypassing classification
    /// — used for programmer-error conditions (unknown tool, no
    /// transport) that would not otherwise match the permanent pattern
    /// table (§4.2, Error conditions).
    pub(crate) fn permanent_envelope(
        &self,
        tool_name: &str,
        server: Option<&str>,
        message: String,
        execution_ms: u64,
    ) -> AgentOSResponse {
        let guide = recovery_guide(&message, tool_name);
        let error = ErrorDetail {
            error_type: ErrorType::Permanent,
            message,
            reason: guide.reason,
            recovery_steps: if guide.recovery_steps.is_empty() {
                vec!["Check the request arguments against the tool's expected schema.".to_string()]
            } else {
                guide.recovery_steps
            },
            alternative_tools: guide.alternative_tools,
            retry_after_ms: None,
        };
        shape_error(
            error,
            ShapeOptions {
                detail_level: None,
                server: server.map(str::to_string),
                persona: None,
                execution_ms,
                confidence: None,
            },
        )
    }
}
