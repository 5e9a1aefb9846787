use std::collections::BTreeMap;
use std::time::Instant;

use futures::future::join_all;
use kernel_registry::Registry;
use kernel_resilience::recovery_guide;
use kernel_types::{AgentOSResponse, FailureDetail, ToolRequest};

use crate::executor::Executor;

/// Output of a scatter-gather call (§4.2): every requested tool gets an
/// entry in `results` regardless of outcome; `failures` carries the
/// classified detail for whichever ones didn't succeed.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterGatherResult {
    pub results: BTreeMap<String, AgentOSResponse>,
    pub completeness: u8,
    pub total_ms: u64,
    pub failures: Vec<FailureDetail>,
}

impl Executor {
    /// Fan out `requests` in chunks of `max_parallel`, awaiting each chunk
    /// fully before starting the next; within a chunk, one request's
    /// failure never blocks its siblings (§4.2, §5).
    pub async fn execute_parallel(&self, requests: &[ToolRequest], registry: &Registry) -> ScatterGatherResult {
        let start = Instant::now();
        if requests.is_empty() {
            return ScatterGatherResult {
                results: BTreeMap::new(),
                completeness: 100,
                total_ms: 0,
                failures: Vec::new(),
            };
        }

        let mut results = BTreeMap::new();
        for chunk in requests.chunks(self.config.max_parallel.max(1)) {
            let calls = chunk.iter().map(|request| async move {
                let response = self.execute(request, registry).await;
                (request.tool_name.clone(), response)
            });
            for (name, response) in join_all(calls).await {
                results.insert(name, response);
            }
        }

        // `results` is keyed by tool name (§4.2's "map of tool name →
        // envelope"), so a batch that repeats a tool name collapses to one
        // entry; measure completeness against what actually landed in the
        // map rather than the raw request count, or a repeated name would
        // silently understate it.
        let total = results.len();
        let successes = results.values().filter(|r| r.success).count();
        let completeness = ((successes as f64 / total as f64) * 100.0).round() as u8;

        let failures = results
            .iter()
            .filter(|(_, response)| !response.success)
            .map(|(tool_name, response)| {
                let message = response.error.as_ref().map(|e| e.message.clone()).unwrap_or_default();
                FailureDetail {
                    tool_name: tool_name.clone(),
                    recovery_guide: recovery_guide(&message, tool_name),
                    message,
                }
            })
            .collect();

        ScatterGatherResult {
            results,
            completeness,
            total_ms: start.elapsed().as_millis() as u64,
            failures,
        }
    }
}
