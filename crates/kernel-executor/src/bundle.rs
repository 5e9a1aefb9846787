use std::collections::BTreeMap;
use std::time::Instant;

use kernel_registry::Registry;
use kernel_resilience::recovery_guide;
use kernel_types::{AgentOSResponse, BundleStep, FailureDetail, GatherStrategy, TaskBundle, ToolRequest};
use serde_json::Value;

use crate::executor::Executor;
use crate::phases::resolve_phases;

/// One phase's outcome inside a bundle run (§4.2, §4.9).
#[derive(Debug, Clone, PartialEq)]
pub struct BundlePhaseResult {
    pub tools: Vec<String>,
    pub failures: Vec<FailureDetail>,
    pub duration_ms: u64,
}

/// The aggregate result of a bundled call (§4.2).
#[derive(Debug, Clone, PartialEq)]
pub struct BundleResponse {
    pub overall_success: bool,
    pub completeness: u8,
    pub phases: Vec<BundlePhaseResult>,
    pub results: BTreeMap<String, AgentOSResponse>,
}

impl Executor {
    /// Run `bundle`'s steps through the dependency-ordered phases the
    /// resolver produces, merging `tract_args` into every step's static
    /// args (§4.2, Bundled call).
    pub async fn execute_bundle(
        &self,
        bundle: &TaskBundle,
        tract_args: &BTreeMap<String, Value>,
        registry: &Registry,
    ) -> BundleResponse {
        let phases = resolve_phases(&bundle.steps);
        let mut results: BTreeMap<String, AgentOSResponse> = BTreeMap::new();
        let mut phase_results = Vec::with_capacity(phases.len());

        for phase in &phases {
            let start = Instant::now();
            let tools: Vec<String> = phase.iter().map(|step| step.tool_name.clone()).collect();

            let outcomes = if phase.iter().any(|step| step.parallel) {
                self.run_phase_parallel(phase, tract_args, registry).await
            } else {
                self.run_phase_sequential(phase, tract_args, registry).await
            };

            let failures = outcomes
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

            for (tool_name, response) in outcomes {
                results.insert(tool_name, response);
            }

            phase_results.push(BundlePhaseResult {
                tools,
                failures,
                duration_ms: start.elapsed().as_millis() as u64,
            });
        }

        BundleResponse {
            overall_success: evaluate_gather_strategy(bundle, &results),
            completeness: required_completeness(bundle, &results),
            phases: phase_results,
            results,
        }
    }

    async fn run_phase_parallel(
        &self,
        phase: &[BundleStep],
        tract_args: &BTreeMap<String, Value>,
        registry: &Registry,
    ) -> Vec<(String, AgentOSResponse)> {
        let requests: Vec<ToolRequest> = phase.iter().map(|step| step_request(step, tract_args)).collect();
        let gathered = self.execute_parallel(&requests, registry).await;
        phase
            .iter()
            .map(|step| {
                let response = gathered
                    .results
                    .get(&step.tool_name)
                    .cloned()
                    .expect("scatter-gather returns an entry for every requested tool");
                (step.tool_name.clone(), response)
            })
            .collect()
    }

    async fn run_phase_sequential(
        &self,
        phase: &[BundleStep],
        tract_args: &BTreeMap<String, Value>,
        registry: &Registry,
    ) -> Vec<(String, AgentOSResponse)> {
        let mut out = Vec::with_capacity(phase.len());
        for step in phase {
            let request = step_request(step, tract_args);
            let response = self.execute(&request, registry).await;
            out.push((step.tool_name.clone(), response));
        }
        out
    }
}

fn step_request(step: &BundleStep, tract_args: &BTreeMap<String, Value>) -> ToolRequest {
    let mut args = tract_args.clone();
    args.extend(step.static_args.clone());
    let mut request = ToolRequest::new(step.tool_name.clone()).with_args(args);
    if let Some(level) = step.detail_level {
        request = request.with_detail_level(level);
    }
    request
}

/// Overall success per the bundle's gather strategy (§3, §4.2):
/// `all` needs every required (non-optional) step; `majority` needs more
/// than half of all steps, required or not; `any` needs just one.
fn evaluate_gather_strategy(bundle: &TaskBundle, results: &BTreeMap<String, AgentOSResponse>) -> bool {
    let succeeded = |step: &&BundleStep| results.get(&step.tool_name).is_some_and(|r| r.success);
    match bundle.gather_strategy {
        GatherStrategy::All => bundle.steps.iter().filter(|s| !s.optional).all(|s| succeeded(&s)),
        GatherStrategy::Majority => {
            let total = bundle.steps.len();
            let passed = bundle.steps.iter().filter(|s| succeeded(&s)).count();
            passed * 2 > total
        }
        GatherStrategy::Any => bundle.steps.iter().any(|s| succeeded(&s)),
    }
}

/// Completeness = required successes ÷ required total × 100 (§4.2).
fn required_completeness(bundle: &TaskBundle, results: &BTreeMap<String, AgentOSResponse>) -> u8 {
    let required: Vec<&BundleStep> = bundle.steps.iter().filter(|s| !s.optional).collect();
    if required.is_empty() {
        return 100;
    }
    let succeeded = required
        .iter()
        .filter(|s| results.get(&s.tool_name).is_some_and(|r| r.success))
        .count();
    ((succeeded as f64 / required.len() as f64) * 100.0).round() as u8
}
