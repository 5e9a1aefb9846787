use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use futures::FutureExt;
use kernel_executor::{TransportEnvelope, TransportFn};
use serde_json::{json, Value};

/// One scripted outcome for a single transport call (§10.4).
pub enum ScriptStep {
    Success(Value),
    SuccessWithConfidence(Value, u8),
    Failure(String),
    /// Sleeps `duration` before responding success — pair with an
    /// `ExecutorConfig.tool_timeout_ms` shorter than `duration` to exercise
    /// the timeout path.
    Timeout(Duration),
}

impl ScriptStep {
    /// A successful call with `{"confidence": 80}` style payload, enough
    /// for shaper/degradation tests that just need a plausible success.
    pub fn ok() -> Self {
        ScriptStep::Success(json!({"confidence": 80}))
    }
}

/// A fake transport that replays a fixed sequence of outcomes per server
/// name, looping the last scripted step once the queue is drained (§10.4).
/// Stands in for a real worker process in both unit and end-to-end tests.
pub struct ScriptedTransport {
    scripts: Mutex<BTreeMap<String, VecDeque<ScriptStep>>>,
}

impl ScriptedTransport {
    pub fn builder() -> ScriptedTransportBuilder {
        ScriptedTransportBuilder {
            scripts: BTreeMap::new(),
        }
    }
}

pub struct ScriptedTransportBuilder {
    scripts: BTreeMap<String, VecDeque<ScriptStep>>,
}

impl ScriptedTransportBuilder {
    /// Queue `step` as the next outcome `server` will return.
    pub fn on(mut self, server: impl Into<String>, step: ScriptStep) -> Self {
        self.scripts.entry(server.into()).or_default().push_back(step);
        self
    }

    /// Convenience for the common "this server always succeeds" case.
    pub fn always_ok(self, server: impl Into<String>) -> Self {
        self.on(server, ScriptStep::ok())
    }

    /// `ETIMEDOUT` twice, then success — the §8 Scenario 1 shape.
    pub fn retryable_then_success(self, server: impl Into<String>) -> Self {
        let server = server.into();
        self.on(server.clone(), ScriptStep::Failure("ETIMEDOUT".to_string()))
            .on(server.clone(), ScriptStep::Failure("ETIMEDOUT".to_string()))
            .on(server, ScriptStep::ok())
    }

    pub fn build(self) -> TransportFn {
        let transport = ScriptedTransport {
            scripts: Mutex::new(self.scripts),
        };
        std::sync::Arc::new(move |server: String, _args| {
            let step = {
                let mut scripts = transport.scripts.lock().expect("scripted transport lock poisoned");
                let queue = scripts.entry(server.clone()).or_default();
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    // Keep the last entry so the server keeps answering
                    // the same way after its script runs out.
                    queue.front().map(describe)
                }
            };
            async move {
                match step.unwrap_or_else(|| ScriptStep::Failure("no script for server".to_string())) {
                    ScriptStep::Success(data) => Ok(TransportEnvelope::ok(data)),
                    ScriptStep::SuccessWithConfidence(data, confidence) => {
                        Ok(TransportEnvelope::ok_with_confidence(data, confidence))
                    }
                    ScriptStep::Failure(message) => Ok(TransportEnvelope::failure(message)),
                    ScriptStep::Timeout(duration) => {
                        tokio::time::sleep(duration).await;
                        Ok(TransportEnvelope::ok(json!({"confidence": 80})))
                    }
                }
            }
            .boxed()
        })
    }
}

/// Clones a `ScriptStep` by reconstructing an equivalent one — `ScriptStep`
/// itself isn't `Clone` since `Value` inside it may be large and we only
/// ever need to replay the final step.
fn describe(step: &ScriptStep) -> ScriptStep {
    match step {
        ScriptStep::Success(v) => ScriptStep::Success(v.clone()),
        ScriptStep::SuccessWithConfidence(v, c) => ScriptStep::SuccessWithConfidence(v.clone(), *c),
        ScriptStep::Failure(m) => ScriptStep::Failure(m.clone()),
        ScriptStep::Timeout(d) => ScriptStep::Timeout(*d),
    }
}
