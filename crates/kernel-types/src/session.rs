use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identity::{Preferences, UserIdentity};
use crate::response::AgentOSResponse;

/// Opaque session identifier (UUIDv4 string or equivalent, §3).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Per-user session context (§3, §4.7).
///
/// Invariant: `results` grows monotonically for the session's lifetime —
/// nothing in this type ever removes an entry. Sessions are isolated
/// contexts; nothing here reaches across to another session's state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub identity: UserIdentity,
    pub preferences: Preferences,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    results: BTreeMap<String, AgentOSResponse>,
}

impl Session {
    pub fn new(id: SessionId, identity: UserIdentity, preferences: Preferences) -> Self {
        let now = Utc::now();
        Self {
            id,
            identity,
            preferences,
            created_at: now,
            last_activity: now,
            results: BTreeMap::new(),
        }
    }

    /// Store a prior response under `key`, touching `last_activity`.
    pub fn store_result(&mut self, key: impl Into<String>, response: AgentOSResponse) {
        self.results.insert(key.into(), response);
        self.touch();
    }

    /// Look up a prior response by key, touching `last_activity`.
    pub fn get_result(&mut self, key: &str) -> Option<&AgentOSResponse> {
        self.touch();
        self.results.get(key)
    }

    /// Keys of every result stored so far, in insertion... actually lookup
    /// order (`BTreeMap` keeps them key-sorted, which is a stable and
    /// deterministic order for snapshotting into `InjectedContext`).
    pub fn available_results(&self) -> Vec<String> {
        self.results.keys().cloned().collect()
    }

    fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    /// Snapshot handed to a worker as session-scoped context (§4.7).
    pub fn injected_context(&self, timezone: impl Into<String>) -> InjectedContext {
        InjectedContext {
            user_id: self.identity.user_id.clone(),
            role: self.identity.role,
            session_id: self.id.clone(),
            timestamp: Utc::now(),
            timezone: timezone.into(),
            default_basin: self.preferences.default_basin.clone(),
            risk_tolerance: self.preferences.risk_tolerance.clone(),
            available_results: self.available_results(),
        }
    }
}

/// A point-in-time snapshot of session state, injected into worker calls
/// (§3, §4.7).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjectedContext {
    pub user_id: String,
    pub role: crate::identity::Role,
    pub session_id: SessionId,
    pub timestamp: DateTime<Utc>,
    pub timezone: String,
    pub default_basin: Option<String>,
    pub risk_tolerance: Option<String>,
    pub available_results: Vec<String>,
}

/// A confirmation-gated invocation awaiting `confirmAction`/`cancelAction`
/// (§3, §4.2).
///
/// Lifecycle: created when a `requiresConfirmation` tool is invoked via
/// `executeWithConfirmation`; destroyed on confirm or cancel. No automatic
/// expiry (see SPEC_FULL.md §10.5 on pending-action TTL).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingAction {
    pub action_id: String,
    pub tool_name: String,
    pub args: BTreeMap<String, Value>,
    pub created_at: DateTime<Utc>,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Role;
    use crate::response::ResponseMetadata;

    fn sample_response() -> AgentOSResponse {
        AgentOSResponse {
            success: true,
            summary: "ok".to_string(),
            confidence: 80,
            data: Value::Null,
            detail_level: crate::tool::DetailLevel::Standard,
            completeness: 100,
            missing_sub_analyses: Vec::new(),
            degraded: false,
            metadata: ResponseMetadata::default(),
            error: None,
        }
    }

    #[test]
    fn results_grow_monotonically() {
        let mut session = Session::new(
            SessionId::new("s-1"),
            UserIdentity::demo(),
            Preferences::default(),
        );
        assert!(session.available_results().is_empty());

        session.store_result("geowiz.analyze", sample_response());
        assert_eq!(session.available_results(), vec!["geowiz.analyze"]);

        session.store_result("econobot.analyze", sample_response());
        assert_eq!(session.available_results().len(), 2);
    }

    #[test]
    fn injected_context_reflects_identity_and_results() {
        let mut identity = UserIdentity::demo();
        identity.role = Role::Engineer;
        let mut session = Session::new(SessionId::new("s-2"), identity, Preferences::default());
        session.store_result("risk-analysis.analyze", sample_response());

        let ctx = session.injected_context("UTC");
        assert_eq!(ctx.role, Role::Engineer);
        assert_eq!(ctx.available_results, vec!["risk-analysis.analyze"]);
        assert_eq!(ctx.session_id, SessionId::new("s-2"));
    }
}
