//! In-process session manager (§4.7): creates, looks up, and destroys
//! per-user sessions. Sessions are strict context boundaries — there is no
//! operation here that reads one session's state through another's id.
//!
//! Lifetime is in-process only; nothing here is persisted to disk (§4.7).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use kernel_types::{Preferences, Role, Session, SessionId, UserIdentity};
use uuid::Uuid;

/// Lightweight summary of a session, for `listSessions` (§4.7) — the full
/// `Session` (identity, preferences, and the results map) is reached
/// through `get_session`/`get_session_mut` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub id: SessionId,
    pub user_id: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl From<&Session> for SessionInfo {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            user_id: session.identity.user_id.clone(),
            role: session.identity.role,
            created_at: session.created_at,
            last_activity: session.last_activity,
        }
    }
}

/// Owns every live session for the kernel's lifetime (§3, Ownership).
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: BTreeMap<SessionId, Session>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session, defaulting identity to the fixed demo identity and
    /// preferences to empty when not supplied (§4.7).
    pub fn create_session(
        &mut self,
        identity: Option<UserIdentity>,
        preferences: Option<Preferences>,
    ) -> Session {
        let id = SessionId::new(Uuid::new_v4().to_string());
        let session = Session::new(
            id.clone(),
            identity.unwrap_or_else(UserIdentity::demo),
            preferences.unwrap_or_default(),
        );
        self.sessions.insert(id, session.clone());
        session
    }

    /// Shared access to a session, by id. No cross-session reach: an
    /// unknown id is simply absent, never another session's data.
    pub fn get_session(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.get(id)
    }

    /// Mutable access, for callers that need to `store_result`/
    /// `get_result` (which themselves bump `last_activity`).
    pub fn get_session_mut(&mut self, id: &SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    /// Remove a session. Returns whether one existed.
    pub fn destroy_session(&mut self, id: &SessionId) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// Summaries of every live session, sorted by id (`BTreeMap` order).
    pub fn list_sessions(&self) -> Vec<SessionInfo> {
        self.sessions.values().map(SessionInfo::from).collect()
    }
}
