use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tool::DetailLevel;

/// Role an identity carries in the system (§3, `UserIdentity`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Analyst,
    Engineer,
    Executive,
    Admin,
}

impl Role {
    /// Permission set granted by this role (§4.6, Policy).
    ///
    /// Each role's set is a superset of the role below it: analyst < engineer <
    /// executive < admin. Kept as a match rather than a lookup table so the
    /// hierarchy is visible at a glance.
    pub fn permissions(self) -> BTreeSet<Permission> {
        use Permission::*;
        match self {
            Role::Analyst => [ReadAnalysis].into_iter().collect(),
            Role::Engineer => [ReadAnalysis, WriteReports].into_iter().collect(),
            Role::Executive => [ReadAnalysis, WriteReports, ExecuteDecisions]
                .into_iter()
                .collect(),
            Role::Admin => [
                ReadAnalysis,
                WriteReports,
                ExecuteDecisions,
                AdminServers,
                AdminUsers,
            ]
            .into_iter()
            .collect(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Analyst => "analyst",
            Role::Engineer => "engineer",
            Role::Executive => "executive",
            Role::Admin => "admin",
        };
        write!(f, "{s}")
    }
}

/// A single grantable capability (§4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ReadAnalysis,
    WriteReports,
    ExecuteDecisions,
    AdminServers,
    AdminUsers,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Permission::ReadAnalysis => "read:analysis",
            Permission::WriteReports => "write:reports",
            Permission::ExecuteDecisions => "execute:decisions",
            Permission::AdminServers => "admin:servers",
            Permission::AdminUsers => "admin:users",
        };
        write!(f, "{s}")
    }
}

/// Immutable identity anchor for a session (§3, `Session`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub user_id: String,
    pub role: Role,
    pub permissions: BTreeSet<Permission>,
    pub organization: Option<String>,
    pub display_name: Option<String>,
}

impl UserIdentity {
    /// The fixed demo identity the session manager falls back to (§4.7).
    pub fn demo() -> Self {
        Self {
            user_id: "demo".to_string(),
            role: Role::Analyst,
            permissions: [Permission::ReadAnalysis].into_iter().collect(),
            organization: None,
            display_name: None,
        }
    }
}

/// Per-session preferences injected into context (§3, §4.7).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_basin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_tolerance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_level_default: Option<DetailLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investment_criteria: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_hierarchy_is_nested() {
        let analyst = Role::Analyst.permissions();
        let engineer = Role::Engineer.permissions();
        let executive = Role::Executive.permissions();
        let admin = Role::Admin.permissions();

        assert!(analyst.is_subset(&engineer));
        assert!(engineer.is_subset(&executive));
        assert!(executive.is_subset(&admin));
        assert!(!engineer.is_subset(&analyst));
    }

    #[test]
    fn demo_identity_has_read_only() {
        let demo = UserIdentity::demo();
        assert_eq!(demo.permissions, Role::Analyst.permissions());
    }
}
