//! Permission gate (§4.6): maps tools to required permissions and checks
//! an identity's grants against them. Always produces a structured
//! decision, even when disabled, so the audit trail stays uniform.

mod policy;

pub use policy::{minimum_role_for, required_permissions};

use std::collections::BTreeSet;

use kernel_types::{Permission, Role, UserIdentity};

/// Result of `check` (§4.6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthDecision {
    pub allowed: bool,
    pub reason: Option<String>,
    pub required_role: Option<Role>,
    pub required_permissions: BTreeSet<Permission>,
}

/// Evaluate whether `identity` may call `tool_name`. When `require_auth` is
/// `false`, every call is allowed but the decision is still fully
/// populated so callers can audit it the same way as an enforced check.
pub fn check(tool_name: &str, identity: &UserIdentity, require_auth: bool) -> AuthDecision {
    let required = required_permissions(tool_name);
    let required_role = minimum_role_for(&required);

    if !require_auth {
        return AuthDecision {
            allowed: true,
            reason: None,
            required_role,
            required_permissions: required,
        };
    }

    let allowed = identity.permissions.is_superset(&required);
    let reason = (!allowed).then(|| {
        let missing: Vec<String> = required
            .difference(&identity.permissions)
            .map(|p| p.to_string())
            .collect();
        format!("missing permissions: {}", missing.join(", "))
    });

    AuthDecision {
        allowed,
        reason,
        required_role,
        required_permissions: required,
    }
}
