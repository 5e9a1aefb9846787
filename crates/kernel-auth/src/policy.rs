use std::collections::BTreeSet;

use kernel_types::{Permission, Role};

/// Command servers and the permission their tools require (§4.6). Every
/// other server's tools are treated as query tools and default to
/// `read:analysis`.
const COMMAND_PERMISSIONS: &[(&str, Permission)] = &[
    ("reporter", Permission::WriteReports),
    ("decision", Permission::ExecuteDecisions),
];

const ROLE_ORDER: &[Role] = &[Role::Analyst, Role::Engineer, Role::Executive, Role::Admin];

fn server_of(tool_name: &str) -> &str {
    tool_name.split_once('.').map(|(server, _)| server).unwrap_or(tool_name)
}

/// Required permission set for `tool_name`, derived from the static
/// server → permission policy (§4.6).
pub fn required_permissions(tool_name: &str) -> BTreeSet<Permission> {
    let server = server_of(tool_name);
    let permission = COMMAND_PERMISSIONS
        .iter()
        .find(|(name, _)| *name == server)
        .map(|(_, permission)| *permission)
        .unwrap_or(Permission::ReadAnalysis);
    [permission].into_iter().collect()
}

/// The lowest role whose permission set satisfies `required`, if any role
/// can.
pub fn minimum_role_for(required: &BTreeSet<Permission>) -> Option<Role> {
    ROLE_ORDER.iter().copied().find(|role| role.permissions().is_superset(required))
}
