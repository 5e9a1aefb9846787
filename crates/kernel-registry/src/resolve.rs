use std::collections::BTreeMap;

use kernel_types::ToolDescriptor;

/// Resolve `name` to a tool descriptor under the three accepted shapes
/// (§4.1, Resolution): a fully qualified `server.tool` name, a bare server
/// name (its primary tool), or a prefix (first matching tool name wins,
/// lexicographically — `tools` is a `BTreeMap` so `range` walks in order).
pub fn resolve_tool<'a>(
    tools: &'a BTreeMap<String, ToolDescriptor>,
    known_servers: &[String],
    name: &str,
) -> Option<&'a ToolDescriptor> {
    if let Some(tool) = tools.get(name) {
        return Some(tool);
    }
    if known_servers.iter().any(|s| s == name) {
        let primary = format!("{name}.analyze");
        if let Some(tool) = tools.get(&primary) {
            return Some(tool);
        }
    }
    tools
        .range(name.to_string()..)
        .find(|(key, _)| key.starts_with(name))
        .map(|(_, tool)| tool)
}
