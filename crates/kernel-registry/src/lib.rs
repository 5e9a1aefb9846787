//! Index of servers and tools (§4.1): a tool-name index, a capability
//! index, and the name-resolution/filtering logic an agent or the kernel
//! facade uses to discover what it can call.

mod classification;
mod filter;
mod resolve;

pub use classification::{COMMAND_SERVERS, CONFIRMATION_SERVERS};
pub use filter::ServerFilter;

use std::collections::BTreeMap;

use kernel_types::{ConnectionStatus, ServerConfig, ServerInfo, ToolDescriptor, ToolType};

/// Registry of workers and their tools, built once at kernel init (§3,
/// `ServerInfo` lifecycle) and mutated afterward only through
/// `set_server_status`.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    tools: BTreeMap<String, ToolDescriptor>,
    capability_index: BTreeMap<String, Vec<String>>,
    servers: BTreeMap<String, ServerInfo>,
}

impl Registry {
    /// Build the tool-name and capability indices from server configs
    /// (§4.1). Each server registers exactly one primary tool,
    /// `{server}.analyze`, classified per the static command/confirmation
    /// tables.
    pub fn new(configs: &[ServerConfig]) -> Self {
        let mut tools = BTreeMap::new();
        let mut capability_index: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut servers = BTreeMap::new();

        for config in configs {
            let descriptor = ToolDescriptor::primary_for_server(
                &config.name,
                config.description.clone(),
                config.capabilities.clone(),
                classification::COMMAND_SERVERS,
                classification::CONFIRMATION_SERVERS,
            );

            for capability in &descriptor.capabilities {
                capability_index
                    .entry(capability.clone())
                    .or_default()
                    .push(descriptor.name.clone());
            }

            servers.insert(
                config.name.clone(),
                ServerInfo {
                    name: config.name.clone(),
                    domain: config.domain.clone(),
                    persona: config.persona.clone(),
                    tool_count: 1,
                    capabilities: config.capabilities.clone(),
                    status: ConnectionStatus::Connected,
                },
            );

            tools.insert(descriptor.name.clone(), descriptor);
        }

        Self {
            tools,
            capability_index,
            servers,
        }
    }

    /// List known server names, in registration order preserved by the
    /// underlying `BTreeMap`'s key ordering (i.e. name-sorted).
    pub fn list_servers(&self, filter: Option<&ServerFilter>) -> Vec<ServerInfo> {
        self.servers
            .values()
            .filter(|server| {
                let Some(filter) = filter else { return true };
                let tool_types: Vec<ToolType> = self
                    .tools
                    .values()
                    .filter(|t| t.server == server.name)
                    .map(|t| t.tool_type)
                    .collect();
                filter.matches(&server.domain, &tool_types, &server.capabilities)
            })
            .cloned()
            .collect()
    }

    /// List tools, optionally scoped to one server (§4.1).
    pub fn list_tools(&self, server_name: Option<&str>) -> Vec<ToolDescriptor> {
        self.tools
            .values()
            .filter(|t| server_name.is_none_or(|name| t.server == name))
            .cloned()
            .collect()
    }

    /// Case-insensitive substring match against capability tags,
    /// de-duplicated by tool name (§4.1). Result order is not guaranteed
    /// to be stable across registry versions.
    pub fn find_by_capability(&self, query: &str) -> Vec<ToolDescriptor> {
        let query = query.to_lowercase();
        let mut seen = std::collections::BTreeSet::new();
        self.tools
            .values()
            .filter(|tool| {
                tool.capabilities
                    .iter()
                    .any(|c| c.to_lowercase().contains(&query))
            })
            .filter(|tool| seen.insert(tool.name.clone()))
            .cloned()
            .collect()
    }

    fn known_server_names(&self) -> Vec<String> {
        self.servers.keys().cloned().collect()
    }

    /// Owning server name for a fully qualified name, bare server name, or
    /// prefix (§4.1, Resolution).
    pub fn resolve_server(&self, tool_name: &str) -> Option<String> {
        let servers = self.known_server_names();
        resolve::resolve_tool(&self.tools, &servers, tool_name).map(|t| t.server.clone())
    }

    /// The tool descriptor behind the same resolution rule as
    /// `resolveServer` (§4.1).
    pub fn get_tool(&self, tool_name: &str) -> Option<&ToolDescriptor> {
        let servers = self.known_server_names();
        resolve::resolve_tool(&self.tools, &servers, tool_name)
    }

    /// Mutate a server's connection status (§3, `ServerInfo` lifecycle).
    /// Unknown names are a no-op.
    pub fn set_server_status(&mut self, name: &str, status: ConnectionStatus) {
        if let Some(server) = self.servers.get_mut(name) {
            server.status = status;
        }
    }

    /// Every capability tag currently indexed, for introspection/tests.
    pub fn capability_tags(&self) -> Vec<&str> {
        self.capability_index.keys().map(String::as_str).collect()
    }

    /// `ServerInfo` for an exact server name, for callers (the executor,
    /// mainly) that need a tool's owning server's persona/domain.
    pub fn get_server(&self, name: &str) -> Option<&ServerInfo> {
        self.servers.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configs() -> Vec<ServerConfig> {
        vec![
            ServerConfig {
                name: "geowiz".to_string(),
                script: "geowiz.py".to_string(),
                description: "Geological analysis".to_string(),
                persona: "The Geologist".to_string(),
                domain: "geology".to_string(),
                capabilities: vec!["formation evaluation".to_string(), "log analysis".to_string()],
            },
            ServerConfig {
                name: "reporter".to_string(),
                script: "reporter.py".to_string(),
                description: "Report generation".to_string(),
                persona: "The Scribe".to_string(),
                domain: "reporting".to_string(),
                capabilities: vec!["pdf export".to_string()],
            },
            ServerConfig {
                name: "decision".to_string(),
                script: "decision.py".to_string(),
                description: "Investment decisions".to_string(),
                persona: "The Decider".to_string(),
                domain: "decision".to_string(),
                capabilities: vec!["go/no-go".to_string()],
            },
        ]
    }

    #[test]
    fn tool_names_are_unique_and_primary() {
        let registry = Registry::new(&configs());
        assert_eq!(registry.list_tools(None).len(), 3);
        assert!(registry.get_tool("geowiz.analyze").is_some());
    }

    #[test]
    fn reporter_and_decision_are_command_tools() {
        let registry = Registry::new(&configs());
        assert_eq!(registry.get_tool("reporter.analyze").unwrap().tool_type, ToolType::Command);
        assert_eq!(registry.get_tool("geowiz.analyze").unwrap().tool_type, ToolType::Query);
    }

    #[test]
    fn only_decision_requires_confirmation() {
        let registry = Registry::new(&configs());
        assert!(registry.get_tool("decision.analyze").unwrap().flags.requires_confirmation);
        assert!(!registry.get_tool("reporter.analyze").unwrap().flags.requires_confirmation);
    }

    #[test]
    fn capability_search_is_case_insensitive_substring() {
        let registry = Registry::new(&configs());
        let hits = registry.find_by_capability("FORMATION");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "geowiz.analyze");
    }

    #[test]
    fn list_servers_filters_by_type_and_capability_and() {
        let registry = Registry::new(&configs());
        let filter = ServerFilter {
            domain: None,
            tool_type: Some(ToolType::Command),
            capability: Some("pdf".to_string()),
        };
        let servers = registry.list_servers(Some(&filter));
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].name, "reporter");
    }

    #[test]
    fn list_servers_with_mismatched_and_filter_returns_empty() {
        let registry = Registry::new(&configs());
        let filter = ServerFilter {
            domain: None,
            tool_type: Some(ToolType::Command),
            capability: Some("formation".to_string()),
        };
        assert!(registry.list_servers(Some(&filter)).is_empty());
    }

    #[test]
    fn unknown_name_resolves_to_none() {
        let registry = Registry::new(&configs());
        assert!(registry.resolve_server("unknown.tool").is_none());
    }

    #[test]
    fn set_server_status_mutates_in_place() {
        let mut registry = Registry::new(&configs());
        registry.set_server_status("geowiz", ConnectionStatus::Error);
        let servers = registry.list_servers(None);
        let geowiz = servers.iter().find(|s| s.name == "geowiz").unwrap();
        assert_eq!(geowiz.status, ConnectionStatus::Error);
    }

    #[test]
    fn set_server_status_on_unknown_name_is_a_no_op() {
        let mut registry = Registry::new(&configs());
        registry.set_server_status("nonexistent", ConnectionStatus::Error);
        assert_eq!(registry.list_servers(None).len(), 3);
    }
}
