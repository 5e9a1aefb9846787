use kernel_types::ToolType;

/// Optional, AND-combined filters for `listServers` (§4.1). A server is
/// included only if it has at least one tool matching `tool_type` (when
/// set) and at least one capability matching `capability` as a
/// case-insensitive substring (when set).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerFilter {
    pub domain: Option<String>,
    pub tool_type: Option<ToolType>,
    pub capability: Option<String>,
}

impl ServerFilter {
    pub fn matches(&self, domain: &str, tool_types: &[ToolType], capabilities: &[String]) -> bool {
        if let Some(want) = &self.domain
            && want != domain
        {
            return false;
        }
        if let Some(want) = self.tool_type
            && !tool_types.contains(&want)
        {
            return false;
        }
        if let Some(query) = &self.capability {
            let query = query.to_lowercase();
            if !capabilities.iter().any(|c| c.to_lowercase().contains(&query)) {
                return false;
            }
        }
        true
    }
}
