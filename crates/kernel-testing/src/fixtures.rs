use kernel_types::ServerConfig;

/// Stand-in configs for the fourteen domain workers named in §1, enough to
/// build a `Registry` for tests without a real worker fleet.
pub fn server_configs() -> Vec<ServerConfig> {
    [
        ("geowiz", "The Geologist", "geology", "Formation evaluation and log analysis"),
        ("econobot", "The Economist", "economics", "Type curve economics and cash flow modeling"),
        ("curve-smith", "The Curve Smith", "curve", "Decline curve fitting"),
        ("risk-analysis", "The Risk Analyst", "risk", "Risk scoring across the portfolio"),
        ("market", "The Market Watcher", "market", "Commodity price and market context"),
        ("research", "The Researcher", "research", "Background research and literature review"),
        ("legal", "The Counsel", "legal", "Title and lease legal review"),
        ("title", "The Title Examiner", "title", "Title chain examination"),
        ("drilling", "The Driller", "drilling", "Drilling plan and cost estimation"),
        ("infrastructure", "The Infrastructure Planner", "infrastructure", "Midstream and takeaway analysis"),
        ("development", "The Development Planner", "development", "Development sequencing and spacing"),
        ("test", "The Tester", "test", "Well test interpretation"),
        ("reporter", "The Scribe", "reporting", "Report generation"),
        ("decision", "The Decider", "decision", "Final investment recommendation"),
    ]
    .into_iter()
    .map(|(name, persona, domain, description)| ServerConfig {
        name: name.to_string(),
        script: format!("{name}.py"),
        description: description.to_string(),
        persona: persona.to_string(),
        domain: domain.to_string(),
        capabilities: vec![domain.to_string()],
    })
    .collect()
}
