use std::collections::BTreeMap;

use kernel_types::AgentOSResponse;

use crate::guide::recovery_guide;

/// Result of `handleDegradation` (§4.3): a partial-result summary plus
/// human-readable suggestions for what to do next.
#[derive(Debug, Clone, PartialEq)]
pub struct DegradedResponse {
    pub completeness: u8,
    /// True when completeness is at least the configured threshold —
    /// "useful" per the Open Question in §9, exposed as
    /// `resilience.minCompleteness` rather than hardcoded.
    pub useful: bool,
    pub missing_tools: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Partition `results` against `expected_tools`, compute completeness, and
/// suggest next steps, following alternatives where they exist (§4.3).
pub fn handle_degradation(
    results: &BTreeMap<String, AgentOSResponse>,
    expected_tools: &[String],
    min_completeness: f64,
) -> DegradedResponse {
    let total = expected_tools.len().max(1);
    let successful = expected_tools
        .iter()
        .filter(|t| results.get(*t).is_some_and(|r| r.success))
        .count();
    let completeness = ((successful as f64 / total as f64) * 100.0).round() as u8;
    let useful = (completeness as f64 / 100.0) >= min_completeness;

    let missing_tools: Vec<String> = expected_tools
        .iter()
        .filter(|t| !results.get(*t).is_some_and(|r| r.success))
        .cloned()
        .collect();

    let mut suggestions = Vec::new();
    if useful {
        suggestions.push(format!(
            "Partial results cover {completeness}% of expected analyses and may suffice."
        ));
    } else {
        suggestions.push(format!(
            "Only {completeness}% of expected analyses completed; consider retrying."
        ));
    }
    for tool in &missing_tools {
        let guide = recovery_guide("missing result", tool);
        if !guide.alternative_tools.is_empty() {
            suggestions.push(format!(
                "{tool} did not complete; consider {} instead.",
                guide.alternative_tools.join(", ")
            ));
        }
    }

    DegradedResponse {
        completeness,
        useful,
        missing_tools,
        suggestions,
    }
}
