//! The two predefined bundles not hard-coded in the executor module
//! (§4.9): `geological_deep_dive` and `financial_review`. Both are
//! single-phase, all-parallel, `gatherStrategy = all`.

use kernel_types::{BundleStep, DetailLevel, GatherStrategy, TaskBundle};

/// `geowiz` (full), `curve-smith` (standard), `research*` (summary) —
/// all parallel.
pub fn geological_deep_dive() -> TaskBundle {
    TaskBundle {
        name: "geological_deep_dive".to_string(),
        description: "Deep geological analysis with supporting curve fitting and research."
            .to_string(),
        steps: vec![
            BundleStep::new("geowiz.analyze").parallel().at_detail(DetailLevel::Full),
            BundleStep::new("curve-smith.analyze").parallel().at_detail(DetailLevel::Standard),
            BundleStep::new("research.analyze")
                .parallel()
                .optional()
                .at_detail(DetailLevel::Summary),
        ],
        gather_strategy: GatherStrategy::All,
    }
}

/// `econobot` (full), `risk-analysis` (standard), `market*` (summary) —
/// all parallel.
pub fn financial_review() -> TaskBundle {
    TaskBundle {
        name: "financial_review".to_string(),
        description: "Financial modeling with supporting risk and market analysis.".to_string(),
        steps: vec![
            BundleStep::new("econobot.analyze").parallel().at_detail(DetailLevel::Full),
            BundleStep::new("risk-analysis.analyze").parallel().at_detail(DetailLevel::Standard),
            BundleStep::new("market.analyze")
                .parallel()
                .optional()
                .at_detail(DetailLevel::Summary),
        ],
        gather_strategy: GatherStrategy::All,
    }
}
