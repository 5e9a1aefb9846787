use kernel_types::{BundleStep, DetailLevel, GatherStrategy, TaskBundle};

/// `geowiz`, `econobot`, `curve-smith`, `risk-analysis` — all parallel,
/// summary detail, nothing optional (§4.9).
pub fn quick_screen() -> TaskBundle {
    TaskBundle {
        name: "quick_screen".to_string(),
        description: "Fast parallel screen across the four core analysis domains.".to_string(),
        steps: vec![
            BundleStep::new("geowiz.analyze").parallel().at_detail(DetailLevel::Summary),
            BundleStep::new("econobot.analyze").parallel().at_detail(DetailLevel::Summary),
            BundleStep::new("curve-smith.analyze").parallel().at_detail(DetailLevel::Summary),
            BundleStep::new("risk-analysis.analyze").parallel().at_detail(DetailLevel::Summary),
        ],
        gather_strategy: GatherStrategy::All,
    }
}

/// Four-phase due-diligence workflow (§4.9):
/// 1. geowiz, econobot, curve-smith, market*, research* — parallel, standard
/// 2. risk-analysis, legal*, title*, drilling*, infrastructure*, development*
///    — parallel, standard, depends on phase 1
/// 3. test* — sequential, depends on risk-analysis
/// 4. reporter (depends on test), decision (depends on reporter) —
///    sequential, full detail
pub fn full_due_diligence() -> TaskBundle {
    let phase_one = ["geowiz", "econobot", "curve-smith"];
    let phase_one_optional = ["market", "research"];
    let phase_two = ["risk-analysis"];
    let phase_two_optional = ["legal", "title", "drilling", "infrastructure", "development"];

    let mut steps = Vec::new();

    for server in phase_one {
        steps.push(
            BundleStep::new(format!("{server}.analyze"))
                .parallel()
                .at_detail(DetailLevel::Standard),
        );
    }
    for server in phase_one_optional {
        steps.push(
            BundleStep::new(format!("{server}.analyze"))
                .parallel()
                .optional()
                .at_detail(DetailLevel::Standard),
        );
    }

    let phase_one_names: Vec<&'static str> = phase_one.iter().chain(phase_one_optional.iter()).copied().collect();
    for server in phase_two {
        steps.push(
            BundleStep::new(format!("{server}.analyze"))
                .parallel()
                .at_detail(DetailLevel::Standard)
                .depends_on(phase_one_names.iter().map(|s| tool_name(s)).collect::<Vec<_>>()),
        );
    }
    for server in phase_two_optional {
        steps.push(
            BundleStep::new(format!("{server}.analyze"))
                .parallel()
                .optional()
                .at_detail(DetailLevel::Standard)
                .depends_on(phase_one_names.iter().map(|s| tool_name(s)).collect::<Vec<_>>()),
        );
    }

    steps.push(
        BundleStep::new("test.analyze")
            .optional()
            .depends_on(["risk-analysis.analyze"]),
    );
    steps.push(
        BundleStep::new("reporter.analyze")
            .at_detail(DetailLevel::Full)
            .depends_on(["test.analyze"]),
    );
    steps.push(
        BundleStep::new("decision.analyze")
            .at_detail(DetailLevel::Full)
            .depends_on(["reporter.analyze"]),
    );

    TaskBundle {
        name: "full_due_diligence".to_string(),
        description: "Complete four-phase due-diligence workflow ending in an investment decision."
            .to_string(),
        steps,
        gather_strategy: GatherStrategy::Majority,
    }
}

fn tool_name(server: &'static str) -> &'static str {
    // `BundleStep::depends_on` takes `&'static str` tool names; every
    // server in this module registers exactly one `{server}.analyze` tool,
    // so a small static lookup avoids allocating at bundle-construction
    // time.
    match server {
        "geowiz" => "geowiz.analyze",
        "econobot" => "econobot.analyze",
        "curve-smith" => "curve-smith.analyze",
        "market" => "market.analyze",
        "research" => "research.analyze",
        "risk-analysis" => "risk-analysis.analyze",
        "legal" => "legal.analyze",
        "title" => "title.analyze",
        "drilling" => "drilling.analyze",
        "infrastructure" => "infrastructure.analyze",
        "development" => "development.analyze",
        other => other,
    }
}
