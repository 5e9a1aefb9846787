use std::collections::HashSet;

use kernel_types::BundleStep;

/// Partition `steps` into dependency-ordered phases (§4.2, Phase
/// resolution): every step's `depends_on` is fully contained in earlier
/// phases. If no remaining step is ready — a cycle, or a dependency that
/// never appears — the rest land in one final phase rather than
/// deadlocking the resolver.
pub fn resolve_phases(steps: &[BundleStep]) -> Vec<Vec<BundleStep>> {
    let mut remaining: Vec<BundleStep> = steps.to_vec();
    let mut placed: HashSet<String> = HashSet::new();
    let mut phases = Vec::new();

    while !remaining.is_empty() {
        let (ready, not_ready): (Vec<BundleStep>, Vec<BundleStep>) = remaining
            .into_iter()
            .partition(|step| step.depends_on.iter().all(|dep| placed.contains(dep)));

        if ready.is_empty() {
            phases.push(not_ready);
            break;
        }

        for step in &ready {
            placed.insert(step.tool_name.clone());
        }
        phases.push(ready);
        remaining = not_ready;
    }

    phases
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(name: &str) -> BundleStep {
        BundleStep::new(name)
    }

    #[test]
    fn independent_steps_land_in_one_phase() {
        let steps = vec![step("a.analyze"), step("b.analyze")];
        let phases = resolve_phases(&steps);
        assert_eq!(phases.len(), 1);
        assert_eq!(phases[0].len(), 2);
    }

    #[test]
    fn dependent_step_lands_in_a_later_phase() {
        let steps = vec![
            step("a.analyze"),
            step("b.analyze").depends_on(["a.analyze"]),
        ];
        let phases = resolve_phases(&steps);
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0][0].tool_name, "a.analyze");
        assert_eq!(phases[1][0].tool_name, "b.analyze");
    }

    #[test]
    fn circular_deps_land_in_one_final_phase_without_deadlocking() {
        let steps = vec![
            step("a.analyze").depends_on(["b.analyze"]),
            step("b.analyze").depends_on(["a.analyze"]),
        ];
        let phases = resolve_phases(&steps);
        assert_eq!(phases.len(), 1);
        assert_eq!(phases[0].len(), 2);
    }

    #[test]
    fn missing_dependency_still_terminates() {
        let steps = vec![step("a.analyze").depends_on(["nonexistent.analyze"])];
        let phases = resolve_phases(&steps);
        assert_eq!(phases.len(), 1);
        assert_eq!(phases[0].len(), 1);
    }

    #[test]
    fn three_phase_chain_resolves_in_order() {
        let steps = vec![
            step("a.analyze"),
            step("b.analyze").depends_on(["a.analyze"]),
            step("c.analyze").depends_on(["b.analyze"]),
        ];
        let phases = resolve_phases(&steps);
        assert_eq!(phases.len(), 3);
        assert_eq!(phases[2][0].tool_name, "c.analyze");
    }
}
