// src/gaant/presets.rs

//! Query presets derived from a run.

use crate::gaant::layout::GaantLayout;
use crate::gaant::metadata::RunMetadata;
use crate::types::StepState;

/// Number of steps listed by the "Slowest Individual Steps" preset.
const SLOWEST_STEP_COUNT: usize = 5;

/// A named query offered next to the query input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPreset {
    pub name: String,
    pub value: String,
}

impl QueryPreset {
    fn new(name: &str, value: String) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}

/// Presets highlighting failed steps, the slowest steps and the slowest path.
///
/// Returns `None` when the layout has no boxes. Presets with nothing to show
/// are omitted.
pub fn interesting_queries_for(
    metadata: &RunMetadata,
    layout: &GaantLayout,
) -> Option<Vec<QueryPreset>> {
    if layout.boxes.is_empty() {
        return None;
    }

    let mut results = Vec::new();

    let errors = metadata
        .steps
        .iter()
        .filter(|(_, step)| step.state == Some(StepState::Failed))
        .map(|(name, _)| format!("+{name}"))
        .collect::<Vec<_>>();
    if !errors.is_empty() {
        results.push(QueryPreset::new("Errors", errors.join(", ")));
    }

    let mut timed = metadata
        .steps
        .iter()
        .filter_map(|(name, step)| step.duration_ms().map(|d| (name.as_str(), d)))
        .collect::<Vec<_>>();
    // Stable, so equal durations keep step order.
    timed.sort_by(|a, b| b.1.cmp(&a.1));
    let slowest = timed
        .iter()
        .take(SLOWEST_STEP_COUNT)
        .map(|(name, _)| *name)
        .collect::<Vec<_>>();
    if !slowest.is_empty() {
        results.push(QueryPreset::new(
            "Slowest Individual Steps",
            slowest.join(", "),
        ));
    }

    let mut rightmost: Option<(&str, f64)> = None;
    for b in &layout.boxes {
        let finished = metadata.step(&b.node.name).is_some_and(|s| s.end.is_some());
        if !finished {
            continue;
        }
        let right = b.x + b.width;
        if rightmost.is_none_or(|(_, best)| right > best) {
            rightmost = Some((b.node.name.as_str(), right));
        }
    }
    if let Some((name, _)) = rightmost {
        results.push(QueryPreset::new("Slowest Path", format!("*{name}")));
    }

    Some(results)
}
