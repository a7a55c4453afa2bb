// src/config/model.rs

use serde::Deserialize;

use crate::graph::{PlanStep, SharedNode, nodes_from_plan};

/// Plan file as read from TOML, before validation.
///
/// ```toml
/// [[step]]
/// name = "extract"
///
/// [[step]]
/// name = "transform"
/// after = ["extract"]
/// ```
///
/// Steps keep file order; that order is the node order used for layout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlanFile {
    #[serde(default)]
    pub step: Vec<StepConfig>,
}

/// `[[step]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct StepConfig {
    pub name: String,

    /// Upstream steps whose outputs this step consumes.
    #[serde(default)]
    pub after: Vec<String>,
}

impl StepConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            after: Vec::new(),
        }
    }
}

/// A validated plan: unique names, known references, no cycles.
///
/// Built with `PlanFile::try_from(raw)` (see `validate.rs`).
#[derive(Debug, Clone)]
pub struct PlanFile {
    steps: Vec<StepConfig>,
}

impl PlanFile {
    pub(crate) fn new_unchecked(steps: Vec<StepConfig>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[StepConfig] {
        &self.steps
    }

    /// One plan step per entry; `after` becomes a single input.
    pub fn to_plan_steps(&self) -> Vec<PlanStep> {
        self.steps
            .iter()
            .map(|s| {
                let step = PlanStep::new(s.name.clone());
                if s.after.is_empty() {
                    step
                } else {
                    step.with_input(s.after.iter().cloned())
                }
            })
            .collect()
    }

    pub fn nodes(&self) -> Vec<SharedNode> {
        nodes_from_plan(&self.to_plan_steps())
    }
}
