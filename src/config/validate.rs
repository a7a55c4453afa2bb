// src/config/validate.rs

use std::collections::HashSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{PlanFile, RawPlanFile};
use crate::errors::{DagitError, Result};

impl TryFrom<RawPlanFile> for PlanFile {
    type Error = DagitError;

    fn try_from(raw: RawPlanFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_plan(&raw)?;
        Ok(PlanFile::new_unchecked(raw.step))
    }
}

fn validate_raw_plan(plan: &RawPlanFile) -> Result<()> {
    ensure_has_steps(plan)?;
    validate_step_names(plan)?;
    validate_step_dependencies(plan)?;
    validate_dag(plan)?;
    Ok(())
}

fn ensure_has_steps(plan: &RawPlanFile) -> Result<()> {
    if plan.step.is_empty() {
        return Err(DagitError::ConfigError(
            "plan must contain at least one [[step]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_step_names(plan: &RawPlanFile) -> Result<()> {
    let mut seen = HashSet::new();
    for step in &plan.step {
        if step.name.trim().is_empty() {
            return Err(DagitError::ConfigError(
                "step name must not be empty".to_string(),
            ));
        }
        if !seen.insert(step.name.as_str()) {
            return Err(DagitError::ConfigError(format!(
                "duplicate step name '{}'",
                step.name
            )));
        }
    }
    Ok(())
}

fn validate_step_dependencies(plan: &RawPlanFile) -> Result<()> {
    let names: HashSet<&str> = plan.step.iter().map(|s| s.name.as_str()).collect();

    for step in &plan.step {
        for dep in &step.after {
            if dep == &step.name {
                return Err(DagitError::ConfigError(format!(
                    "step '{}' cannot depend on itself in `after`",
                    step.name
                )));
            }
            if !names.contains(dep.as_str()) {
                return Err(DagitError::ConfigError(format!(
                    "step '{}' has unknown dependency '{}' in `after`",
                    step.name, dep
                )));
            }
        }
    }
    Ok(())
}

fn validate_dag(plan: &RawPlanFile) -> Result<()> {
    // Edge direction: upstream -> step.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for step in &plan.step {
        graph.add_node(step.name.as_str());
    }
    for step in &plan.step {
        for dep in &step.after {
            graph.add_edge(dep.as_str(), step.name.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(DagitError::DagCycle {
            step: cycle.node_id().to_string(),
        }),
    }
}
