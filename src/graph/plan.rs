// src/graph/plan.rs

//! Execution plan -> graph nodes.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::graph::node::{GraphInput, GraphNode, GraphOutput, NodeRef, SharedNode};

/// A step of an execution plan as delivered by the orchestration engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanStep {
    pub key: String,
    pub inputs: Vec<PlanInput>,
}

/// One input of a plan step, listing upstream step keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanInput {
    pub depends_on: Vec<String>,
}

impl PlanStep {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            inputs: Vec::new(),
        }
    }

    /// Add an input depending on the given upstream keys.
    pub fn with_input<I, S>(mut self, depends_on: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs.push(PlanInput {
            depends_on: depends_on.into_iter().map(Into::into).collect(),
        });
        self
    }
}

/// Build graph nodes from plan steps, one node per step in plan order.
///
/// Inputs are copied as-is. The reverse edges are derived: every upstream
/// step gets a single output whose `depended_by` lists its consumers.
/// Upstream keys that are not part of the plan stay on the input side only.
pub fn nodes_from_plan(steps: &[PlanStep]) -> Vec<SharedNode> {
    let mut nodes: Vec<GraphNode> = Vec::with_capacity(steps.len());
    let mut position: HashMap<&str, usize> = HashMap::with_capacity(steps.len());

    // First pass: one node per step.
    for step in steps {
        position.entry(step.key.as_str()).or_insert(nodes.len());
        nodes.push(GraphNode::new(step.key.clone()));
    }

    // Second pass: inputs, and the matching outputs on the upstream side.
    for (idx, step) in steps.iter().enumerate() {
        for input in &step.inputs {
            nodes[idx].inputs.push(GraphInput {
                depends_on: input.depends_on.iter().map(NodeRef::new).collect(),
            });

            for upstream in &input.depends_on {
                let Some(&up_idx) = position.get(upstream.as_str()) else {
                    debug!(step = %step.key, upstream = %upstream, "upstream key not in plan");
                    continue;
                };
                let up = &mut nodes[up_idx];
                if up.outputs.is_empty() {
                    up.outputs.push(GraphOutput::default());
                }
                up.outputs[0].depended_by.push(NodeRef::new(step.key.clone()));
            }
        }
    }

    nodes.into_iter().map(Arc::new).collect()
}
