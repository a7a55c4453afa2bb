use std::sync::Arc;

use dagit_layout::gaant::{MarkerSpan, RunMetadata, StepAttempt, StepMetadata};
use dagit_layout::graph::{GraphInput, GraphNode, GraphOutput, NodeRef, PlanStep, SharedNode, nodes_from_plan};
use dagit_layout::types::StepState;

/// Builder for node lists with symmetric edges.
///
/// Nodes keep insertion order; `edge` may name nodes that are added later.
#[derive(Default)]
pub struct GraphBuilder {
    steps: Vec<PlanStep>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, name: &str) -> Self {
        if !self.steps.iter().any(|s| s.key == name) {
            self.steps.push(PlanStep::new(name));
        }
        self
    }

    /// Add `from -> to`, creating either node if needed.
    pub fn edge(mut self, from: &str, to: &str) -> Self {
        self = self.node(from).node(to);
        let step = self
            .steps
            .iter_mut()
            .find(|s| s.key == to)
            .expect("node was just added");
        match step.inputs.first_mut() {
            Some(input) => input.depends_on.push(from.to_string()),
            None => step.inputs.push(dagit_layout::graph::PlanInput {
                depends_on: vec![from.to_string()],
            }),
        }
        self
    }

    /// Chain `names[0] -> names[1] -> ...`.
    pub fn chain(mut self, names: &[&str]) -> Self {
        for pair in names.windows(2) {
            self = self.edge(pair[0], pair[1]);
        }
        if let [only] = names {
            self = self.node(only);
        }
        self
    }

    pub fn build(self) -> Vec<SharedNode> {
        nodes_from_plan(&self.steps)
    }

    pub fn build_arc(self) -> Arc<[SharedNode]> {
        self.build().into()
    }
}

/// Build a node by hand, for edge shapes `GraphBuilder` keeps symmetric
/// (dangling references, one-sided edges).
pub fn raw_node(name: &str, depends_on: &[&str], depended_by: &[&str]) -> SharedNode {
    let mut node = GraphNode::new(name);
    if !depends_on.is_empty() {
        node.inputs.push(GraphInput {
            depends_on: depends_on.iter().map(|n| NodeRef::new(*n)).collect(),
        });
    }
    if !depended_by.is_empty() {
        node.outputs.push(GraphOutput {
            depended_by: depended_by.iter().map(|n| NodeRef::new(*n)).collect(),
        });
    }
    Arc::new(node)
}

/// Names of a node list, in order.
pub fn names(nodes: &[SharedNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.name.as_str()).collect()
}

/// Builder for `RunMetadata`.
#[derive(Default)]
pub struct RunMetadataBuilder {
    metadata: RunMetadata,
}

impl RunMetadataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_log_at(mut self, ms: i64) -> Self {
        self.metadata.first_log_at = Some(ms);
        self
    }

    pub fn exited_at(mut self, ms: i64) -> Self {
        self.metadata.exited_at = Some(ms);
        self
    }

    pub fn global_marker(mut self, key: &str, start: Option<i64>, end: Option<i64>) -> Self {
        self.metadata.global_markers.push(MarkerSpan {
            key: key.to_string(),
            start,
            end,
        });
        self
    }

    /// A step with only a state (e.g. skipped, or waiting to start).
    pub fn state(mut self, step: &str, state: StepState) -> Self {
        self.step_mut(step).state = Some(state);
        self
    }

    /// A step that ran once from `start` to `end` (`None` while running).
    pub fn ran(self, step: &str, start: i64, end: Option<i64>, state: StepState) -> Self {
        self.attempt(step, start, end, state)
    }

    /// Append an attempt; the step's start/end/state follow its attempts.
    pub fn attempt(mut self, step: &str, start: i64, end: Option<i64>, exit_state: StepState) -> Self {
        let meta = self.step_mut(step);
        meta.start.get_or_insert(start);
        meta.end = end;
        meta.state = Some(exit_state);
        meta.attempts.push(StepAttempt {
            start,
            end,
            exit_state: end.map(|_| exit_state),
        });
        self
    }

    pub fn step_marker(mut self, step: &str, key: &str, start: Option<i64>, end: Option<i64>) -> Self {
        self.step_mut(step).markers.push(MarkerSpan {
            key: key.to_string(),
            start,
            end,
        });
        self
    }

    pub fn build(self) -> RunMetadata {
        self.metadata
    }

    fn step_mut(&mut self, step: &str) -> &mut StepMetadata {
        self.metadata.steps.entry(step.to_string()).or_default()
    }
}
