// src/graph/node.rs

use std::collections::HashMap;
use std::sync::Arc;

/// Reference to another node by name.
///
/// Edges are resolved against whatever node list is being processed, so a
/// reference may dangle when the caller passes a partial subgraph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub name: String,
}

impl NodeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One input of a node: the upstream nodes feeding it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphInput {
    pub depends_on: Vec<NodeRef>,
}

/// One output of a node: the downstream nodes consuming it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphOutput {
    pub depended_by: Vec<NodeRef>,
}

/// A solid or execution step in the pipeline graph.
///
/// Callers are expected to keep edges symmetric (if A's output is depended on
/// by B, B has an input depending on A). Nothing here enforces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphNode {
    pub name: String,
    pub inputs: Vec<GraphInput>,
    pub outputs: Vec<GraphOutput>,
}

/// Nodes are shared between the caller's list, query results and layout boxes.
pub type SharedNode = Arc<GraphNode>;

impl GraphNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Names this node depends on, across all inputs, in declaration order.
    pub fn upstream_names(&self) -> impl Iterator<Item = &str> {
        self.inputs
            .iter()
            .flat_map(|i| i.depends_on.iter())
            .map(|r| r.name.as_str())
    }

    /// Names depending on this node, across all outputs, in declaration order.
    pub fn downstream_names(&self) -> impl Iterator<Item = &str> {
        self.outputs
            .iter()
            .flat_map(|o| o.depended_by.iter())
            .map(|r| r.name.as_str())
    }

    /// Number of upstream edges (duplicates counted).
    pub fn upstream_count(&self) -> usize {
        self.inputs.iter().map(|i| i.depends_on.len()).sum()
    }

    /// Number of downstream edges (duplicates counted).
    pub fn downstream_count(&self) -> usize {
        self.outputs.iter().map(|o| o.depended_by.len()).sum()
    }
}

/// Name -> position lookup over one node list.
///
/// If a name appears twice the first occurrence wins.
#[derive(Debug, Clone)]
pub struct NodeIndex<'a> {
    nodes: &'a [SharedNode],
    by_name: HashMap<&'a str, usize>,
}

impl<'a> NodeIndex<'a> {
    pub fn new(nodes: &'a [SharedNode]) -> Self {
        let mut by_name = HashMap::with_capacity(nodes.len());
        for (idx, node) in nodes.iter().enumerate() {
            by_name.entry(node.name.as_str()).or_insert(idx);
        }
        Self { nodes, by_name }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn node(&self, idx: usize) -> &'a SharedNode {
        &self.nodes[idx]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Immediate upstream neighbours of `idx` that are present in the list.
    pub fn upstream_of(&self, idx: usize) -> Vec<usize> {
        self.nodes[idx]
            .upstream_names()
            .filter_map(|name| self.get(name))
            .collect()
    }

    /// Immediate downstream neighbours of `idx` that are present in the list.
    pub fn downstream_of(&self, idx: usize) -> Vec<usize> {
        self.nodes[idx]
            .downstream_names()
            .filter_map(|name| self.get(name))
            .collect()
    }
}
