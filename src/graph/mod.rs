// src/graph/mod.rs

//! Node graph shared by the query engine and the Gaant layout.
//!
//! - [`node`] holds the `GraphNode` shape (name plus typed input/output edges)
//!   and a name index used to resolve edges within one node list.
//! - [`plan`] converts execution-plan steps into graph nodes.

pub mod node;
pub mod plan;

pub use node::{GraphInput, GraphNode, GraphOutput, NodeIndex, NodeRef, SharedNode};
pub use plan::{PlanInput, PlanStep, nodes_from_plan};
