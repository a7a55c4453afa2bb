// src/query/filter.rs

//! Evaluate a query against a node list.

use tracing::debug;

use crate::graph::{NodeIndex, SharedNode};
use crate::query::token::{Expansion, Selection, Term, parse_clause};

/// Nodes selected by a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// Every selected node: anchors plus their expanded neighbours.
    pub all: Vec<SharedNode>,
    /// Only the nodes named by a clause, before expansion.
    pub focus: Vec<SharedNode>,
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Upstream,
    Downstream,
}

/// Select the subgraph described by `query`.
///
/// - An empty (or all-whitespace) query selects every node and focuses none.
/// - Clauses are separated by `,` and unioned.
/// - Clauses that fail to parse or name an unknown node select nothing.
///
/// Both result lists keep the order of `nodes`.
pub fn filter_by_query(nodes: &[SharedNode], query: &str) -> QueryResult {
    if query.trim().is_empty() {
        return QueryResult {
            all: nodes.to_vec(),
            focus: Vec::new(),
        };
    }

    let index = NodeIndex::new(nodes);
    let mut selected = vec![false; nodes.len()];
    let mut focused = vec![false; nodes.len()];

    for clause in query.split(',') {
        let term = match parse_clause(clause) {
            Ok(term) => term,
            Err(err) => {
                debug!(clause = %clause.trim(), error = %err, "ignoring malformed query clause");
                continue;
            }
        };

        match term {
            Term::All => selected.iter_mut().for_each(|s| *s = true),
            Term::Select(selection) => {
                apply_selection(&index, &selection, &mut selected, &mut focused);
            }
        }
    }

    let pick = |flags: &[bool]| -> Vec<SharedNode> {
        nodes
            .iter()
            .zip(flags)
            .filter(|(_, keep)| **keep)
            .map(|(node, _)| SharedNode::clone(node))
            .collect()
    };

    let result = QueryResult {
        all: pick(&selected),
        focus: pick(&focused),
    };

    debug!(
        query = %query,
        total = nodes.len(),
        all = result.all.len(),
        focus = result.focus.len(),
        "filtered graph by query"
    );

    result
}

fn apply_selection(
    index: &NodeIndex<'_>,
    selection: &Selection,
    selected: &mut [bool],
    focused: &mut [bool],
) {
    let Some(anchor) = index.get(&selection.name) else {
        debug!(name = %selection.name, "query clause names no node in graph");
        return;
    };

    focused[anchor] = true;
    selected[anchor] = true;

    expand(index, anchor, selection.upstream, Direction::Upstream, selected);
    expand(index, anchor, selection.downstream, Direction::Downstream, selected);
}

/// Breadth-first walk from `start`, marking every node reached within the
/// expansion's hop limit. Each walk keeps its own visited set, so cycles
/// terminate.
fn expand(
    index: &NodeIndex<'_>,
    start: usize,
    expansion: Expansion,
    direction: Direction,
    selected: &mut [bool],
) {
    if expansion.is_none() {
        return;
    }

    let limit = expansion.limit();
    let mut visited = vec![false; index.len()];
    visited[start] = true;

    let mut frontier = vec![start];
    let mut depth = 0;

    while !frontier.is_empty() && depth < limit {
        let mut next = Vec::new();
        for idx in frontier {
            let neighbours = match direction {
                Direction::Upstream => index.upstream_of(idx),
                Direction::Downstream => index.downstream_of(idx),
            };
            for n in neighbours {
                if !visited[n] {
                    visited[n] = true;
                    selected[n] = true;
                    next.push(n);
                }
            }
        }
        frontier = next;
        depth += 1;
    }
}
