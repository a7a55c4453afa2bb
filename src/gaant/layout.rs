// src/gaant/layout.rs

//! Static Gaant layout.
//!
//! Boxes live in one arena (`GaantLayout::boxes`) and refer to their
//! dependents by index. Every box appears after all of its parents in the
//! arena, which lets the passes below run as single sweeps.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::gaant::constants::{
    BOX_SPACING_X, BOX_WIDTH, FLAT_BOX_WIDTH, FLAT_X_COMPRESSION, LEFT_INSET,
};
use crate::graph::{NodeIndex, SharedNode};
use crate::types::{LayoutMode, StepState};

/// Sentinel coordinate of a box that has not been placed yet.
const UNPLACED: f64 = -1.0;

/// One drawn box: a step, or one attempt of a retried step.
#[derive(Debug, Clone, PartialEq)]
pub struct GaantBox {
    pub node: SharedNode,
    /// Node name, or `{name}-{attempt}` once split into attempts.
    pub key: String,
    /// Left edge in px.
    pub x: f64,
    /// Row index.
    pub y: i64,
    pub width: f64,
    /// Arena indices of the boxes this one draws connectors to.
    pub children: Vec<usize>,
    /// True if no upstream dependency is part of the laid-out node set.
    pub root: bool,
    pub state: Option<StepState>,
}

/// Timeline annotation drawn on a box's row.
#[derive(Debug, Clone, PartialEq)]
pub struct GaantMarker {
    pub key: String,
    pub x: f64,
    pub y: i64,
    pub width: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GaantLayout {
    pub boxes: Vec<GaantBox>,
    pub markers: Vec<GaantMarker>,
}

impl GaantLayout {
    /// First box drawn for the named node.
    pub fn box_for(&self, name: &str) -> Option<&GaantBox> {
        self.boxes.iter().find(|b| b.node.name == name)
    }

    pub fn children_of(&self, idx: usize) -> impl Iterator<Item = &GaantBox> {
        self.boxes[idx].children.iter().map(|&c| &self.boxes[c])
    }

    /// Number of rows in use.
    pub fn row_count(&self) -> usize {
        self.boxes
            .iter()
            .map(|b| b.y + 1)
            .max()
            .map_or(0, |rows| rows.max(0) as usize)
    }
}

/// Compute the static layout of `nodes` for `mode`.
///
/// Only edges between nodes of `nodes` are considered; references to other
/// names are skipped. Nodes that are only reachable through a cycle have no
/// root to start from and are left out.
pub fn build_layout(nodes: &[SharedNode], mode: LayoutMode) -> GaantLayout {
    let index = NodeIndex::new(nodes);

    // Step 1 + 2: discover boxes from the roots, then order them so parents
    // come before children.
    let discovery = discover(&index);
    let mut boxes = order_boxes(&index, discovery);

    // Step 3: x from the longest path to each box.
    assign_x(&mut boxes);

    // Step 4: rows.
    match mode {
        LayoutMode::Flat => {
            for (idx, b) in boxes.iter_mut().enumerate() {
                b.y = idx as i64;
                b.width = FLAT_BOX_WIDTH;
                b.x = LEFT_INSET + b.x * FLAT_X_COMPRESSION;
            }
        }
        LayoutMode::Waterfall | LayoutMode::WaterfallTimed => {
            assign_waterfall_rows(&mut boxes);
        }
    }

    let layout = GaantLayout {
        boxes,
        markers: Vec::new(),
    };

    debug!(
        nodes = nodes.len(),
        boxes = layout.boxes.len(),
        rows = layout.row_count(),
        %mode,
        "built static gaant layout"
    );

    layout
}

/// Boxes in discovery order, as node indices, with children as discovery
/// indices.
struct Discovery {
    nodes: Vec<usize>,
    children: Vec<Vec<usize>>,
    roots: usize,
}

fn discover(index: &NodeIndex<'_>) -> Discovery {
    let mut slot: Vec<Option<usize>> = vec![None; index.len()];
    let mut found = Discovery {
        nodes: Vec::new(),
        children: Vec::new(),
        roots: 0,
    };

    for idx in 0..index.len() {
        let node = index.node(idx);
        // Skip repeated names; the index resolves them to the first entry.
        if index.get(&node.name) != Some(idx) {
            continue;
        }
        if index.upstream_of(idx).is_empty() {
            slot[idx] = Some(found.nodes.len());
            found.nodes.push(idx);
            found.children.push(Vec::new());
        }
    }
    found.roots = found.nodes.len();

    // All immediate children of a box are added before descending into the
    // first of them.
    let mut stack: Vec<usize> = (0..found.roots).rev().collect();
    while let Some(current) = stack.pop() {
        let mut seen = HashSet::new();
        let mut added = Vec::new();

        for dep in index.downstream_of(found.nodes[current]) {
            if !seen.insert(dep) {
                continue;
            }
            let dep_slot = match slot[dep] {
                Some(existing) => existing,
                None => {
                    let new_slot = found.nodes.len();
                    slot[dep] = Some(new_slot);
                    found.nodes.push(dep);
                    found.children.push(Vec::new());
                    added.push(new_slot);
                    new_slot
                }
            };
            found.children[current].push(dep_slot);
        }

        stack.extend(added.into_iter().rev());
    }

    found
}

/// Topologically order the discovered boxes (Kahn), preferring earlier
/// discovery among ready boxes.
fn order_boxes(index: &NodeIndex<'_>, discovery: Discovery) -> Vec<GaantBox> {
    let count = discovery.nodes.len();
    let mut indegree = vec![0usize; count];
    for child in discovery.children.iter().flatten() {
        indegree[*child] += 1;
    }

    let mut ready: BinaryHeap<Reverse<usize>> = (0..count)
        .filter(|&d| indegree[d] == 0)
        .map(Reverse)
        .collect();
    let mut order = Vec::with_capacity(count);
    let mut placed = vec![false; count];

    while let Some(Reverse(d)) = ready.pop() {
        order.push(d);
        placed[d] = true;
        for &child in &discovery.children[d] {
            indegree[child] -= 1;
            if indegree[child] == 0 {
                ready.push(Reverse(child));
            }
        }
    }

    if order.len() < count {
        let stranded: Vec<&str> = (0..count)
            .filter(|&d| !placed[d])
            .map(|d| index.node(discovery.nodes[d]).name.as_str())
            .collect();
        warn!(?stranded, "cycle in graph; appending boxes in discovery order");
        order.extend((0..count).filter(|&d| !placed[d]));
    }

    let mut position = vec![0usize; count];
    for (pos, &d) in order.iter().enumerate() {
        position[d] = pos;
    }

    order
        .iter()
        .map(|&d| {
            let node = index.node(discovery.nodes[d]);
            GaantBox {
                node: Arc::clone(node),
                key: node.name.clone(),
                x: UNPLACED,
                y: -1,
                width: BOX_WIDTH,
                children: discovery.children[d].iter().map(|&c| position[c]).collect(),
                root: d < discovery.roots,
                state: None,
            }
        })
        .collect()
}

/// Push every box right of all its parents. Parents precede children in the
/// arena, so one sweep settles each box before its children read it.
fn assign_x(boxes: &mut [GaantBox]) {
    for idx in 0..boxes.len() {
        if boxes[idx].root {
            boxes[idx].x = boxes[idx].x.max(LEFT_INSET);
        } else if boxes[idx].x == UNPLACED {
            // Only reachable for boxes appended after a cycle.
            boxes[idx].x = LEFT_INSET;
        }

        let child_x = boxes[idx].x + boxes[idx].width + BOX_SPACING_X;
        for c in boxes[idx].children.clone() {
            if boxes[c].x < child_x {
                boxes[c].x = child_x;
            }
        }
    }
}

/// One row per box, then collapse boxes onto their parents' rows while that
/// creates no overlap or crossing, then close empty rows.
fn assign_waterfall_rows(boxes: &mut [GaantBox]) {
    let count = boxes.len();
    let mut parents: Vec<Vec<usize>> = vec![Vec::new(); count];
    for (idx, b) in boxes.iter().enumerate() {
        for &c in &b.children {
            parents[c].push(idx);
        }
    }

    let mut rows: Vec<Vec<usize>> = (0..count).map(|idx| vec![idx]).collect();
    for (idx, b) in boxes.iter_mut().enumerate() {
        b.y = idx as i64;
    }

    // Start at the bottom and move one box per pass until nothing moves.
    // Each move lowers a row index, so this terminates.
    let mut moves = 0usize;
    while let Some((idx, target)) = find_collapse(boxes, &parents, &rows) {
        let from = boxes[idx].y as usize;
        rows[from].retain(|&b| b != idx);
        rows[target].push(idx);
        boxes[idx].y = target as i64;
        moves += 1;
    }

    // Close the gaps left behind.
    let mut remap = vec![0i64; count];
    let mut next = 0i64;
    for (y, row) in rows.iter().enumerate() {
        if !row.is_empty() {
            remap[y] = next;
            next += 1;
        }
    }
    for b in boxes.iter_mut() {
        b.y = remap[b.y as usize];
    }

    debug!(moves, rows = next, "collapsed waterfall rows");
}

fn find_collapse(
    boxes: &[GaantBox],
    parents: &[Vec<usize>],
    rows: &[Vec<usize>],
) -> Option<(usize, usize)> {
    for idx in (1..boxes.len()).rev() {
        let current = &boxes[idx];

        let Some(parent) = highest_parent(boxes, &parents[idx]) else {
            continue;
        };
        let parent = &boxes[parent];
        if parent.y >= current.y {
            continue;
        }

        let on_target = &rows[parent.y as usize];

        let taken = on_target.iter().any(|&r| boxes[r].x == current.x);
        if taken {
            continue;
        }

        // Would sit on top of an existing A ---> B arrow on that row.
        let will_cross = on_target
            .iter()
            .any(|&r| boxes[r].x > parent.x && boxes[r].x < current.x);

        // Would sit in front of a box whose arrow leaves that row further right.
        let will_cause_crossing = on_target.iter().any(|&r| {
            boxes[r].x < current.x
                && boxes[r]
                    .children
                    .iter()
                    .any(|&c| boxes[c].y >= parent.y && boxes[c].x > current.x)
        });

        if will_cross || will_cause_crossing {
            continue;
        }

        return Some((idx, parent.y as usize));
    }
    None
}

/// Parent on the lowest row (highest `y`); the first one listed wins ties.
fn highest_parent(boxes: &[GaantBox], parents: &[usize]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for &p in parents {
        match best {
            Some(b) if boxes[b].y >= boxes[p].y => {}
            _ => best = Some(p),
        }
    }
    best
}

/// Memoised [`build_layout`], keyed by the identity of the node list and the
/// mode.
///
/// Node contents are never compared: hand the cache a new `Arc` whenever the
/// node list changes.
#[derive(Debug, Default)]
pub struct LayoutCache {
    entry: Option<(Arc<[SharedNode]>, LayoutMode, GaantLayout)>,
    builds: usize,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(&mut self, nodes: &Arc<[SharedNode]>, mode: LayoutMode) -> &GaantLayout {
        let fresh = matches!(
            &self.entry,
            Some((cached, cached_mode, _)) if Arc::ptr_eq(cached, nodes) && *cached_mode == mode
        );
        if !fresh {
            self.entry = None;
            self.builds += 1;
        }

        let (_, _, layout) = self
            .entry
            .get_or_insert_with(|| (Arc::clone(nodes), mode, build_layout(nodes, mode)));
        layout
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// How many times a layout has been computed.
    pub fn builds(&self) -> usize {
        self.builds
    }
}
