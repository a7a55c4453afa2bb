// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod gaant;
pub mod graph;
pub mod logging;
pub mod query;
pub mod types;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{PlanFile, load_and_validate, load_run_metadata};
use crate::gaant::{
    GaantLayout, LayoutCache, LayoutOptions, RunMetadata, adjust_layout_with_run_metadata,
    effective_now_ms, interesting_queries_for, layout_size, scale_for_zoom,
};
use crate::graph::SharedNode;
use crate::query::{SUGGESTION_LIMIT, filter_by_query, suggestions_for_input};
use crate::types::LayoutMode;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - plan and run metadata loading
/// - query filtering
/// - static layout + runtime adjustment
/// - text output of boxes, markers and presets
pub fn run(args: CliArgs) -> Result<()> {
    let plan = load_and_validate(&args.plan)
        .with_context(|| format!("failed to load plan {}", args.plan))?;

    if args.dry_run {
        print_dry_run(&plan);
        return Ok(());
    }

    let nodes: Vec<SharedNode> = plan.nodes();

    if let Some(partial) = &args.suggest {
        for name in suggestions_for_input(nodes.iter().map(|n| &n.name), partial, SUGGESTION_LIMIT) {
            println!("{name}");
        }
        return Ok(());
    }

    let metadata = match &args.metadata {
        Some(path) => load_run_metadata(path)
            .with_context(|| format!("failed to load run metadata {path}"))?,
        None => RunMetadata::default(),
    };

    let filtered = filter_by_query(&nodes, &args.query);
    info!(
        query = %args.query,
        shown = filtered.all.len(),
        total = nodes.len(),
        "applied graph query"
    );

    let mode: LayoutMode = args.mode.into();
    let options = LayoutOptions {
        mode,
        zoom: args.zoom,
        hide_waiting: args.hide_waiting,
    };

    let now_ms = args
        .now_ms
        .unwrap_or_else(|| effective_now_ms(&metadata, wall_clock_ms()));
    let scale = scale_for_zoom(options.zoom, args.viewport_width, &metadata, now_ms);

    let shown: Arc<[SharedNode]> = filtered.all.into();
    let mut cache = LayoutCache::new();
    let layout = cache.get_or_build(&shown, mode);
    let adjusted = adjust_layout_with_run_metadata(layout, &options, &metadata, scale, now_ms);

    let focus: HashSet<&str> = filtered.focus.iter().map(|n| n.name.as_str()).collect();
    print_layout(&adjusted, &focus);

    if args.presets {
        print_presets(&metadata, &adjusted);
    }

    Ok(())
}

fn wall_clock_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Simple dry-run output: print steps and their upstream steps.
fn print_dry_run(plan: &PlanFile) {
    println!("dagit-layout dry-run");
    println!();

    println!("steps ({}):", plan.steps().len());
    for step in plan.steps() {
        println!("  - {}", step.name);
        if !step.after.is_empty() {
            println!("      after: {:?}", step.after);
        }
    }

    debug!("dry-run complete (no layout)");
}

/// One line per box: key, row, x, width, state and children. Focused
/// steps are starred.
fn print_layout(layout: &GaantLayout, focus: &HashSet<&str>) {
    let size = layout_size(layout);
    println!(
        "layout: {} boxes, {} rows, {:.0}x{:.0}px",
        layout.boxes.len(),
        layout.row_count(),
        size.width,
        size.height
    );

    for b in &layout.boxes {
        let star = if focus.contains(b.node.name.as_str()) { "*" } else { " " };
        let state = b.state.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string());
        let children: Vec<&str> = b
            .children
            .iter()
            .map(|&c| layout.boxes[c].key.as_str())
            .collect();
        println!(
            "{star} {:<32} row {:>3}  x {:>9.1}  w {:>8.1}  {:<15} -> {}",
            b.key,
            b.y,
            b.x,
            b.width,
            state,
            children.join(", ")
        );
    }

    if !layout.markers.is_empty() {
        println!();
        println!("markers:");
        for m in &layout.markers {
            println!(
                "  {:<32} row {:>3}  x {:>9.1}  w {:>8.1}",
                m.key, m.y, m.x, m.width
            );
        }
    }
}

fn print_presets(metadata: &RunMetadata, layout: &GaantLayout) {
    let Some(presets) = interesting_queries_for(metadata, layout) else {
        return;
    };
    println!();
    println!("presets:");
    for preset in presets {
        println!("  {}: {}", preset.name, preset.value);
    }
}
