// tests/layout_adjust.rs

use std::error::Error;

use dagit_layout::gaant::constants::{BOX_DOT_WIDTH_CUTOFF, BOX_WIDTH};
use dagit_layout::gaant::{
    GaantLayout, LayoutOptions, RunMetadata, adjust_layout_with_run_metadata, build_layout,
};
use dagit_layout::types::{LayoutMode, StepState};
use dagit_layout_test_utils::builders::{GraphBuilder, RunMetadataBuilder};
use dagit_layout_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

const SCALE: f64 = 0.5;
const NOW: i64 = 3000;

fn options(mode: LayoutMode) -> LayoutOptions {
    LayoutOptions {
        mode,
        ..LayoutOptions::default()
    }
}

/// extract -> transform -> report -> publish
fn pipeline(mode: LayoutMode) -> GaantLayout {
    let nodes = GraphBuilder::new()
        .chain(&["extract", "transform", "report", "publish"])
        .build();
    build_layout(&nodes, mode)
}

/// extract ran once, transform failed once and then succeeded, the rest has
/// not started.
fn retried_run() -> RunMetadata {
    RunMetadataBuilder::new()
        .first_log_at(1000)
        .ran("extract", 1000, Some(1500), StepState::Succeeded)
        .attempt("transform", 1600, Some(2000), StepState::Failed)
        .attempt("transform", 2100, Some(2500), StepState::Succeeded)
        .build()
}

fn keys(layout: &GaantLayout) -> Vec<&str> {
    layout.boxes.iter().map(|b| b.key.as_str()).collect()
}

fn children(layout: &GaantLayout, key: &str) -> Vec<String> {
    let idx = layout
        .boxes
        .iter()
        .position(|b| b.key == key)
        .unwrap_or_else(|| panic!("no box {key}"));
    layout.children_of(idx).map(|b| b.key.clone()).collect()
}

fn boxed<'a>(layout: &'a GaantLayout, key: &str) -> &'a dagit_layout::gaant::GaantBox {
    layout
        .boxes
        .iter()
        .find(|b| b.key == key)
        .unwrap_or_else(|| panic!("no box {key}"))
}

#[test]
fn test_retried_step_is_split_per_attempt() -> TestResult {
    init_tracing();

    let layout = pipeline(LayoutMode::WaterfallTimed);
    let adjusted = adjust_layout_with_run_metadata(
        &layout,
        &options(LayoutMode::WaterfallTimed),
        &retried_run(),
        SCALE,
        NOW,
    );

    assert_eq!(
        keys(&adjusted),
        vec!["extract-0", "transform-0", "transform-1", "report", "publish"]
    );
    assert_eq!(children(&adjusted, "extract-0"), vec!["transform-0"]);
    assert_eq!(children(&adjusted, "transform-0"), vec!["transform-1"]);
    assert_eq!(children(&adjusted, "transform-1"), vec!["report"]);
    assert_eq!(children(&adjusted, "report"), vec!["publish"]);

    assert_eq!(boxed(&adjusted, "transform-0").state, Some(StepState::Failed));
    assert_eq!(boxed(&adjusted, "transform-1").state, Some(StepState::Succeeded));
    assert_eq!(boxed(&adjusted, "report").state, None);

    // Attempt boxes keep pointing at the same node and row.
    for key in ["transform-0", "transform-1"] {
        let b = boxed(&adjusted, key);
        assert_eq!(b.node.name, "transform");
        assert_eq!(b.y, layout.box_for("transform").ok_or("transform")?.y);
    }
    Ok(())
}

#[test]
fn test_timed_boxes_follow_the_clock() -> TestResult {
    let layout = pipeline(LayoutMode::WaterfallTimed);
    let adjusted = adjust_layout_with_run_metadata(
        &layout,
        &options(LayoutMode::WaterfallTimed),
        &retried_run(),
        SCALE,
        NOW,
    );

    let placed: Vec<(&str, f64, f64)> = adjusted
        .boxes
        .iter()
        .map(|b| (b.key.as_str(), b.x, b.width))
        .collect();
    assert_eq!(
        placed,
        vec![
            ("extract-0", 5.0, 250.0),
            ("transform-0", 305.0, 200.0),
            ("transform-1", 555.0, 200.0),
            // Not started: right of "now" (x 1005) plus spacing, then chained.
            ("report", 1025.0, BOX_WIDTH),
            ("publish", 1145.0, BOX_WIDTH),
        ]
    );
    Ok(())
}

#[test]
fn test_running_attempt_extends_to_now() -> TestResult {
    let layout = pipeline(LayoutMode::WaterfallTimed);
    let metadata = RunMetadataBuilder::new()
        .first_log_at(1000)
        .ran("extract", 1000, Some(1500), StepState::Succeeded)
        .ran("transform", 2000, None, StepState::Running)
        .build();

    let adjusted = adjust_layout_with_run_metadata(
        &layout,
        &options(LayoutMode::WaterfallTimed),
        &metadata,
        SCALE,
        NOW,
    );

    let running = boxed(&adjusted, "transform-0");
    assert_eq!(running.state, Some(StepState::Running));
    assert_eq!(running.x, 505.0);
    assert_eq!(running.width, 500.0);
    Ok(())
}

#[test]
fn test_short_steps_keep_a_minimum_width() -> TestResult {
    let layout = pipeline(LayoutMode::WaterfallTimed);
    let metadata = RunMetadataBuilder::new()
        .first_log_at(1000)
        .ran("extract", 1000, Some(1002), StepState::Succeeded)
        .build();

    let adjusted = adjust_layout_with_run_metadata(
        &layout,
        &options(LayoutMode::WaterfallTimed),
        &metadata,
        SCALE,
        NOW,
    );
    assert_eq!(boxed(&adjusted, "extract-0").width, BOX_DOT_WIDTH_CUTOFF);
    Ok(())
}

#[test]
fn test_markers_are_drawn_in_timed_mode_only() -> TestResult {
    let layout = pipeline(LayoutMode::WaterfallTimed);
    let metadata = RunMetadataBuilder::new()
        .first_log_at(1000)
        .global_marker("planning", Some(1000), Some(1200))
        .global_marker("never", None, None)
        .step_marker("transform", "fetch", Some(1700), None)
        .step_marker("not-in-graph", "x", Some(1100), Some(1200))
        .build();

    let adjusted = adjust_layout_with_run_metadata(
        &layout,
        &options(LayoutMode::WaterfallTimed),
        &metadata,
        SCALE,
        NOW,
    );

    let markers: Vec<(&str, f64, i64, f64)> = adjusted
        .markers
        .iter()
        .map(|m| (m.key.as_str(), m.x, m.y, m.width))
        .collect();
    let transform_row = layout.box_for("transform").ok_or("transform")?.y;
    assert_eq!(
        markers,
        vec![
            ("global:planning", 5.0, 0, 100.0),
            ("transform:fetch", 355.0, transform_row, 650.0),
        ]
    );

    let waterfall = adjust_layout_with_run_metadata(
        &pipeline(LayoutMode::Waterfall),
        &options(LayoutMode::Waterfall),
        &metadata,
        SCALE,
        NOW,
    );
    assert!(waterfall.markers.is_empty());
    Ok(())
}

#[test]
fn test_hide_waiting_drops_steps_without_state() -> TestResult {
    let layout = pipeline(LayoutMode::WaterfallTimed);
    let metadata = RunMetadataBuilder::new()
        .first_log_at(1000)
        .ran("extract", 1000, Some(1500), StepState::Succeeded)
        .state("transform", StepState::Preparing)
        .build();

    let opts = LayoutOptions {
        mode: LayoutMode::WaterfallTimed,
        hide_waiting: true,
        ..LayoutOptions::default()
    };
    let adjusted = adjust_layout_with_run_metadata(&layout, &opts, &metadata, SCALE, NOW);

    assert_eq!(keys(&adjusted), vec!["extract-0", "transform"]);
    assert_eq!(children(&adjusted, "extract-0"), vec!["transform"]);
    // The edge to the hidden `report` box is gone.
    assert!(children(&adjusted, "transform").is_empty());
    assert_eq!(boxed(&adjusted, "transform").state, Some(StepState::Preparing));
    Ok(())
}

/// Panics if two boxes on one row cover the same x.
fn assert_no_row_overlap(layout: &GaantLayout) {
    for (i, a) in layout.boxes.iter().enumerate() {
        for b in &layout.boxes[i + 1..] {
            if a.y != b.y {
                continue;
            }
            let apart = a.x + a.width <= b.x || b.x + b.width <= a.x;
            assert!(apart, "{} and {} overlap on row {}", a.key, b.key, a.y);
        }
    }
}

#[test]
fn test_waterfall_retries_push_downstream_boxes() -> TestResult {
    let layout = pipeline(LayoutMode::Waterfall);
    let adjusted = adjust_layout_with_run_metadata(
        &layout,
        &options(LayoutMode::Waterfall),
        &retried_run(),
        SCALE,
        NOW,
    );

    let placed: Vec<(&str, f64, i64)> = adjusted
        .boxes
        .iter()
        .map(|b| (b.key.as_str(), b.x, b.y))
        .collect();
    assert_eq!(
        placed,
        vec![
            ("extract-0", 5.0, 0),
            ("transform-0", 125.0, 0),
            ("transform-1", 245.0, 0),
            ("report", 365.0, 0),
            ("publish", 485.0, 0),
        ]
    );
    assert!(adjusted.boxes.iter().all(|b| b.width == BOX_WIDTH));
    assert_no_row_overlap(&adjusted);
    Ok(())
}

#[test]
fn test_waterfall_without_retries_matches_static_layout() -> TestResult {
    // A -> B -> D, A -> C -> D: two rows, no attempts recorded.
    let nodes = GraphBuilder::new()
        .edge("A", "B")
        .edge("A", "C")
        .edge("B", "D")
        .edge("C", "D")
        .build();
    let layout = build_layout(&nodes, LayoutMode::Waterfall);
    let adjusted = adjust_layout_with_run_metadata(
        &layout,
        &options(LayoutMode::Waterfall),
        &RunMetadata::default(),
        SCALE,
        NOW,
    );

    for (before, after) in layout.boxes.iter().zip(&adjusted.boxes) {
        assert_eq!((before.x, before.y), (after.x, after.y), "{}", before.key);
    }
    assert_no_row_overlap(&adjusted);
    Ok(())
}

#[test]
fn test_extreme_timestamps_do_not_overflow() -> TestResult {
    let layout = pipeline(LayoutMode::WaterfallTimed);
    let metadata = RunMetadataBuilder::new()
        .first_log_at(i64::MAX)
        .ran("extract", i64::MIN, Some(i64::MAX), StepState::Succeeded)
        .ran("transform", i64::MAX, None, StepState::Running)
        .step_marker("report", "io", Some(i64::MIN), None)
        .build();

    assert_eq!(
        metadata.step("extract").ok_or("extract")?.duration_ms(),
        Some(i64::MAX)
    );

    let adjusted = adjust_layout_with_run_metadata(
        &layout,
        &options(LayoutMode::WaterfallTimed),
        &metadata,
        SCALE,
        i64::MIN,
    );
    assert_eq!(adjusted.boxes.len(), 4);
    assert!(adjusted.boxes.iter().all(|b| !b.x.is_nan() && !b.width.is_nan()));
    Ok(())
}

#[test]
fn test_flat_offsets_retries_by_narrow_spacing() -> TestResult {
    let layout = pipeline(LayoutMode::Flat);
    let adjusted = adjust_layout_with_run_metadata(
        &layout,
        &options(LayoutMode::Flat),
        &retried_run(),
        SCALE,
        NOW,
    );

    let first = boxed(&adjusted, "transform-0");
    let second = boxed(&adjusted, "transform-1");
    assert!((second.x - first.x - 102.0).abs() < 1e-9);
    assert_eq!(first.y, second.y);
    assert!(adjusted.boxes.iter().all(|b| b.width == BOX_WIDTH));
    Ok(())
}

#[test]
fn test_input_layout_is_untouched() -> TestResult {
    let layout = pipeline(LayoutMode::WaterfallTimed);
    let before = layout.clone();

    let _ = adjust_layout_with_run_metadata(
        &layout,
        &options(LayoutMode::WaterfallTimed),
        &retried_run(),
        SCALE,
        NOW,
    );
    assert_eq!(layout, before);
    Ok(())
}

#[test]
fn test_no_metadata_places_everything_after_now() -> TestResult {
    let layout = pipeline(LayoutMode::WaterfallTimed);
    let adjusted = adjust_layout_with_run_metadata(
        &layout,
        &options(LayoutMode::WaterfallTimed),
        &RunMetadata::default(),
        SCALE,
        NOW,
    );

    // Without a first log line the timeline starts at "now".
    let xs: Vec<f64> = adjusted.boxes.iter().map(|b| b.x).collect();
    assert_eq!(xs, vec![25.0, 145.0, 265.0, 385.0]);
    Ok(())
}
