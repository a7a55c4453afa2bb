// src/gaant/adjust.rs

//! Runtime adjustment of a static layout.
//!
//! The static layout fixes rows and ordering; this pass only moves and
//! resizes boxes on their rows, splits retried steps into one box per
//! attempt and adds timeline markers. It runs on every metadata update, so
//! it never re-derives rows.

use tracing::debug;

use crate::gaant::constants::{
    BOX_DOT_WIDTH_CUTOFF, BOX_SPACING_X, BOX_WIDTH, FLAT_RETRY_SPACING_X, LEFT_INSET,
};
use crate::gaant::layout::{GaantBox, GaantLayout, GaantMarker};
use crate::gaant::metadata::{RunMetadata, StepAttempt};
use crate::types::{LayoutMode, StepState};

/// Display options chosen in the chart toolbar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub mode: LayoutMode,
    /// Zoom slider position, 0..=100.
    pub zoom: f64,
    /// Timed mode only: drop steps that have not reported any state.
    pub hide_waiting: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            mode: LayoutMode::default(),
            zoom: 1.0,
            hide_waiting: false,
        }
    }
}

/// Where a box ends up. `x == None` leaves the box for the untimed pass.
struct Placement {
    x: Option<f64>,
    width: f64,
}

/// Produce the display layout for the current run state.
///
/// `scale` is px per ms and `now_ms` stands in for the end of anything still
/// running. The input layout is not modified.
pub fn adjust_layout_with_run_metadata(
    layout: &GaantLayout,
    options: &LayoutOptions,
    metadata: &RunMetadata,
    scale: f64,
    now_ms: i64,
) -> GaantLayout {
    let mut markers: Vec<GaantMarker> = Vec::new();

    let boxes = match options.mode {
        LayoutMode::WaterfallTimed => {
            let first_log_at = metadata.first_log_at.unwrap_or(now_ms);
            let x_for_ms = |ms: i64| LEFT_INSET + ms.saturating_sub(first_log_at) as f64 * scale;
            let width_for_ms = |start: i64, end: Option<i64>| {
                (end.unwrap_or(now_ms).saturating_sub(start) as f64 * scale)
                    .max(BOX_DOT_WIDTH_CUTOFF)
            };

            let (mut boxes, unplaced) =
                split_and_position(&layout.boxes, metadata, |_, attempt| match attempt {
                    Some((run, _)) => Placement {
                        x: Some(x_for_ms(run.start)),
                        width: width_for_ms(run.start, run.end),
                    },
                    None => Placement {
                        x: None,
                        width: BOX_WIDTH,
                    },
                });

            position_untimed_boxes(&mut boxes, &unplaced, x_for_ms(now_ms) + BOX_SPACING_X);

            for m in &metadata.global_markers {
                let Some(start) = m.start else { continue };
                markers.push(GaantMarker {
                    key: format!("global:{}", m.key),
                    x: x_for_ms(start),
                    y: 0,
                    width: width_for_ms(start, m.end),
                });
            }

            for (name, step) in &metadata.steps {
                let Some(step_box) = layout.box_for(name) else {
                    continue;
                };
                for m in &step.markers {
                    let Some(start) = m.start else { continue };
                    markers.push(GaantMarker {
                        key: format!("{name}:{}", m.key),
                        x: x_for_ms(start),
                        y: step_box.y,
                        width: width_for_ms(start, m.end),
                    });
                }
            }

            if options.hide_waiting {
                boxes = retain_boxes(boxes, |b| metadata.state_of(&b.node.name).is_some());
            }
            boxes
        }
        LayoutMode::Waterfall => {
            // Attempts keep their column; everything else is re-flowed so it
            // stays right of the last attempt of its parents.
            let (mut boxes, unplaced) =
                split_and_position(&layout.boxes, metadata, |b, attempt| Placement {
                    x: attempt.map(|(_, idx)| b.x + retry_offset(idx, BOX_SPACING_X)),
                    width: BOX_WIDTH,
                });
            position_untimed_boxes(&mut boxes, &unplaced, LEFT_INSET);
            boxes
        }
        LayoutMode::Flat => {
            let (boxes, _) = split_and_position(&layout.boxes, metadata, |b, attempt| {
                let offset = attempt.map_or(0.0, |(_, idx)| retry_offset(idx, FLAT_RETRY_SPACING_X));
                Placement {
                    x: Some(b.x + offset),
                    width: BOX_WIDTH,
                }
            });
            boxes
        }
    };

    debug!(
        mode = %options.mode,
        boxes = boxes.len(),
        markers = markers.len(),
        scale,
        "adjusted layout with run metadata"
    );

    GaantLayout { boxes, markers }
}

/// Horizontal shift of retry attempt `idx`.
fn retry_offset(idx: usize, spacing: f64) -> f64 {
    (spacing + BOX_WIDTH) * idx as f64
}

/// Copy the boxes into a new arena, placing each one and splitting steps
/// with recorded attempts into one box per attempt.
///
/// Attempt boxes are chained (`children` of attempt N is attempt N + 1) and
/// the last attempt keeps the step's own children. Edges into a split step
/// land on its first attempt.
///
/// Returns the new arena and, per box, whether it still needs an x.
fn split_and_position<F>(
    boxes: &[GaantBox],
    metadata: &RunMetadata,
    position_for: F,
) -> (Vec<GaantBox>, Vec<bool>)
where
    F: Fn(&GaantBox, Option<(&StepAttempt, usize)>) -> Placement,
{
    let mut out: Vec<GaantBox> = Vec::with_capacity(boxes.len());
    let mut unplaced: Vec<bool> = Vec::with_capacity(boxes.len());
    // Old arena index -> (first, last) index in `out`.
    let mut span: Vec<(usize, usize)> = Vec::with_capacity(boxes.len());

    let mut push = |mut b: GaantBox, placement: Placement, out: &mut Vec<GaantBox>| {
        unplaced.push(placement.x.is_none());
        b.x = placement.x.unwrap_or(b.x);
        b.width = placement.width;
        out.push(b);
    };

    for b in boxes {
        let first = out.len();
        match metadata.step(&b.node.name) {
            None => {
                let placement = position_for(b, None);
                push(b.clone(), placement, &mut out);
            }
            Some(step) if step.attempts.is_empty() => {
                let placement = position_for(b, None);
                let mut next = b.clone();
                next.state = step.state;
                push(next, placement, &mut out);
            }
            Some(step) => {
                for (idx, run) in step.attempts.iter().enumerate() {
                    let placement = position_for(b, Some((run, idx)));
                    let mut next = b.clone();
                    next.key = format!("{}-{}", b.key, idx);
                    next.state = Some(run.exit_state.unwrap_or(StepState::Running));
                    push(next, placement, &mut out);
                }
            }
        }
        span.push((first, out.len() - 1));
    }

    for (old, b) in boxes.iter().enumerate() {
        let (first, last) = span[old];
        for k in first..last {
            out[k].children = vec![k + 1];
        }
        out[last].children = b.children.iter().map(|&c| span[c].0).collect();
    }

    (out, unplaced)
}

/// Place boxes that have no x yet downstream of all their parents and no
/// earlier than `earliest_x`, pushing their children along.
fn position_untimed_boxes(boxes: &mut [GaantBox], unplaced: &[bool], earliest_x: f64) {
    let mut min_x: Vec<Option<f64>> = boxes
        .iter()
        .map(|b| b.root.then_some(LEFT_INSET))
        .collect();

    for idx in 0..boxes.len() {
        if unplaced[idx] {
            let parent_x = min_x[idx].unwrap_or(LEFT_INSET);
            boxes[idx].x = parent_x.max(earliest_x);
        }

        let child_x = boxes[idx].x + boxes[idx].width + BOX_SPACING_X;
        for &c in &boxes[idx].children {
            min_x[c] = Some(min_x[c].map_or(child_x, |x| x.max(child_x)));
        }
    }
}

/// Keep the boxes matching `keep`, re-indexing children and dropping edges
/// to removed boxes.
fn retain_boxes<F>(boxes: Vec<GaantBox>, keep: F) -> Vec<GaantBox>
where
    F: Fn(&GaantBox) -> bool,
{
    let mut remap: Vec<Option<usize>> = Vec::with_capacity(boxes.len());
    let mut next = 0;
    for b in &boxes {
        if keep(b) {
            remap.push(Some(next));
            next += 1;
        } else {
            remap.push(None);
        }
    }

    boxes
        .into_iter()
        .zip(remap.iter())
        .filter(|(_, slot)| slot.is_some())
        .map(|(mut b, _)| {
            b.children = b.children.iter().filter_map(|&c| remap[c]).collect();
            b
        })
        .collect()
}
