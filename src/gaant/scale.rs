// src/gaant/scale.rs

//! Zoom, clock and size helpers for the timed chart.

use crate::gaant::constants::{BOX_HEIGHT, BOX_SPACING_X, CSS_DURATION_MS, MAX_SCALE, MIN_SCALE};
use crate::gaant::layout::GaantLayout;
use crate::gaant::metadata::RunMetadata;

/// Horizontal room reserved next to the chart when zooming to fit.
const ZOOM_TO_FIT_MARGIN_PX: f64 = 150.0;

/// Convert the zoom slider (0..=100) into px per ms.
///
/// Zoom 0 fits the elapsed run time into the viewport when both are known,
/// zoom 100 is [`MAX_SCALE`]. The slider is logarithmic in between.
pub fn scale_for_zoom(
    zoom: f64,
    viewport_width: Option<f64>,
    metadata: &RunMetadata,
    now_ms: i64,
) -> f64 {
    let mut min_scale = MIN_SCALE;
    if let (Some(width), Some(first_log_at)) = (viewport_width, metadata.first_log_at) {
        if width > 0.0 {
            let fit_px = (width - ZOOM_TO_FIT_MARGIN_PX).max(1.0);
            let elapsed_ms = (now_ms.saturating_sub(first_log_at) as f64).max(1.0);
            min_scale = fit_px / elapsed_ms;
        }
    }

    let zoom = zoom.clamp(0.0, 100.0);
    (min_scale.ln() + (MAX_SCALE.ln() - min_scale.ln()) / 100.0 * zoom).exp()
}

/// How often a live chart should advance its clock: the time for a 2px
/// shift, but no faster than the CSS transition. `None` for a zero scale.
pub fn render_interval_ms(scale: f64) -> Option<f64> {
    if scale <= 0.0 {
        return None;
    }
    Some(CSS_DURATION_MS.max(2.0 / scale))
}

/// The "now" to lay out against: frozen at exit once the run is over.
pub fn effective_now_ms(metadata: &RunMetadata, wall_ms: i64) -> i64 {
    metadata.exited_at.unwrap_or(wall_ms)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSize {
    pub width: f64,
    pub height: f64,
}

/// Pixel extent of a layout.
pub fn layout_size(layout: &GaantLayout) -> LayoutSize {
    let width = layout
        .boxes
        .iter()
        .map(|b| b.x + b.width + BOX_SPACING_X)
        .fold(0.0, f64::max);
    let height = layout
        .boxes
        .iter()
        .map(|b| b.y as f64 * BOX_HEIGHT + BOX_HEIGHT)
        .fold(0.0, f64::max);
    LayoutSize { width, height }
}
