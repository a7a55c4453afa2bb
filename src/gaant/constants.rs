// src/gaant/constants.rs

//! Pixel geometry of the chart.

/// Left padding of the first column.
pub const LEFT_INSET: f64 = 5.0;
pub const BOX_WIDTH: f64 = 100.0;
/// Box width in flat mode, where every step has its own row.
pub const FLAT_BOX_WIDTH: f64 = 400.0;
/// Flat mode keeps a hint of the waterfall by scaling x down.
pub const FLAT_X_COMPRESSION: f64 = 0.1;
/// Horizontal gap between a box and its dependents.
pub const BOX_SPACING_X: f64 = 20.0;
/// Gap between retry attempts in flat mode.
pub const FLAT_RETRY_SPACING_X: f64 = 2.0;

pub const BOX_HEIGHT: f64 = 30.0;
pub const BOX_MARGIN_Y: f64 = 5.0;

/// Timed boxes never shrink below this; renderers draw them as dots.
pub const BOX_DOT_WIDTH_CUTOFF: f64 = 8.0;
pub const BOX_SHOW_LABEL_WIDTH_CUTOFF: f64 = 30.0;
pub const BOX_DOT_SIZE: f64 = 6.0;

/// px per ms at zoom 0 when nothing better is known.
pub const MIN_SCALE: f64 = 0.0002;
/// px per ms at zoom 100.
pub const MAX_SCALE: f64 = 0.5;
/// Lower bound on the redraw interval while a run is live.
pub const CSS_DURATION_MS: f64 = 100.0;
