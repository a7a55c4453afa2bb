// src/gaant/mod.rs

//! Gaant (execution timeline) layout.
//!
//! - [`layout`] computes the static row/column placement of a node graph
//!   and caches it per node list and mode.
//! - [`adjust`] re-positions a static layout from streaming run metadata
//!   (timings, retries, markers) without redoing the row assignment.
//! - [`presets`] derives "interesting" query presets from a run.
//! - [`scale`] converts zoom levels to px-per-ms and sizes a layout.
//! - [`highlight`] is the hovered-time channel shared by chart and log views.
//! - [`metadata`] holds the run metadata shape read by all of the above.

pub mod adjust;
pub mod constants;
pub mod highlight;
pub mod layout;
pub mod metadata;
pub mod presets;
pub mod scale;

pub use adjust::{LayoutOptions, adjust_layout_with_run_metadata};
pub use highlight::{HighlightReceiver, HighlightSender, highlight_channel};
pub use layout::{GaantBox, GaantLayout, GaantMarker, LayoutCache, build_layout};
pub use metadata::{MarkerSpan, RunMetadata, StepAttempt, StepMetadata};
pub use presets::{QueryPreset, interesting_queries_for};
pub use scale::{LayoutSize, effective_now_ms, layout_size, render_interval_ms, scale_for_zoom};
