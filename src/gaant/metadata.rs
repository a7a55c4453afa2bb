// src/gaant/metadata.rs

//! Run metadata as aggregated from the run's event stream.
//!
//! The layout code only reads these values. Timestamps are epoch
//! milliseconds.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::StepState;

/// Pipeline-wide view of a run.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RunMetadata {
    /// Timestamp of the first log line of the run.
    #[serde(default)]
    pub first_log_at: Option<i64>,

    /// Set once the run has finished.
    #[serde(default)]
    pub exited_at: Option<i64>,

    /// Markers not tied to a step (e.g. planning time).
    #[serde(default)]
    pub global_markers: Vec<MarkerSpan>,

    /// Per-step metadata keyed by step name.
    #[serde(default)]
    pub steps: BTreeMap<String, StepMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StepMetadata {
    /// Latest known state; `None` until the step reports anything.
    #[serde(default)]
    pub state: Option<StepState>,
    #[serde(default)]
    pub start: Option<i64>,
    #[serde(default)]
    pub end: Option<i64>,
    /// One entry per execution attempt, oldest first.
    #[serde(default)]
    pub attempts: Vec<StepAttempt>,
    #[serde(default)]
    pub markers: Vec<MarkerSpan>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StepAttempt {
    pub start: i64,
    #[serde(default)]
    pub end: Option<i64>,
    #[serde(default)]
    pub exit_state: Option<StepState>,
}

/// A named time span. Spans without a start are not drawn.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarkerSpan {
    pub key: String,
    #[serde(default)]
    pub start: Option<i64>,
    #[serde(default)]
    pub end: Option<i64>,
}

impl RunMetadata {
    pub fn step(&self, name: &str) -> Option<&StepMetadata> {
        self.steps.get(name)
    }

    /// Recorded state of a step, if it has reported one.
    pub fn state_of(&self, name: &str) -> Option<StepState> {
        self.step(name).and_then(|s| s.state)
    }
}

impl StepMetadata {
    /// `end - start` when both are known, saturating on absurd timestamps.
    pub fn duration_ms(&self) -> Option<i64> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(end.saturating_sub(start)),
            _ => None,
        }
    }
}
