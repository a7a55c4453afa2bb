// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::errors::DagitError;

/// How the Gaant chart arranges boxes.
///
/// - `Flat`: one step per row, fixed wide boxes.
/// - `Waterfall`: rows collapsed so simple chains share a line.
/// - `WaterfallTimed`: waterfall rows, but x/width follow wall-clock time
///   from the run metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    Flat,
    #[default]
    Waterfall,
    WaterfallTimed,
}

impl FromStr for LayoutMode {
    type Err = DagitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "flat" => Ok(LayoutMode::Flat),
            "waterfall" => Ok(LayoutMode::Waterfall),
            "waterfall-timed" => Ok(LayoutMode::WaterfallTimed),
            _ => Err(DagitError::InvalidMode(s.trim().to_string())),
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LayoutMode::Flat => "flat",
            LayoutMode::Waterfall => "waterfall",
            LayoutMode::WaterfallTimed => "waterfall-timed",
        };
        f.write_str(s)
    }
}

/// Execution status of a step as reported by the run's event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepState {
    Preparing,
    Running,
    Succeeded,
    Failed,
    Skipped,
    RetryRequested,
}

impl fmt::Display for StepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepState::Preparing => "PREPARING",
            StepState::Running => "RUNNING",
            StepState::Succeeded => "SUCCEEDED",
            StepState::Failed => "FAILED",
            StepState::Skipped => "SKIPPED",
            StepState::RetryRequested => "RETRY_REQUESTED",
        };
        f.write_str(s)
    }
}
