// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use serde::de::DeserializeOwned;

use crate::config::model::{PlanFile, RawPlanFile};
use crate::errors::{DagitError, Result};
use crate::gaant::RunMetadata;

/// Read and deserialize one TOML file, keeping the path on errors.
fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|source| DagitError::IoError {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&contents).map_err(|source| DagitError::TomlError {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a plan file and return the raw `RawPlanFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] for
/// the semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawPlanFile> {
    let path = path.as_ref();
    let plan: RawPlanFile = read_toml(path)?;
    debug!(path = %path.display(), steps = plan.step.len(), "loaded plan file");

    Ok(plan)
}

/// Load a plan file and validate it:
///
/// - at least one step, unique names,
/// - no unknown or self references in `after`,
/// - no cycles.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<PlanFile> {
    let raw = load_from_path(&path)?;
    let plan = PlanFile::try_from(raw)?;
    Ok(plan)
}

/// Load run metadata (step timings, attempts, markers) from TOML.
///
/// Step names are not checked against a plan: metadata for steps outside the
/// displayed graph is simply never looked up.
pub fn load_run_metadata(path: impl AsRef<Path>) -> Result<RunMetadata> {
    let path = path.as_ref();
    let metadata: RunMetadata = read_toml(path)?;
    debug!(
        path = %path.display(),
        steps = metadata.steps.len(),
        "loaded run metadata"
    );

    Ok(metadata)
}
