// src/config/mod.rs

//! Plan and run metadata files.
//!
//! Responsibilities:
//! - Define the TOML-backed plan model (`model.rs`).
//! - Load plan and run metadata files from disk (`loader.rs`).
//! - Validate the plan: names, references and acyclicity (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_run_metadata};
pub use model::{PlanFile, RawPlanFile, StepConfig};
