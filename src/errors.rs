// src/errors.rs

//! Errors from reading and validating plan and run metadata files.
//!
//! Filtering and layout never fail; everything here happens before a node
//! list exists.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DagitError {
    #[error("invalid plan: {0}")]
    ConfigError(String),

    #[error("failed to read {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    TomlError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// `step` is one step on the cycle; which one depends on plan order.
    #[error("plan steps form a dependency cycle through '{step}'")]
    DagCycle { step: String },

    #[error("unknown layout mode '{0}' (expected flat, waterfall or waterfall-timed)")]
    InvalidMode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DagitError>;
