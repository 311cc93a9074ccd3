//! Errors.

use std::io;

use thiserror::Error;

use aspl_core::{GraphError, SearchError};

/// Error type for simulation setup and runs.
#[derive(Error, Debug)]
pub enum SimError {
    /// Failed to read the config file.
    #[error("File error: {0}")]
    ConfigFileRead(#[source] io::Error),

    /// Config file is not valid JSON or has fields of the wrong type.
    #[error("JSON parse error: {0}")]
    BadConfigFile(#[source] serde_json::Error),

    #[error("Graph must have at least 2 nodes, got {0}")]
    TooFewNodes(usize),

    #[error("Density must be within [0, 1], got {0}")]
    InvalidDensity(f64),

    #[error("Bad edge weight range [{0}, {1}], weights must be finite and 0 <= min <= max")]
    InvalidWeightRange(f64, f64),

    #[error("Number of trials must be positive")]
    NoTrials,

    #[error("No densities to simulate")]
    NoDensities,

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Path search error: {0}")]
    Search(#[from] SearchError),
}
