//! Edge-matching Wave Function Collapse engine.
//!
//! A [`Grid`] of cells starts in full superposition over a tile catalog. The
//! [`WfcEngine`] repeatedly collapses the most constrained cell and propagates
//! the consequences breadth-first until the grid is solved or stuck.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use wfc_rules::ValidationReport;

/// Entropy calculation logic and traits.
pub mod entropy;
/// Result types handed back to the caller.
pub mod generation;
/// Cells and the flattened 2D grid.
pub mod grid;
/// Constraint propagation logic and traits.
pub mod propagator;
/// The engine state machine and entry points.
pub mod runner;

pub use crate::entropy::{EntropyCalculator, MinimumRemainingValues};
pub use crate::generation::{
    CellReport, Generation, GenerationReport, GenerationStatus, IncompleteReason,
};
pub use crate::grid::{Cell, CellState, Grid, GridError, Narrowing};
pub use crate::propagator::{
    BreadthFirstPropagator, ConstraintPropagator, PropagationError, PropagationStats,
};
pub use crate::runner::{
    collapse_cell, generate, generate_with_rng, ProgressCallback, StepOutcome, WfcConfig,
    WfcConfigBuilder, WfcEngine,
};

/// Errors that abort a generation run.
///
/// Contradictions and stalls are not among them: they end the run with a
/// [`GenerationStatus::Incomplete`] status instead.
#[derive(Error, Debug)]
pub enum WfcError {
    /// The compatibility table failed validation against the catalog.
    #[error("Invalid rules: {0}")]
    InvalidRules(ValidationReport),
    #[error("Invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
    #[error("Propagation error: {0}")]
    Propagation(#[from] PropagationError),
}

/// Information about the current state of a run, passed to the progress
/// callback after every iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProgressInfo {
    pub collapsed_cells: usize,
    pub contradicted_cells: usize,
    pub total_cells: usize,
    pub iterations: u64,
    pub elapsed_time: Duration,
}
