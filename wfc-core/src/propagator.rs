//! Constraint propagation logic and traits.

use crate::grid::Grid;
use std::fmt::Debug;
use thiserror::Error;
use wfc_rules::AdjacencyRules;

pub mod breadth_first;

pub use breadth_first::BreadthFirstPropagator;

/// Errors that can occur during the constraint propagation phase.
///
/// Contradictions are not errors: they are recorded on the grid and reported
/// through [`PropagationStats::contradictions`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PropagationError {
    #[error("Propagation origin {index} is out of bounds for a grid of {len} cells")]
    OriginOutOfBounds { index: usize, len: usize },
    #[error("Adjacency rules cover {rules} tiles but the grid tracks {grid}")]
    TileCountMismatch { rules: usize, grid: usize },
}

/// What a single propagation pass did to the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationStats {
    /// Cells dequeued and used as a source of constraints.
    pub visited: usize,
    /// Neighbour updates that removed at least one candidate.
    pub narrowed: usize,
    /// Neighbours left with exactly one candidate, and therefore collapsed.
    pub forced_collapses: usize,
    /// Cells that became contradicted during this pass, in discovery order.
    pub contradictions: Vec<usize>,
}

/// Trait defining the interface for a constraint propagation algorithm.
///
/// Implementors narrow the neighbours of a freshly collapsed cell, and
/// transitively their neighbours, until no further candidate can be removed.
pub trait ConstraintPropagator: Send + Sync + Debug {
    /// Propagates constraints outward from `origin`.
    ///
    /// Candidate sets only shrink. Collapsed cells are never modified.
    fn propagate(
        &mut self,
        grid: &mut Grid,
        origin: usize,
        rules: &AdjacencyRules,
    ) -> Result<PropagationStats, PropagationError>;
}
