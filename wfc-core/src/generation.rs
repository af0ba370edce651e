use crate::grid::Grid;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Why a run stopped before every cell was collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IncompleteReason {
    /// No uncollapsed cell had a candidate left; the rest are contradicted.
    Stalled,
    /// The iteration cap was reached.
    IterationLimit,
}

/// Terminal status of a run that passed validation.
///
/// Rule-validation failures never get this far; they are returned as
/// [`crate::WfcError::InvalidRules`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GenerationStatus {
    Success,
    Incomplete(IncompleteReason),
}

impl GenerationStatus {
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Incomplete(IncompleteReason::Stalled) => f.write_str("incomplete (stalled)"),
            Self::Incomplete(IncompleteReason::IterationLimit) => {
                f.write_str("incomplete (iteration limit)")
            }
        }
    }
}

/// Per-cell view handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellReport {
    pub x: usize,
    pub y: usize,
    pub collapsed: bool,
    /// Catalog index of the chosen tile, set iff `collapsed`.
    pub tile: Option<usize>,
    pub contradicted: bool,
}

/// Serializable summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerationReport {
    pub status: GenerationStatus,
    pub width: usize,
    pub height: usize,
    pub iterations: u64,
    pub seed: Option<u64>,
    pub cells: Vec<CellReport>,
}

/// Outcome of a generation run: the final grid plus how the run ended.
#[derive(Debug, Clone)]
pub struct Generation {
    pub status: GenerationStatus,
    pub grid: Grid,
    /// Number of select-collapse-propagate iterations performed.
    pub iterations: u64,
    /// Seed the random source was created from, when known.
    pub seed: Option<u64>,
    pub elapsed: Duration,
}

impl Generation {
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellReport> + '_ {
        self.grid.cells().iter().enumerate().map(|(index, cell)| {
            let (x, y) = self.grid.index_to_coord(index);
            CellReport {
                x,
                y,
                collapsed: cell.is_collapsed(),
                tile: cell.final_state().map(|tile| tile.0),
                contradicted: cell.is_contradicted(),
            }
        })
    }

    pub fn tile_indices(&self) -> Vec<Option<usize>> {
        self.grid
            .cells()
            .iter()
            .map(|cell| cell.final_state().map(|tile| tile.0))
            .collect()
    }

    pub fn contradictions(&self) -> Vec<usize> {
        self.grid.contradictions().collect()
    }

    pub fn report(&self) -> GenerationReport {
        GenerationReport {
            status: self.status,
            width: self.grid.width(),
            height: self.grid.height(),
            iterations: self.iterations,
            seed: self.seed,
            cells: self.cells().collect(),
        }
    }
}
