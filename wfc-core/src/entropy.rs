use crate::grid::Grid;
use std::fmt::Debug;

/// Chooses the next cell to collapse.
pub trait EntropyCalculator: Debug {
    /// Index of the most constrained eligible cell, or `None` when no
    /// uncollapsed, non-contradicted cell remains.
    #[must_use]
    fn find_lowest_entropy(&self, grid: &Grid) -> Option<usize>;
}

/// Minimum-remaining-values selection.
///
/// Entropy is the raw candidate count. Ties go to the first cell in
/// row-major scan order, so selection never consumes randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimumRemainingValues;

impl MinimumRemainingValues {
    pub fn new() -> Self {
        Self
    }
}

impl EntropyCalculator for MinimumRemainingValues {
    fn find_lowest_entropy(&self, grid: &Grid) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for (index, cell) in grid.cells().iter().enumerate() {
            if cell.is_collapsed() {
                continue;
            }
            let entropy = cell.entropy();
            if entropy == 0 {
                continue;
            }
            if best.map_or(true, |(_, lowest)| entropy < lowest) {
                best = Some((index, entropy));
                // Nothing can beat a single remaining candidate.
                if entropy == 1 {
                    break;
                }
            }
        }
        best.map(|(index, _)| index)
    }
}
