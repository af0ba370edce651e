use super::{ConstraintPropagator, PropagationError, PropagationStats};
use crate::grid::{Cell, Grid, Narrowing};
use bitvec::prelude::*;
use log::{debug, trace, warn};
use std::collections::VecDeque;
use wfc_rules::{AdjacencyRules, Direction, TileId};

/// FIFO work-queue propagator (AC-3 style).
///
/// A per-cell `queued` flag keeps each cell in the queue at most once. The
/// queue storage is reused between calls.
///
/// Neighbours narrowed to a single candidate stay open to further narrowing
/// until the queue drains and are only then marked collapsed, so two cells
/// forced in the same pass are still checked against each other.
#[derive(Debug, Clone, Default)]
pub struct BreadthFirstPropagator {
    queue: VecDeque<usize>,
    queued: BitVec,
}

impl BreadthFirstPropagator {
    pub fn new() -> Self {
        Self::default()
    }

    fn enqueue(&mut self, index: usize) {
        if !self.queued[index] {
            self.queued.set(index, true);
            self.queue.push_back(index);
        }
    }

    fn reset(&mut self, len: usize) {
        self.queue.clear();
        self.queued.clear();
        self.queued.resize(len, false);
    }
}

/// Union over every candidate of `source` of the tiles allowed next to it in
/// `direction`.
fn allowed_in_direction(
    source: &BitSlice,
    direction: Direction,
    rules: &AdjacencyRules,
) -> BitVec {
    let mut allowed = bitvec![0; rules.num_tiles()];
    for tile in source.iter_ones() {
        for neighbor_tile in rules.allowed_neighbors(TileId(tile), direction).iter_ones() {
            allowed.set(neighbor_tile, true);
        }
    }
    allowed
}

impl ConstraintPropagator for BreadthFirstPropagator {
    fn propagate(
        &mut self,
        grid: &mut Grid,
        origin: usize,
        rules: &AdjacencyRules,
    ) -> Result<PropagationStats, PropagationError> {
        if rules.num_tiles() != grid.num_tiles() {
            return Err(PropagationError::TileCountMismatch {
                rules: rules.num_tiles(),
                grid: grid.num_tiles(),
            });
        }
        if origin >= grid.len() {
            return Err(PropagationError::OriginOutOfBounds {
                index: origin,
                len: grid.len(),
            });
        }

        let mut stats = PropagationStats::default();
        let mut singletons = Vec::new();
        self.reset(grid.len());
        self.enqueue(origin);

        while let Some(index) = self.queue.pop_front() {
            self.queued.set(index, false);

            let Some(cell) = grid.cell(index) else {
                continue;
            };
            // An empty source would forbid every tile around it.
            if cell.is_contradicted() {
                continue;
            }
            let source = cell.possible_states().to_bitvec();
            stats.visited += 1;

            for direction in Direction::ALL {
                let Some(neighbor) = grid.neighbor(index, direction) else {
                    continue;
                };
                let allowed = allowed_in_direction(&source, direction, rules);
                let Some(neighbor_cell) = grid.cell_mut(neighbor) else {
                    continue;
                };
                match neighbor_cell.narrow(&allowed) {
                    Narrowing::Unchanged => continue,
                    Narrowing::Narrowed => {
                        trace!("Cell {neighbor} narrowed from cell {index} ({direction})");
                    }
                    Narrowing::Collapsed(_) => singletons.push(neighbor),
                    Narrowing::Contradicted => {
                        let (x, y) = grid.index_to_coord(neighbor);
                        warn!("Contradiction at ({x}, {y}): no tile fits next to cell {index}");
                        stats.contradictions.push(neighbor);
                    }
                }
                stats.narrowed += 1;
                self.enqueue(neighbor);
            }
        }

        for index in singletons {
            if let Some(tile) = grid.cell_mut(index).and_then(Cell::settle) {
                stats.forced_collapses += 1;
                debug!("Cell {index} forced to tile {tile}");
            }
        }

        debug!(
            "Propagation from cell {origin}: visited {}, narrowed {}, forced {}, contradictions {}",
            stats.visited,
            stats.narrowed,
            stats.forced_collapses,
            stats.contradictions.len()
        );
        Ok(stats)
    }
}
