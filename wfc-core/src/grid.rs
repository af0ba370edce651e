use bitvec::prelude::*;
use thiserror::Error;
use wfc_rules::{Direction, TileId};

/// Precondition violations when addressing or mutating grid cells.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Cell index {index} is out of bounds for a grid of {len} cells")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("Cell {index} is already collapsed")]
    AlreadyCollapsed { index: usize },
    #[error("Cell {index} has no possible tiles left")]
    Contradicted { index: usize },
    #[error("Tile {tile} is not possible in cell {index}")]
    TileNotPossible { index: usize, tile: TileId },
    #[error("Possibility mask has {actual} bits, expected {expected}")]
    MaskLengthMismatch { expected: usize, actual: usize },
}

/// Observable state of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Not yet collapsed; holds the number of remaining candidates (>= 1).
    Superposed(usize),
    Collapsed(TileId),
    /// No candidate survived propagation.
    Contradicted,
}

/// Effect of intersecting a cell's candidates with an allowed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Narrowing {
    Unchanged,
    Narrowed,
    /// Exactly one candidate is left.
    Collapsed(TileId),
    /// Nothing is left. The cell stays uncollapsed.
    Contradicted,
}

impl Narrowing {
    pub const fn changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// One grid position: its remaining candidate tiles and collapse status.
///
/// Candidates only ever shrink. A collapsed cell has exactly one candidate;
/// a contradicted cell has none and is never collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    possible: BitVec,
    collapsed: bool,
    final_state: Option<TileId>,
}

impl Cell {
    /// A cell in full superposition over `num_tiles` tiles.
    pub fn new(num_tiles: usize) -> Self {
        Self {
            possible: bitvec![1; num_tiles],
            collapsed: false,
            final_state: None,
        }
    }

    pub fn possible_states(&self) -> &BitSlice {
        &self.possible
    }

    pub fn possible_tiles(&self) -> impl Iterator<Item = TileId> + '_ {
        self.possible.iter_ones().map(TileId)
    }

    /// Number of remaining candidates.
    pub fn entropy(&self) -> usize {
        self.possible.count_ones()
    }

    pub fn contains(&self, tile: TileId) -> bool {
        self.possible.get(tile.0).map_or(false, |bit| *bit)
    }

    pub const fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub const fn final_state(&self) -> Option<TileId> {
        self.final_state
    }

    pub fn is_contradicted(&self) -> bool {
        !self.collapsed && self.possible.not_any()
    }

    pub fn state(&self) -> CellState {
        match self.final_state {
            Some(tile) if self.collapsed => CellState::Collapsed(tile),
            _ => match self.entropy() {
                0 => CellState::Contradicted,
                n => CellState::Superposed(n),
            },
        }
    }

    fn collapse_to(&mut self, tile: TileId) {
        self.possible.fill(false);
        self.possible.set(tile.0, true);
        self.final_state = Some(tile);
        self.collapsed = true;
    }

    /// Removes every candidate not set in `allowed`, without collapsing.
    ///
    /// Collapsed cells are left untouched. Bits of `allowed` beyond its length
    /// count as disallowed. A result of [`Narrowing::Collapsed`] means one
    /// candidate is left; [`Self::settle`] turns that into a collapse.
    pub(crate) fn narrow(&mut self, allowed: &BitSlice) -> Narrowing {
        if self.collapsed {
            return Narrowing::Unchanged;
        }
        let removed: Vec<usize> = self
            .possible
            .iter_ones()
            .filter(|&i| !allowed.get(i).map_or(false, |bit| *bit))
            .collect();
        if removed.is_empty() {
            return Narrowing::Unchanged;
        }
        for i in removed {
            self.possible.set(i, false);
        }
        let mut remaining = self.possible.iter_ones();
        match (remaining.next(), remaining.next()) {
            (None, _) => Narrowing::Contradicted,
            (Some(only), None) => Narrowing::Collapsed(TileId(only)),
            (Some(_), Some(_)) => Narrowing::Narrowed,
        }
    }

    /// Marks an uncollapsed cell with exactly one candidate as collapsed.
    pub(crate) fn settle(&mut self) -> Option<TileId> {
        if self.collapsed {
            return None;
        }
        let mut remaining = self.possible.iter_ones();
        match (remaining.next(), remaining.next()) {
            (Some(only), None) => {
                let tile = TileId(only);
                self.final_state = Some(tile);
                self.collapsed = true;
                Some(tile)
            }
            _ => None,
        }
    }

    /// Keeps only candidates that are also set in `allowed`, collapsing the
    /// cell if exactly one is left.
    pub fn restrict(&mut self, allowed: &BitSlice) -> Narrowing {
        let outcome = self.narrow(allowed);
        if let Narrowing::Collapsed(_) = outcome {
            self.settle();
        }
        outcome
    }
}

/// Flattened `width x height` array of cells, addressed by `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    num_tiles: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every cell in full superposition over
    /// `0..num_tiles`.
    pub fn new(width: usize, height: usize, num_tiles: usize) -> Self {
        Self {
            width,
            height,
            num_tiles,
            cells: vec![Cell::new(num_tiles); width * height],
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn num_tiles(&self) -> usize {
        self.num_tiles
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// `y * width + x`. No bounds check; see [`Self::index`].
    #[inline]
    pub const fn coord_to_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Inverse of [`Self::coord_to_index`].
    #[inline]
    pub const fn index_to_coord(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    /// Bounds-checked linear index of `(x, y)`.
    pub const fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(self.coord_to_index(x, y))
        } else {
            None
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        self.index(x, y).and_then(|index| self.cells.get(index))
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub(crate) fn cell_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Index of the neighbour in `direction`, or `None` at the grid border.
    pub fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        if index >= self.cells.len() {
            return None;
        }
        let (x, y) = self.index_to_coord(index);
        let (dx, dy) = direction.offset();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        self.index(nx, ny)
    }

    pub fn is_fully_collapsed(&self) -> bool {
        self.cells.iter().all(Cell::is_collapsed)
    }

    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_collapsed()).count()
    }

    /// Indices of contradicted cells in row-major order.
    pub fn contradictions(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_contradicted())
            .map(|(index, _)| index)
    }

    fn checked_cell_mut(&mut self, index: usize) -> Result<&mut Cell, GridError> {
        let len = self.cells.len();
        self.cells
            .get_mut(index)
            .ok_or(GridError::IndexOutOfBounds { index, len })
    }

    /// Collapses cell `index` to `tile`.
    ///
    /// The cell must not be collapsed and `tile` must still be a candidate.
    pub fn collapse_to(&mut self, index: usize, tile: TileId) -> Result<(), GridError> {
        let cell = self.checked_cell_mut(index)?;
        if cell.is_collapsed() {
            return Err(GridError::AlreadyCollapsed { index });
        }
        if !cell.contains(tile) {
            return Err(GridError::TileNotPossible { index, tile });
        }
        cell.collapse_to(tile);
        Ok(())
    }

    /// Intersects the candidates of cell `index` with `allowed`.
    pub fn restrict(&mut self, index: usize, allowed: &BitSlice) -> Result<Narrowing, GridError> {
        let expected = self.num_tiles;
        if allowed.len() != expected {
            return Err(GridError::MaskLengthMismatch {
                expected,
                actual: allowed.len(),
            });
        }
        Ok(self.checked_cell_mut(index)?.restrict(allowed))
    }
}
