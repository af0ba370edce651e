use crate::types::{Direction, TileId};
use bitvec::prelude::*;

/// Which tiles may sit next to which, per direction.
///
/// Stored as one flattened bit matrix per direction so that the set of
/// tiles allowed next to a given tile is a contiguous [`BitSlice`].
/// Indexing: `direction * num_tiles * num_tiles + tile1 * num_tiles + tile2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyRules {
    num_tiles: usize,
    allowed: BitVec,
}

impl AdjacencyRules {
    /// Number of directions rules are defined for.
    pub const NUM_DIRECTIONS: usize = Direction::ALL.len();

    /// Creates rules from a pre-flattened bit matrix.
    ///
    /// # Panics
    ///
    /// Panics if `allowed.len() != 4 * num_tiles * num_tiles`.
    pub fn new(num_tiles: usize, allowed: BitVec) -> Self {
        assert_eq!(
            allowed.len(),
            Self::NUM_DIRECTIONS * num_tiles * num_tiles,
            "Provided 'allowed' matrix has incorrect size."
        );
        Self { num_tiles, allowed }
    }

    /// Rules where nothing is allowed next to anything.
    pub fn empty(num_tiles: usize) -> Self {
        Self {
            num_tiles,
            allowed: bitvec![0; Self::NUM_DIRECTIONS * num_tiles * num_tiles],
        }
    }

    /// Marks `tile2` as allowed in `direction` from `tile1`.
    ///
    /// Out-of-range tiles are ignored.
    pub fn allow(&mut self, tile1: TileId, tile2: TileId, direction: Direction) {
        if let Some(index) = self.flat_index(tile1, tile2, direction) {
            self.allowed.set(index, true);
        }
    }

    pub fn num_tiles(&self) -> usize {
        self.num_tiles
    }

    /// Number of allowed `(tile1, tile2, direction)` triples.
    pub fn count_allowed(&self) -> usize {
        self.allowed.count_ones()
    }

    /// Checks if `tile2` may be placed in `direction` from `tile1`.
    ///
    /// Out-of-range tiles are treated as disallowed.
    #[inline]
    pub fn check(&self, tile1: TileId, tile2: TileId, direction: Direction) -> bool {
        self.flat_index(tile1, tile2, direction)
            .and_then(|index| self.allowed.get(index).map(|bit| *bit))
            .unwrap_or(false)
    }

    /// All tiles that may be placed in `direction` from `tile`, one bit per
    /// tile index. Empty when `tile` is out of range.
    #[inline]
    pub fn allowed_neighbors(&self, tile: TileId, direction: Direction) -> &BitSlice {
        if tile.0 >= self.num_tiles {
            return BitSlice::empty();
        }
        let start = direction.index() * self.num_tiles * self.num_tiles + tile.0 * self.num_tiles;
        &self.allowed[start..start + self.num_tiles]
    }

    #[inline]
    fn flat_index(&self, tile1: TileId, tile2: TileId, direction: Direction) -> Option<usize> {
        if tile1.0 >= self.num_tiles || tile2.0 >= self.num_tiles {
            return None;
        }
        Some(
            direction.index() * self.num_tiles * self.num_tiles
                + tile1.0 * self.num_tiles
                + tile2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_is_per_direction() {
        let mut rules = AdjacencyRules::empty(2);
        rules.allow(TileId(0), TileId(1), Direction::East);
        assert!(rules.check(TileId(0), TileId(1), Direction::East));
        assert!(!rules.check(TileId(0), TileId(1), Direction::West));
        assert!(!rules.check(TileId(1), TileId(0), Direction::East));
        assert_eq!(rules.count_allowed(), 1);
    }

    #[test]
    fn allowed_neighbors_is_the_matching_row() {
        let mut rules = AdjacencyRules::empty(3);
        rules.allow(TileId(1), TileId(0), Direction::South);
        rules.allow(TileId(1), TileId(2), Direction::South);
        let row = rules.allowed_neighbors(TileId(1), Direction::South);
        assert_eq!(row.iter_ones().collect::<Vec<_>>(), vec![0, 2]);
        assert!(rules.allowed_neighbors(TileId(1), Direction::North).not_any());
    }

    #[test]
    fn out_of_range_is_disallowed() {
        let rules = AdjacencyRules::new(1, bitvec![1; 4]);
        assert!(rules.check(TileId(0), TileId(0), Direction::North));
        assert!(!rules.check(TileId(1), TileId(0), Direction::North));
        assert!(rules.allowed_neighbors(TileId(5), Direction::East).is_empty());
    }
}
