use bitvec::prelude::*;
use wfc_core::{EntropyCalculator, Grid, MinimumRemainingValues};
use wfc_rules::TileId;

fn calculator() -> MinimumRemainingValues {
    MinimumRemainingValues::new()
}

#[test]
fn test_selects_fewest_candidates() {
    let mut grid = Grid::new(3, 2, 4);
    grid.restrict(4, bits![1, 1, 0, 0]).unwrap();
    grid.restrict(2, bits![1, 1, 1, 0]).unwrap();
    assert_eq!(calculator().find_lowest_entropy(&grid), Some(4));
}

#[test]
fn test_skips_collapsed_and_contradicted_cells() {
    let mut grid = Grid::new(3, 1, 3);
    grid.collapse_to(0, TileId(1)).unwrap();
    grid.restrict(1, bits![0, 0, 0]).unwrap();
    assert_eq!(calculator().find_lowest_entropy(&grid), Some(2));
}

#[test]
fn test_returns_none_when_everything_is_collapsed() {
    let mut grid = Grid::new(2, 1, 2);
    grid.collapse_to(0, TileId(0)).unwrap();
    grid.collapse_to(1, TileId(1)).unwrap();
    assert_eq!(calculator().find_lowest_entropy(&grid), None);
}

#[test]
fn test_returns_none_when_only_contradictions_remain() {
    let mut grid = Grid::new(2, 1, 2);
    grid.collapse_to(0, TileId(0)).unwrap();
    grid.restrict(1, bits![0, 0]).unwrap();
    assert_eq!(calculator().find_lowest_entropy(&grid), None);
    assert!(!grid.is_fully_collapsed());
}

#[test]
fn test_tie_break_is_first_in_scan_order() {
    let mut grid = Grid::new(2, 2, 3);
    for index in [3, 1, 2] {
        grid.restrict(index, bits![0, 1, 1]).unwrap();
    }
    assert_eq!(calculator().find_lowest_entropy(&grid), Some(1));
    // Repeated calls agree.
    assert_eq!(calculator().find_lowest_entropy(&grid), Some(1));
}
