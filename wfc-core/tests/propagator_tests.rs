use wfc_core::{
    BreadthFirstPropagator, CellState, ConstraintPropagator, Grid, PropagationError,
};
use wfc_rules::{
    generate_adjacency, AdjacencyRules, EdgeCompatibilityTable, TileCatalog, TileDefinition,
    TileEdges, TileId,
};

fn grass_and_road() -> AdjacencyRules {
    let catalog: TileCatalog = vec![
        TileDefinition::new("grass", TileEdges::uniform("Grass")),
        TileDefinition::new("road_ew", TileEdges::new("Grass", "Road", "Grass", "Road")),
    ]
    .into_iter()
    .collect();
    let table = EdgeCompatibilityTable::self_matching(["Grass", "Road"]);
    generate_adjacency(&catalog, &table)
}

fn two_solid_tiles() -> AdjacencyRules {
    let catalog: TileCatalog = vec![
        TileDefinition::new("a", TileEdges::uniform("A")),
        TileDefinition::new("b", TileEdges::uniform("B")),
    ]
    .into_iter()
    .collect();
    generate_adjacency(&catalog, &EdgeCompatibilityTable::self_matching(["A", "B"]))
}

#[test]
fn test_forced_chain_collapses_along_the_road() {
    let rules = grass_and_road();
    let mut grid = Grid::new(3, 1, 2);
    grid.collapse_to(0, TileId(1)).unwrap();

    let stats = BreadthFirstPropagator::new()
        .propagate(&mut grid, 0, &rules)
        .unwrap();

    for index in 0..3 {
        assert_eq!(grid.cell(index).unwrap().state(), CellState::Collapsed(TileId(1)));
    }
    assert_eq!(stats.forced_collapses, 2);
    assert_eq!(stats.narrowed, 2);
    assert_eq!(stats.visited, 3);
    assert!(stats.contradictions.is_empty());
}

#[test]
fn test_partial_narrowing_keeps_superposition() {
    let rules = grass_and_road();
    let mut grid = Grid::new(1, 2, 2);
    // North of a grass tile anything with a grass south edge fits: both tiles.
    grid.collapse_to(1, TileId(0)).unwrap();
    let stats = BreadthFirstPropagator::new()
        .propagate(&mut grid, 1, &rules)
        .unwrap();
    assert_eq!(grid.cell(0).unwrap().state(), CellState::Superposed(2));
    assert_eq!(stats.narrowed, 0);
}

#[test]
fn test_contradiction_is_recorded_and_not_spread() {
    let catalog: TileCatalog = std::iter::once(TileDefinition::new("a", TileEdges::uniform("A")))
        .collect();
    let mut table = EdgeCompatibilityTable::new();
    table.insert_symmetric("A", "B");
    let rules = generate_adjacency(&catalog, &table);

    let mut grid = Grid::new(3, 1, 1);
    grid.collapse_to(0, TileId(0)).unwrap();
    let stats = BreadthFirstPropagator::new()
        .propagate(&mut grid, 0, &rules)
        .unwrap();

    assert_eq!(stats.contradictions, vec![1]);
    assert_eq!(grid.cell(1).unwrap().state(), CellState::Contradicted);
    // The contradicted cell does not wipe out its other neighbour.
    assert_eq!(grid.cell(2).unwrap().state(), CellState::Superposed(1));
    assert_eq!(stats.visited, 1);
}

#[test]
fn test_collapsed_neighbors_are_not_modified() {
    let rules = two_solid_tiles();
    let mut grid = Grid::new(2, 1, 2);
    grid.collapse_to(1, TileId(1)).unwrap();
    grid.collapse_to(0, TileId(0)).unwrap();

    let stats = BreadthFirstPropagator::new()
        .propagate(&mut grid, 0, &rules)
        .unwrap();
    assert_eq!(grid.cell(1).unwrap().state(), CellState::Collapsed(TileId(1)));
    assert_eq!(stats.narrowed, 0);
    assert!(stats.contradictions.is_empty());
}

#[test]
fn test_propagation_reaches_the_whole_grid() {
    let rules = two_solid_tiles();
    let mut grid = Grid::new(3, 3, 2);
    let centre = grid.coord_to_index(1, 1);
    grid.collapse_to(centre, TileId(0)).unwrap();

    let stats = BreadthFirstPropagator::new()
        .propagate(&mut grid, centre, &rules)
        .unwrap();
    assert!(grid.is_fully_collapsed());
    assert!(grid
        .cells()
        .iter()
        .all(|cell| cell.final_state() == Some(TileId(0))));
    assert_eq!(stats.forced_collapses, 8);
}

#[test]
fn test_propagator_is_reusable_across_grids() {
    let rules = two_solid_tiles();
    let mut propagator = BreadthFirstPropagator::new();

    let mut small = Grid::new(2, 1, 2);
    small.collapse_to(0, TileId(1)).unwrap();
    propagator.propagate(&mut small, 0, &rules).unwrap();
    assert!(small.is_fully_collapsed());

    let mut large = Grid::new(4, 4, 2);
    large.collapse_to(15, TileId(0)).unwrap();
    propagator.propagate(&mut large, 15, &rules).unwrap();
    assert!(large.is_fully_collapsed());
}

#[test]
fn test_out_of_bounds_origin_is_an_error() {
    let rules = two_solid_tiles();
    let mut grid = Grid::new(2, 2, 2);
    let result = BreadthFirstPropagator::new().propagate(&mut grid, 4, &rules);
    assert_eq!(
        result,
        Err(PropagationError::OriginOutOfBounds { index: 4, len: 4 })
    );
}
