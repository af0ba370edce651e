use crate::adjacency::AdjacencyRules;
use crate::compatibility::EdgeCompatibilityTable;
use crate::types::{Direction, TileCatalog};
use log::debug;

/// Derives the tile adjacency matrix from per-tile edge types.
///
/// `tile2` is allowed in direction `d` from `tile1` exactly when
/// `table.is_compatible(tile1.edge(d), tile2.edge(d.opposite()))`. The result
/// is what propagation consults, so edge lookups happen once per run instead
/// of once per visited cell.
///
/// The table is used as-is; call [`EdgeCompatibilityTable::validate`] first if
/// the rules have not been checked.
pub fn generate_adjacency(catalog: &TileCatalog, table: &EdgeCompatibilityTable) -> AdjacencyRules {
    let num_tiles = catalog.len();
    let mut rules = AdjacencyRules::empty(num_tiles);

    for direction in Direction::ALL {
        let opposite = direction.opposite();
        for (id1, tile1) in catalog.iter() {
            let edge = tile1.edge(direction);
            for (id2, tile2) in catalog.iter() {
                if table.is_compatible(edge, tile2.edge(opposite)) {
                    rules.allow(id1, id2, direction);
                }
            }
        }
    }

    debug!(
        "Generated adjacency for {} tiles: {} allowed pairings",
        num_tiles,
        rules.count_allowed()
    );
    rules
}
