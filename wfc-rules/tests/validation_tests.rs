use proptest::prelude::*;
use std::collections::BTreeMap;
use wfc_rules::{EdgeCompatibilityTable, RuleViolation, TileCatalog, TileDefinition, TileEdges};

const EDGE_NAMES: [&str; 4] = ["A", "B", "C", "D"];

fn catalog_from(edge_indices: &[[usize; 4]]) -> TileCatalog {
    edge_indices
        .iter()
        .enumerate()
        .map(|(i, [n, e, s, w])| {
            TileDefinition::new(
                format!("tile{i}"),
                TileEdges::new(EDGE_NAMES[*n], EDGE_NAMES[*e], EDGE_NAMES[*s], EDGE_NAMES[*w]),
            )
        })
        .collect()
}

proptest! {
    #[test]
    fn validate_fails_iff_coverage_or_symmetry_is_broken(
        tiles in prop::collection::vec(prop::array::uniform4(0usize..4), 0..5),
        pairs in prop::collection::vec((0usize..4, 0usize..4), 0..6),
    ) {
        let catalog = catalog_from(&tiles);
        let table = EdgeCompatibilityTable::from_pairs(
            pairs.iter().map(|&(a, b)| (EDGE_NAMES[a], EDGE_NAMES[b])),
        );

        // Independent model of the table: later pairs win, as with `insert`.
        let model: BTreeMap<usize, usize> = pairs.iter().copied().collect();
        let uncovered = tiles.iter().flatten().any(|edge| !model.contains_key(edge));
        let asymmetric = model.iter().any(|(a, b)| model.get(b) != Some(a));
        let expected_valid = !tiles.is_empty() && !uncovered && !asymmetric;

        let report = table.validate(&catalog);
        prop_assert_eq!(report.is_valid(), expected_valid);
        prop_assert_eq!(report.missing_edges().next().is_some(), uncovered);
        prop_assert_eq!(report.asymmetric_pairs().next().is_some(), asymmetric);
        prop_assert_eq!(
            report.violations().contains(&RuleViolation::EmptyCatalog),
            tiles.is_empty()
        );
    }

    #[test]
    fn symmetric_covering_tables_always_validate(
        tiles in prop::collection::vec(prop::array::uniform4(0usize..4), 1..5),
        swap_ab in any::<bool>(),
    ) {
        let catalog = catalog_from(&tiles);
        let mut table = EdgeCompatibilityTable::new();
        if swap_ab {
            table.insert_symmetric("A", "B");
        } else {
            table.insert("A", "A");
            table.insert("B", "B");
        }
        table.insert_symmetric("C", "D");
        prop_assert!(table.validate(&catalog).is_valid());
    }
}
