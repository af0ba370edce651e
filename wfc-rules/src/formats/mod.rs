//! Module defining parsers for different rule file formats.
//!
//! Every format deserializes into the same document shape and is converted
//! to core types by [`build_rules`].

pub mod parser;
pub use parser::FormatParser;

pub mod json_format;
pub mod ron_format;

#[cfg(feature = "serde")]
use crate::{EdgeCompatibilityTable, EdgeType, LoadError, TileCatalog, TileDefinition, TileEdges};
#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use std::collections::HashSet;

/// One tile entry as written in a rule file.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Deserialize)]
struct RuleFileTile {
    /// Unique name of the tile within the file.
    name: String,
    north: String,
    east: String,
    south: String,
    west: String,
    /// Opaque handle passed through to the presentation layer.
    #[serde(default)]
    payload: Option<String>,
}

/// Top-level document shared by all rule formats.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Deserialize)]
struct RuleFile {
    /// Directed `(from, to)` edge compatibility entries.
    compatibility: Vec<(String, String)>,
    tiles: Vec<RuleFileTile>,
}

#[cfg(feature = "serde")]
fn build_rules(file: RuleFile) -> Result<(TileCatalog, EdgeCompatibilityTable), LoadError> {
    let mut table = EdgeCompatibilityTable::new();
    for (from, to) in file.compatibility {
        if let Some(previous) = table.insert(from.as_str(), to.as_str()) {
            if previous.name() != to {
                return Err(LoadError::InvalidData(format!(
                    "Edge type {from} has conflicting partners: {previous} and {to}"
                )));
            }
        }
    }

    let mut seen = HashSet::new();
    let mut catalog = TileCatalog::default();
    for tile in file.tiles {
        if !seen.insert(tile.name.clone()) {
            return Err(LoadError::InvalidData(format!(
                "Duplicate tile name: {}",
                tile.name
            )));
        }
        let edges = TileEdges::new(
            EdgeType::new(tile.north),
            EdgeType::new(tile.east),
            EdgeType::new(tile.south),
            EdgeType::new(tile.west),
        );
        let mut definition = TileDefinition::new(tile.name, edges);
        definition.payload = tile.payload;
        catalog.push(definition);
    }

    Ok((catalog, table))
}
