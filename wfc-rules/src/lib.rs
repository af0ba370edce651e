//! Tile catalogs, edge compatibility rules and rule-file loading for the
//! edge-matching Wave Function Collapse generator.

use thiserror::Error;

pub mod adjacency;
pub mod compatibility;
pub mod formats;
pub mod generator;
pub mod loader;
pub mod types;
pub mod validation;

pub use adjacency::AdjacencyRules;
pub use compatibility::EdgeCompatibilityTable;
pub use generator::generate_adjacency;
pub use types::{Direction, EdgeType, TileCatalog, TileDefinition, TileEdges, TileId};
pub use validation::{RuleViolation, ValidationReport};

/// Errors raised while reading a rule file.
///
/// Structural problems (asymmetric pairs, uncovered edges) are not load
/// errors; they are reported by [`EdgeCompatibilityTable::validate`].
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error reading file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse rules format (e.g., RON/JSON): {0}")]
    ParseError(String),
    #[error("Invalid rule data: {0}")]
    InvalidData(String),
    #[error("Unsupported rule file extension: {0}")]
    UnsupportedFormat(String),
    #[error("Feature not enabled: {0}")]
    FeatureNotEnabled(String),
}
