#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a unique identifier for a tile.
///
/// This is the index of the tile inside its [`TileCatalog`] and is used as the
/// tile handle everywhere else (possibility sets, results, output files).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TileId(pub usize);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tag identifying what may connect along one border of a tile.
///
/// Edge types only support equality. The `Ord` impl exists so tables and
/// reports iterate in a stable order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EdgeType(String);

impl EdgeType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EdgeType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// One of the four grid directions.
///
/// North points towards `y - 1`, South towards `y + 1`, East towards `x + 1`
/// and West towards `x - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in the order neighbours are visited during propagation.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// The direction pointing back from the neighbour.
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// `(dx, dy)` step for this direction.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Dense index used by [`crate::AdjacencyRules`].
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "North",
            Self::East => "East",
            Self::South => "South",
            Self::West => "West",
        };
        f.write_str(name)
    }
}

/// The four edge types of a tile.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TileEdges {
    pub north: EdgeType,
    pub east: EdgeType,
    pub south: EdgeType,
    pub west: EdgeType,
}

impl TileEdges {
    pub fn new(
        north: impl Into<EdgeType>,
        east: impl Into<EdgeType>,
        south: impl Into<EdgeType>,
        west: impl Into<EdgeType>,
    ) -> Self {
        Self {
            north: north.into(),
            east: east.into(),
            south: south.into(),
            west: west.into(),
        }
    }

    /// All four sides share the same edge type.
    pub fn uniform(edge: impl Into<EdgeType>) -> Self {
        let edge = edge.into();
        Self {
            north: edge.clone(),
            east: edge.clone(),
            south: edge.clone(),
            west: edge,
        }
    }

    pub const fn edge(&self, direction: Direction) -> &EdgeType {
        match direction {
            Direction::North => &self.north,
            Direction::East => &self.east,
            Direction::South => &self.south,
            Direction::West => &self.west,
        }
    }
}

impl From<EdgeType> for TileEdges {
    fn from(edge: EdgeType) -> Self {
        Self::uniform(edge)
    }
}

/// A single tile available to the generator.
///
/// The payload is an opaque handle (typically an asset path) that the core
/// never interprets; it is handed back to the presentation layer untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TileDefinition {
    pub name: String,
    pub edges: TileEdges,
    pub payload: Option<String>,
}

impl TileDefinition {
    pub fn new(name: impl Into<String>, edges: TileEdges) -> Self {
        Self {
            name: name.into(),
            edges,
            payload: None,
        }
    }

    #[must_use]
    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub const fn edge(&self, direction: Direction) -> &EdgeType {
        self.edges.edge(direction)
    }
}

/// Ordered, index-stable list of tile definitions.
///
/// A catalog may be constructed empty; emptiness is reported by
/// [`crate::EdgeCompatibilityTable::validate`] rather than at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TileCatalog {
    tiles: Vec<TileDefinition>,
}

impl TileCatalog {
    pub fn new(tiles: Vec<TileDefinition>) -> Self {
        Self { tiles }
    }

    /// Appends a tile and returns the id it was assigned.
    pub fn push(&mut self, tile: TileDefinition) -> TileId {
        self.tiles.push(tile);
        TileId(self.tiles.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, id: TileId) -> Option<&TileDefinition> {
        self.tiles.get(id.0)
    }

    /// Looks a tile up by name. Linear, intended for loaders and tests.
    pub fn find(&self, name: &str) -> Option<TileId> {
        self.tiles.iter().position(|t| t.name == name).map(TileId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TileId, &TileDefinition)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| (TileId(index), tile))
    }

    pub fn tiles(&self) -> &[TileDefinition] {
        &self.tiles
    }
}

impl FromIterator<TileDefinition> for TileCatalog {
    fn from_iter<I: IntoIterator<Item = TileDefinition>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
