use crate::types::{Direction, EdgeType, TileCatalog};
use crate::validation::{RuleViolation, ValidationReport};
use log::{debug, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Directed mapping from an edge type to the single edge type it may touch.
///
/// The table is built once, validated against a catalog and then only read.
/// A key has at most one partner; inserting a second partner replaces the
/// first. Symmetry is checked by [`Self::validate`], never repaired.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeCompatibilityTable {
    partners: BTreeMap<EdgeType, EdgeType>,
}

impl EdgeCompatibilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table where every given edge type is compatible with itself.
    pub fn self_matching<I, E>(edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<EdgeType>,
    {
        let mut table = Self::new();
        for edge in edges {
            let edge = edge.into();
            table.insert(edge.clone(), edge);
        }
        table
    }

    /// Builds a table from directed `(from, to)` pairs. Later pairs win.
    pub fn from_pairs<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<EdgeType>,
        B: Into<EdgeType>,
    {
        let mut table = Self::new();
        for (from, to) in pairs {
            table.insert(from, to);
        }
        table
    }

    /// Sets `to` as the partner of `from` in one direction only.
    ///
    /// Returns the partner previously configured for `from`, if any.
    pub fn insert(&mut self, from: impl Into<EdgeType>, to: impl Into<EdgeType>) -> Option<EdgeType> {
        self.partners.insert(from.into(), to.into())
    }

    /// Inserts `a -> b` and `b -> a`.
    pub fn insert_symmetric(&mut self, a: impl Into<EdgeType>, b: impl Into<EdgeType>) {
        let a = a.into();
        let b = b.into();
        self.partners.insert(a.clone(), b.clone());
        self.partners.insert(b, a);
    }

    pub fn partner(&self, edge: &EdgeType) -> Option<&EdgeType> {
        self.partners.get(edge)
    }

    pub fn contains(&self, edge: &EdgeType) -> bool {
        self.partners.contains_key(edge)
    }

    pub fn len(&self) -> usize {
        self.partners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EdgeType, &EdgeType)> {
        self.partners.iter()
    }

    /// Whether `b` is exactly the configured partner of `a`.
    ///
    /// Directional: `is_compatible(a, b)` says nothing about `is_compatible(b, a)`
    /// unless the table is symmetric.
    #[inline]
    pub fn is_compatible(&self, a: &EdgeType, b: &EdgeType) -> bool {
        self.partners.get(a) == Some(b)
    }

    /// Checks the table against `catalog`.
    ///
    /// Reports an empty catalog, every tile edge with no table entry and every
    /// entry `a -> b` whose reverse `b -> a` is missing or points elsewhere.
    /// Each violation is also logged as a warning.
    pub fn validate(&self, catalog: &TileCatalog) -> ValidationReport {
        let mut violations = Vec::new();

        if catalog.is_empty() {
            violations.push(RuleViolation::EmptyCatalog);
        }

        for (id, tile) in catalog.iter() {
            for direction in Direction::ALL {
                let edge = tile.edge(direction);
                if !self.contains(edge) {
                    violations.push(RuleViolation::MissingEdgeRule {
                        tile: id,
                        name: tile.name.clone(),
                        direction,
                        edge: edge.clone(),
                    });
                }
            }
        }

        for (from, to) in &self.partners {
            let reverse = self.partners.get(to);
            if reverse != Some(from) {
                violations.push(RuleViolation::AsymmetricPair {
                    from: from.clone(),
                    to: to.clone(),
                    reverse: reverse.cloned(),
                });
            }
        }

        for violation in &violations {
            warn!("{violation}");
        }
        debug!(
            "Validated {} tiles against {} compatibility entries: {} violation(s)",
            catalog.len(),
            self.partners.len(),
            violations.len()
        );
        ValidationReport::new(violations)
    }
}
