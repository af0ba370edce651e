use crate::types::{Direction, EdgeType, TileId};
#[cfg(feature = "serde")]
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single rule broken by a catalog/compatibility table pair.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum RuleViolation {
    /// The catalog holds no tiles at all.
    #[error("No tile types defined")]
    EmptyCatalog,
    /// A tile uses an edge type that has no entry in the compatibility table.
    #[error("Tile {tile} ({name}) has {direction} edge type {edge} with no compatibility rule")]
    MissingEdgeRule {
        tile: TileId,
        name: String,
        direction: Direction,
        edge: EdgeType,
    },
    /// `from -> to` is configured but `to` does not map back to `from`.
    #[error("Edge compatibility is not symmetric: {from} -> {to}, but {to} -> {}", reverse_name(.reverse))]
    AsymmetricPair {
        from: EdgeType,
        to: EdgeType,
        reverse: Option<EdgeType>,
    },
}

fn reverse_name(reverse: &Option<EdgeType>) -> String {
    reverse
        .as_ref()
        .map_or_else(|| "<none>".to_owned(), ToString::to_string)
}

/// Outcome of validating a catalog against a compatibility table.
///
/// Validation never stops at the first problem; every violation is collected
/// so a caller can present all of them at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ValidationReport {
    violations: Vec<RuleViolation>,
}

impl ValidationReport {
    pub fn new(violations: Vec<RuleViolation>) -> Self {
        Self { violations }
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[RuleViolation] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn missing_edges(&self) -> impl Iterator<Item = &RuleViolation> {
        self.violations
            .iter()
            .filter(|v| matches!(v, RuleViolation::MissingEdgeRule { .. }))
    }

    pub fn asymmetric_pairs(&self) -> impl Iterator<Item = &RuleViolation> {
        self.violations
            .iter()
            .filter(|v| matches!(v, RuleViolation::AsymmetricPair { .. }))
    }

    /// Converts the report into a `Result`, keeping the report as the error.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.violations.is_empty() {
            return f.write_str("rules are valid");
        }
        write!(f, "{} rule violation(s)", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "; {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}
