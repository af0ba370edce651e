use crate::{EdgeCompatibilityTable, LoadError, TileCatalog};

/// Trait defining the interface for format-specific rule parsers.
///
/// Implementors turn the textual contents of a rule file into a tile catalog
/// and its edge compatibility table.
pub trait FormatParser {
    /// Parses rule content into a `TileCatalog` and `EdgeCompatibilityTable`.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::ParseError` for malformed input and
    /// `LoadError::InvalidData` for well-formed input that cannot describe a
    /// catalog (duplicate tile names, conflicting partners).
    fn parse(&self, content: &str) -> Result<(TileCatalog, EdgeCompatibilityTable), LoadError>;

    /// Returns a descriptive name for this parser format.
    fn format_name(&self) -> &'static str;
}
