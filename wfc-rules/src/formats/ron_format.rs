use crate::formats::FormatParser;
use crate::{EdgeCompatibilityTable, LoadError, TileCatalog};

/// A parser implementation for RON (Rusty Object Notation) format rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct RonFormatParser;

impl RonFormatParser {
    pub fn new() -> Self {
        Self
    }
}

impl FormatParser for RonFormatParser {
    fn format_name(&self) -> &'static str {
        "Rusty Object Notation (RON)"
    }

    #[cfg(feature = "serde")]
    fn parse(&self, ron_content: &str) -> Result<(TileCatalog, EdgeCompatibilityTable), LoadError> {
        let rule_file: super::RuleFile = ron::from_str(ron_content)
            .map_err(|e| LoadError::ParseError(format!("RON deserialization failed: {e}")))?;
        super::build_rules(rule_file)
    }

    #[cfg(not(feature = "serde"))]
    fn parse(&self, _ron_content: &str) -> Result<(TileCatalog, EdgeCompatibilityTable), LoadError> {
        Err(LoadError::FeatureNotEnabled(
            "serde (required for RON parsing)".to_string(),
        ))
    }
}

/// Parses rules defined in a RON string.
pub fn parse_ron_rules(ron_content: &str) -> Result<(TileCatalog, EdgeCompatibilityTable), LoadError> {
    RonFormatParser::new().parse(ron_content)
}
