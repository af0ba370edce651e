use crate::formats::FormatParser;
use crate::{EdgeCompatibilityTable, LoadError, TileCatalog};

/// A parser implementation for JSON format rules.
///
/// Same document shape as the RON format; compatibility pairs are two-element
/// arrays.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatParser;

impl JsonFormatParser {
    pub fn new() -> Self {
        Self
    }
}

impl FormatParser for JsonFormatParser {
    fn format_name(&self) -> &'static str {
        "JSON"
    }

    #[cfg(feature = "serde")]
    fn parse(&self, content: &str) -> Result<(TileCatalog, EdgeCompatibilityTable), LoadError> {
        let rule_file: super::RuleFile = serde_json::from_str(content)
            .map_err(|e| LoadError::ParseError(format!("JSON deserialization failed: {e}")))?;
        super::build_rules(rule_file)
    }

    #[cfg(not(feature = "serde"))]
    fn parse(&self, _content: &str) -> Result<(TileCatalog, EdgeCompatibilityTable), LoadError> {
        Err(LoadError::FeatureNotEnabled(
            "serde (required for JSON parsing)".to_string(),
        ))
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use crate::TileId;

    #[test]
    fn parses_json_rules() {
        let content = r#"{
            "compatibility": [["A", "A"]],
            "tiles": [
                {"name": "plain", "north": "A", "east": "A", "south": "A", "west": "A"}
            ]
        }"#;
        let (catalog, table) = JsonFormatParser::new().parse(content).expect("valid JSON");
        assert_eq!(catalog.find("plain"), Some(TileId(0)));
        assert!(table.validate(&catalog).is_valid());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let content = r#"{
            "compatibility": [["A", "A"]],
            "tiles": [
                {"name": "dup", "north": "A", "east": "A", "south": "A", "west": "A"},
                {"name": "dup", "north": "A", "east": "A", "south": "A", "west": "A"}
            ]
        }"#;
        match JsonFormatParser::new().parse(content) {
            Err(LoadError::InvalidData(msg)) => assert!(msg.contains("Duplicate tile name: dup")),
            other => panic!("Expected InvalidData, got {other:?}"),
        }
    }
}
