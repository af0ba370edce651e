use crate::formats::json_format::JsonFormatParser;
use crate::formats::ron_format::RonFormatParser;
use crate::formats::FormatParser;
use crate::{EdgeCompatibilityTable, LoadError, TileCatalog};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Picks a parser from the file extension (`.ron` or `.json`).
pub fn parser_for_path(path: &Path) -> Result<Box<dyn FormatParser>, LoadError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "ron" => Ok(Box::new(RonFormatParser::new())),
        "json" => Ok(Box::new(JsonFormatParser::new())),
        _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Loads the tile catalog and edge compatibility table from a rule file.
///
/// The format is chosen from the extension. The returned rules are not
/// validated; run [`EdgeCompatibilityTable::validate`] before generating.
pub fn load_from_file(path: &Path) -> Result<(TileCatalog, EdgeCompatibilityTable), LoadError> {
    let parser = parser_for_path(path)?;
    debug!("Reading {} rules from {:?}", parser.format_name(), path);
    let content = fs::read_to_string(path)?;
    let (catalog, table) = parser.parse(&content)?;
    info!(
        "Loaded {} tiles and {} compatibility entries from {:?}",
        catalog.len(),
        table.len(),
        path
    );
    Ok((catalog, table))
}
