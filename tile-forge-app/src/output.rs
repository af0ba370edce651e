use crate::config::OutputFormat;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use wfc_core::Generation;

/// Marker for a cell that was never collapsed.
pub const UNCOLLAPSED: &str = "?";
/// Marker for a cell left without any possible tile.
pub const CONTRADICTED: &str = "X";

/// Renders the grid as text: one row per line, space-separated tile indices.
pub fn render_text(generation: &Generation) -> String {
    let width = generation.grid.width();
    let mut text = String::new();
    for cell in generation.cells() {
        if cell.x > 0 {
            text.push(' ');
        }
        match cell.tile {
            Some(tile) => text.push_str(&tile.to_string()),
            None if cell.contradicted => text.push_str(CONTRADICTED),
            None => text.push_str(UNCOLLAPSED),
        }
        if cell.x + 1 == width {
            text.push('\n');
        }
    }
    text
}

/// Writes the generation to `output_path` in the requested format.
pub fn save_generation(
    generation: &Generation,
    output_path: &Path,
    format: OutputFormat,
) -> Result<()> {
    log::info!("Saving {format:?} output to {output_path:?}...");

    let file = File::create(output_path)
        .with_context(|| format!("Failed to create output file: {output_path:?}"))?;
    let mut writer = io::BufWriter::new(file);

    match format {
        OutputFormat::Text => writer
            .write_all(render_text(generation).as_bytes())
            .with_context(|| format!("Failed to write grid to {output_path:?}"))?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &generation.report())
                .context("Failed to serialize generation report")?;
            writeln!(writer)?;
        }
    }

    writer
        .flush()
        .context("Failed to flush writer for output file")?;
    log::info!("Successfully saved grid to {output_path:?}");
    Ok(())
}
