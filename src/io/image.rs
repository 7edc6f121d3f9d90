//! PNG export of resolved symbol grids

use crate::analysis::patterns::SymbolPalette;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::tiles::Symbol;
use image::{ImageBuffer, Rgba, RgbaImage};
use ndarray::Array2;
use std::path::Path;

/// Render a symbol grid to an RGBA image, one pixel per cell
///
/// # Errors
///
/// Returns an error if:
/// - The grid has zero area
/// - A symbol has no colour in the palette
pub fn render_grid(grid: &Array2<Symbol>, palette: &SymbolPalette) -> Result<RgbaImage> {
    let (height, width) = grid.dim();
    if grid.is_empty() {
        return Err(AlgorithmError::InvalidSourceData {
            reason: format!("Cannot render an empty {height}x{width} grid"),
        });
    }

    let mut img = ImageBuffer::new(width as u32, height as u32);
    for ((row, col), &symbol) in grid.indexed_iter() {
        let color = palette
            .color(symbol)
            .ok_or(AlgorithmError::InvalidSymbol {
                symbol,
                palette_size: palette.len(),
            })?;
        img.put_pixel(col as u32, row as u32, Rgba(color));
    }

    Ok(img)
}

/// Export a symbol grid as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The grid has zero area or holds a symbol outside the palette
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(
    grid: &Array2<Symbol>,
    palette: &SymbolPalette,
    output_path: &Path,
) -> Result<()> {
    let img = render_grid(grid, palette)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

/// Write a 0/1 grid as a dark/bright opaque PNG
///
/// # Errors
///
/// Same conditions as [`export_grid_as_png`] with the binary palette
pub fn store_result_grid(grid: &Array2<Symbol>, output_path: &Path) -> Result<()> {
    export_grid_as_png(grid, &SymbolPalette::binary(), output_path)
}
