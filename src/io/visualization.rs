//! Frame capture and GIF generation for collapse visualization

use crate::analysis::patterns::SymbolPalette;
use crate::io::configuration::{MAX_VISUALIZATION_FRAMES, VISUALIZATION_MIN_SIDE};
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::{Cell, OutputGrid};
use crate::spatial::tiles::PatternCatalog;
use image::imageops::{self, FilterType};
use image::{Frame, Rgba, RgbaImage};
use std::path::Path;

const CONTRADICTION_COLOR: [u8; 4] = [128, 128, 128, 255];

/// Captures snapshots of the output grid while it collapses
///
/// Uncollapsed cells are drawn as the count-weighted mean colour of their
/// candidates' leading symbols, so the image sharpens as the run proceeds.
pub struct VisualizationCapture {
    frames: Vec<RgbaImage>,
    palette: SymbolPalette,
    frame_interval: usize,
    pending: usize,
}

impl VisualizationCapture {
    /// Prepare a capture for a grid of `total_cells` cells
    pub fn new(palette: SymbolPalette, total_cells: usize) -> Self {
        let frame_interval = total_cells.div_ceil(MAX_VISUALIZATION_FRAMES).max(1);
        Self {
            frames: Vec::new(),
            palette,
            frame_interval,
            pending: 0,
        }
    }

    /// Note one collapse, rendering a frame every `frame_interval` collapses
    pub fn record(&mut self, grid: &OutputGrid, catalog: &PatternCatalog) {
        if self.frames.is_empty() && self.pending == 0 {
            self.frames.push(self.render_frame(grid, catalog));
        }

        self.pending += 1;
        if self.pending >= self.frame_interval {
            self.frames.push(self.render_frame(grid, catalog));
            self.pending = 0;
        }
    }

    /// Render any collapses not yet captured
    pub fn finish(&mut self, grid: &OutputGrid, catalog: &PatternCatalog) {
        if self.pending > 0 || self.frames.is_empty() {
            self.frames.push(self.render_frame(grid, catalog));
            self.pending = 0;
        }
    }

    /// Snapshot of the grid at its current state
    pub fn render_frame(&self, grid: &OutputGrid, catalog: &PatternCatalog) -> RgbaImage {
        let mut img = RgbaImage::new(grid.width() as u32, grid.height() as u32);
        for (position, cell) in grid.iter() {
            let color = self.blend(cell, catalog);
            img.put_pixel(position.x as u32, position.y as u32, Rgba(color));
        }
        img
    }

    fn blend(&self, cell: &Cell, catalog: &PatternCatalog) -> [u8; 4] {
        let mut sums = [0u64; 4];
        let mut total = 0u64;

        for id in cell.candidates().iter() {
            let Some(color) = catalog
                .pattern(id)
                .and_then(|pattern| self.palette.color(pattern.leading_symbol()))
            else {
                continue;
            };
            let weight = u64::from(catalog.count(id));
            for (sum, &channel) in sums.iter_mut().zip(&color) {
                *sum += u64::from(channel) * weight;
            }
            total += weight;
        }

        if total == 0 {
            return CONTRADICTION_COLOR;
        }
        sums.map(|sum| (sum / total) as u8)
    }

    /// Number of frames captured so far
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as an animated GIF
    ///
    /// Frames are upscaled with nearest-neighbour sampling so small outputs
    /// stay visible. Delays below what viewers support are clamped, and the
    /// final frame is held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;

        if self.frames.is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "No frames captured for visualization".to_string(),
            });
        }

        let delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let mut frames: Vec<Frame> = self
            .frames
            .iter()
            .map(|img| Self::to_frame(img, delay_ms))
            .collect();

        // Final frame displays longer for better visibility
        if let Some(last) = self.frames.last() {
            frames.push(Self::to_frame(last, delay_ms * 25));
        }

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn to_frame(img: &RgbaImage, delay_ms: u32) -> Frame {
        let longest = img.width().max(img.height()).max(1);
        let scale = VISUALIZATION_MIN_SIDE.div_ceil(longest).max(1);
        let scaled = imageops::resize(
            img,
            img.width() * scale,
            img.height() * scale,
            FilterType::Nearest,
        );
        Frame::from_parts(
            scaled,
            0,
            0,
            image::Delay::from_numer_denom_ms(delay_ms, 1),
        )
    }
}
