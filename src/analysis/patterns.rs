//! Image decoding into discrete symbol grids

use ndarray::{Array2, Array3};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::io::configuration::{BRIGHT_VALUE, DARK_VALUE};
use crate::spatial::tiles::Symbol;

/// How pixel colours become symbols
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SymbolMode {
    /// Symbol 1 when the red channel is nonzero, otherwise 0
    #[default]
    Threshold,
    /// One symbol per distinct RGBA colour, in sorted colour order
    Palette,
}

/// RGBA colour for each symbol (indexed by symbol)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolPalette {
    colors: Vec<[u8; 4]>,
}

impl SymbolPalette {
    /// Dark for 0, bright for 1, both fully opaque
    pub fn binary() -> Self {
        Self::from_colors(vec![
            [DARK_VALUE, DARK_VALUE, DARK_VALUE, 255],
            [BRIGHT_VALUE, BRIGHT_VALUE, BRIGHT_VALUE, 255],
        ])
    }

    /// Palette with explicit colours
    pub const fn from_colors(colors: Vec<[u8; 4]>) -> Self {
        Self { colors }
    }

    /// Colour of a symbol
    pub fn color(&self, symbol: Symbol) -> Option<[u8; 4]> {
        self.colors.get(symbol).copied()
    }

    /// All colours in symbol order
    pub fn colors(&self) -> &[[u8; 4]] {
        &self.colors
    }

    /// Number of symbols with a colour
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Test if no symbol has a colour
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Converts images into symbol grids and remembers how to colour them back
pub struct ImageProcessor {
    sample: Array2<Symbol>,
    palette: SymbolPalette,
}

impl ImageProcessor {
    /// Load and process an image from a PNG file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file at the given path cannot be opened or read
    /// - The file is not a valid image format
    pub fn from_png_file<P: AsRef<Path>>(path: P, mode: SymbolMode) -> crate::io::error::Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img =
            image::open(&path_buf).map_err(|e| crate::io::error::AlgorithmError::ImageLoad {
                path: path_buf,
                source: e,
            })?;
        let rgba_img = img.to_rgba8();

        // (height, width, 4 channels)
        let (width, height) = (rgba_img.width() as usize, rgba_img.height() as usize);
        let mut image_data = Array3::zeros((height, width, 4));

        for (x, y, pixel) in rgba_img.enumerate_pixels() {
            for (c, &val) in pixel.0.iter().enumerate() {
                if let Some(channel) = image_data.get_mut((y as usize, x as usize, c)) {
                    *channel = val;
                }
            }
        }

        Ok(Self::from_raw_image(&image_data, mode))
    }

    /// Process a raw `(height, width, 4)` RGBA array into symbols
    pub fn from_raw_image(image_data: &Array3<u8>, mode: SymbolMode) -> Self {
        match mode {
            SymbolMode::Threshold => Self::from_threshold(image_data),
            SymbolMode::Palette => Self::from_distinct_colors(image_data),
        }
    }

    fn from_threshold(image_data: &Array3<u8>) -> Self {
        let (height, width, _) = image_data.dim();
        let sample = Array2::from_shape_fn((height, width), |(i, j)| {
            Symbol::from(image_data.get((i, j, 0)).copied().unwrap_or(0) != 0)
        });

        Self {
            sample,
            palette: SymbolPalette::binary(),
        }
    }

    fn from_distinct_colors(image_data: &Array3<u8>) -> Self {
        let (height, width, _) = image_data.dim();
        let pixel = |i: usize, j: usize| -> [u8; 4] {
            let mut color = [0; 4];
            for (c, channel) in color.iter_mut().enumerate() {
                *channel = image_data.get((i, j, c)).copied().unwrap_or(0);
            }
            color
        };

        // Sorted colour order keeps symbol assignment reproducible
        let mut unique_colors = BTreeSet::new();
        for i in 0..height {
            for j in 0..width {
                unique_colors.insert(pixel(i, j));
            }
        }
        let colors: Vec<[u8; 4]> = unique_colors.into_iter().collect();
        let lookup: HashMap<[u8; 4], Symbol> = colors
            .iter()
            .enumerate()
            .map(|(symbol, &color)| (color, symbol))
            .collect();

        let sample = Array2::from_shape_fn((height, width), |(i, j)| {
            lookup.get(&pixel(i, j)).copied().unwrap_or(0)
        });

        Self {
            sample,
            palette: SymbolPalette::from_colors(colors),
        }
    }

    /// Get the symbol grid
    pub const fn sample(&self) -> &Array2<Symbol> {
        &self.sample
    }

    /// Get the colours used to render symbols
    pub const fn palette(&self) -> &SymbolPalette {
        &self.palette
    }

    /// Consume the processor and return its components
    pub fn into_parts(self) -> (Array2<Symbol>, SymbolPalette) {
        (self.sample, self.palette)
    }
}

/// Decode a PNG into a thresholded 0/1 symbol grid
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded
pub fn load_sample_grid<P: AsRef<Path>>(path: P) -> crate::io::error::Result<Array2<Symbol>> {
    ImageProcessor::from_png_file(path, SymbolMode::Threshold).map(|processor| processor.sample)
}
