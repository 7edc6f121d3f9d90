//! Spatial data structures
//!
//! This module contains:
//! - Pattern extraction and the pattern catalog
//! - Output grid cells with cached entropy

/// Output grid state and cell bookkeeping
pub mod grid;
/// Pattern extraction with toroidal wraparound
pub mod tiles;

pub use grid::{GridPosition, OutputGrid};
pub use tiles::PatternCatalog;
