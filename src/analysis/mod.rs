//! Sample preparation and statistical summaries

/// Image decoding into symbol grids and symbol palettes
pub mod patterns;
/// Symbol frequency statistics for sample and output grids
pub mod statistics;
