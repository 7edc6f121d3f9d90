//! Overlapping wave function collapse for discrete images and tilemaps
//!
//! The system extracts every overlapping N×N pattern from a small sample grid,
//! then synthesizes a larger grid by repeatedly collapsing the lowest-entropy
//! cell and propagating the resulting constraints to its neighbours.

#![forbid(unsafe_code)]

/// Core solver: candidate bitsets, compatibility rules, selection, collapse and propagation
pub mod algorithm;
/// Sample loading and symbol statistics
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Seeded weighted random selection
pub mod math;
/// Pattern catalog and output grid state
pub mod spatial;

pub use algorithm::executor::{Solver, SolverConfig, solve};
pub use io::error::{AlgorithmError, Result};
pub use spatial::tiles::{Pattern, PatternCatalog, PatternId, Symbol};
