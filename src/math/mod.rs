//! Mathematical utilities for the solver

/// Weighted random selection with a seeded generator
pub mod probability;
