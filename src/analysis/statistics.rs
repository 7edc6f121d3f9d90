//! Symbol frequency statistics
//!
//! Used to compare how closely an output reproduces the symbol balance of
//! its sample.

use ndarray::Array2;
use std::collections::BTreeMap;

use crate::spatial::tiles::Symbol;

/// Occurrence counts of each symbol in a grid
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolStatistics {
    counts: BTreeMap<Symbol, usize>,
    total: usize,
}

impl SymbolStatistics {
    /// Count every symbol of a grid
    pub fn from_grid(grid: &Array2<Symbol>) -> Self {
        let mut counts = BTreeMap::new();
        for &symbol in grid {
            *counts.entry(symbol).or_insert(0) += 1;
        }
        Self {
            counts,
            total: grid.len(),
        }
    }

    /// Occurrences of a symbol
    pub fn count(&self, symbol: Symbol) -> usize {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Fraction of cells holding a symbol (0 for an empty grid)
    pub fn ratio(&self, symbol: Symbol) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(symbol) as f64 / self.total as f64
    }

    /// Number of counted cells
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Symbols present, in ascending order
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.counts.keys().copied()
    }

    /// Largest absolute ratio difference over the symbols of either grid
    pub fn max_ratio_deviation(&self, other: &Self) -> f64 {
        self.symbols()
            .chain(other.symbols())
            .map(|symbol| (self.ratio(symbol) - other.ratio(symbol)).abs())
            .fold(0.0, f64::max)
    }
}
