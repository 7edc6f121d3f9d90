//! Pattern extraction and the pattern catalog
//!
//! Slides an N×N window over every position of the sample, wrapping around
//! the right and bottom edges, and counts how often each distinct window
//! occurs. Patterns are identified by their flattened content.

use ndarray::Array2;
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

/// A discrete value from the sample alphabet
pub type Symbol = usize;

/// Index of a pattern within its catalog (first-seen scan order)
pub type PatternId = usize;

/// An N×N window of symbols stored in row-major order
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pattern {
    size: usize,
    cells: Vec<Symbol>,
}

impl Pattern {
    /// Build a pattern from row-major cells
    ///
    /// Returns `None` unless `cells` holds exactly `size * size` symbols.
    pub fn from_cells(size: usize, cells: Vec<Symbol>) -> Option<Self> {
        (size > 0 && cells.len() == size * size).then_some(Self { size, cells })
    }

    /// Read the window whose top-left corner sits at `(row, col)`
    ///
    /// Indices wrap toroidally, so a window starting on the last column
    /// continues on the first one.
    pub fn extract(sample: &Array2<Symbol>, row: usize, col: usize, size: usize) -> Self {
        let (height, width) = sample.dim();
        let mut cells = Vec::with_capacity(size * size);

        if height > 0 && width > 0 {
            for dy in 0..size {
                for dx in 0..size {
                    let cell = sample
                        .get(((row + dy) % height, (col + dx) % width))
                        .copied()
                        .unwrap_or_default();
                    cells.push(cell);
                }
            }
        }

        Self { size, cells }
    }

    /// Side length of the window
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Flattened row-major symbols
    pub fn cells(&self) -> &[Symbol] {
        &self.cells
    }

    /// Symbol at `(row, col)` within the window
    pub fn get(&self, row: usize, col: usize) -> Option<Symbol> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells.get(row * self.size + col).copied()
    }

    /// Symbol at the top-left corner, which is what an output cell displays
    pub fn leading_symbol(&self) -> Symbol {
        self.cells.first().copied().unwrap_or_default()
    }
}

/// Every distinct pattern of the sample together with its occurrence count
///
/// Built once per run and read-only afterwards. Pattern ids follow the
/// order in which the row-major scan first met each pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternCatalog {
    pattern_size: usize,
    patterns: Vec<Pattern>,
    counts: Vec<u32>,
    index: HashMap<Pattern, PatternId>,
}

impl PatternCatalog {
    /// Extract and count every overlapping window of the sample
    ///
    /// All `width * height` positions are visited, not just those whose
    /// window fits inside the sample. An empty sample or a zero pattern size
    /// yields an empty catalog.
    pub fn build(sample: &Array2<Symbol>, pattern_size: usize) -> Self {
        let mut catalog = Self {
            pattern_size,
            patterns: Vec::new(),
            counts: Vec::new(),
            index: HashMap::new(),
        };

        if sample.is_empty() || pattern_size == 0 {
            return catalog;
        }

        let (height, width) = sample.dim();
        for row in 0..height {
            for col in 0..width {
                catalog.record(Pattern::extract(sample, row, col, pattern_size));
            }
        }

        catalog
    }

    fn record(&mut self, pattern: Pattern) {
        match self.index.entry(pattern) {
            Entry::Occupied(entry) => {
                if let Some(count) = self.counts.get_mut(*entry.get()) {
                    *count += 1;
                }
            }
            Entry::Vacant(entry) => {
                let id = self.patterns.len();
                self.patterns.push(entry.key().clone());
                self.counts.push(1);
                entry.insert(id);
            }
        }
    }

    /// Side length of every pattern in the catalog
    pub const fn pattern_size(&self) -> usize {
        self.pattern_size
    }

    /// Number of distinct patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Test if the catalog holds no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Pattern for an id
    pub fn pattern(&self, id: PatternId) -> Option<&Pattern> {
        self.patterns.get(id)
    }

    /// Occurrence count for an id (0 for unknown ids)
    pub fn count(&self, id: PatternId) -> u32 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    /// Occurrence count of a pattern (0 if never seen)
    pub fn count_of(&self, pattern: &Pattern) -> u32 {
        self.id_of(pattern).map_or(0, |id| self.count(id))
    }

    /// Id of a pattern, if the sample contains it
    pub fn id_of(&self, pattern: &Pattern) -> Option<PatternId> {
        self.index.get(pattern).copied()
    }

    /// Sum of all occurrence counts (equals the sample area)
    pub fn total_weight(&self) -> u64 {
        self.counts.iter().map(|&count| u64::from(count)).sum()
    }

    /// Iterate `(id, pattern, count)` in id order
    pub fn iter(&self) -> impl Iterator<Item = (PatternId, &Pattern, u32)> + '_ {
        self.patterns
            .iter()
            .zip(&self.counts)
            .enumerate()
            .map(|(id, (pattern, &count))| (id, pattern, count))
    }

    /// Every symbol that appears in any pattern
    pub fn symbols(&self) -> BTreeSet<Symbol> {
        self.patterns
            .iter()
            .flat_map(|pattern| pattern.cells().iter().copied())
            .collect()
    }
}
