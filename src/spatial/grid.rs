//! Output grid state with lazily cached entropy
//!
//! Each cell holds the set of patterns it may still take. Entropy here is the
//! sum of catalog counts over that set; it is cached per cell and marked
//! stale whenever the set changes.

use ndarray::Array2;

use crate::algorithm::bitset::CandidateSet;
use crate::spatial::tiles::{Pattern, PatternCatalog, PatternId, Symbol};

/// Column/row coordinates of an output cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridPosition {
    /// Column index
    pub x: usize,
    /// Row index
    pub y: usize,
}

impl GridPosition {
    /// Create a position from column and row
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// An in-bounds neighbour together with its offset from the centre cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbor {
    /// Neighbour coordinates
    pub position: GridPosition,
    /// Column offset from the centre
    pub dx: isize,
    /// Row offset from the centre
    pub dy: isize,
}

/// Candidate patterns of one output position
#[derive(Clone, Debug)]
pub struct Cell {
    candidates: CandidateSet,
    entropy: Option<u64>,
}

impl Cell {
    /// Create a cell whose entropy is stale
    pub const fn new(candidates: CandidateSet) -> Self {
        Self {
            candidates,
            entropy: None,
        }
    }

    /// Patterns still possible here
    pub const fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Exactly one candidate remains
    pub fn is_collapsed(&self) -> bool {
        self.candidates.count() == 1
    }

    /// No candidate remains
    pub fn is_contradiction(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Cached entropy, `None` when stale
    pub const fn cached_entropy(&self) -> Option<u64> {
        self.entropy
    }

    /// Entropy, recomputed from the catalog when stale
    pub fn entropy(&mut self, catalog: &PatternCatalog) -> u64 {
        if let Some(entropy) = self.entropy {
            return entropy;
        }
        let entropy = self
            .candidates
            .iter()
            .map(|id| u64::from(catalog.count(id)))
            .sum();
        self.entropy = Some(entropy);
        entropy
    }

    /// Reduce the cell to a single pattern with a known weight
    pub fn collapse_to(&mut self, pattern: PatternId, weight: u32) {
        self.candidates = CandidateSet::singleton(self.candidates.capacity(), pattern);
        self.entropy = Some(u64::from(weight));
    }

    /// Replace the candidate set and mark entropy stale
    pub fn replace_candidates(&mut self, candidates: CandidateSet) {
        self.candidates = candidates;
        self.entropy = None;
    }
}

/// Fixed-size grid of cells owned by a single solver run
#[derive(Clone, Debug)]
pub struct OutputGrid {
    cells: Array2<Cell>,
}

impl OutputGrid {
    /// Create a grid where every cell may take every catalog pattern
    pub fn initialize(catalog: &PatternCatalog, width: usize, height: usize) -> Self {
        let cell = Cell::new(CandidateSet::all(catalog.len()));
        Self {
            cells: Array2::from_elem((height, width), cell),
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Cell at a position
    pub fn cell(&self, position: GridPosition) -> Option<&Cell> {
        self.cells.get((position.y, position.x))
    }

    /// Mutable cell at a position
    pub fn cell_mut(&mut self, position: GridPosition) -> Option<&mut Cell> {
        self.cells.get_mut((position.y, position.x))
    }

    /// Entropy of the cell at a position, refreshing the cache when stale
    pub fn entropy_of(&mut self, position: GridPosition, catalog: &PatternCatalog) -> Option<u64> {
        self.cell_mut(position).map(|cell| cell.entropy(catalog))
    }

    /// First uncollapsed cell in row-major order with the strictly smallest entropy
    ///
    /// Collapsed cells are passed over since collapsing them again changes
    /// nothing. Returns `None` once every cell holds exactly one candidate.
    pub fn find_lowest_entropy_cell(&mut self, catalog: &PatternCatalog) -> Option<GridPosition> {
        let mut lowest: Option<(u64, GridPosition)> = None;

        for ((y, x), cell) in self.cells.indexed_iter_mut() {
            if cell.is_collapsed() {
                continue;
            }
            let entropy = cell.entropy(catalog);
            if lowest.is_none_or(|(minimum, _)| entropy < minimum) {
                lowest = Some((entropy, GridPosition::new(x, y)));
            }
        }

        lowest.map(|(_, position)| position)
    }

    /// In-bounds cells within Chebyshev `radius`, excluding the centre
    ///
    /// Yields rows top to bottom, columns left to right.
    pub fn neighbors(
        &self,
        center: GridPosition,
        radius: usize,
    ) -> impl Iterator<Item = Neighbor> + '_ {
        let span = radius as isize;
        (-span..=span)
            .flat_map(move |dy| (-span..=span).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .filter_map(move |(dx, dy)| {
                let x = center.x.checked_add_signed(dx)?;
                let y = center.y.checked_add_signed(dy)?;
                (x < self.width() && y < self.height()).then_some(Neighbor {
                    position: GridPosition::new(x, y),
                    dx,
                    dy,
                })
            })
    }

    /// Every cell holds exactly one candidate
    pub fn is_fully_collapsed(&self) -> bool {
        self.cells.iter().all(Cell::is_collapsed)
    }

    /// Number of cells holding exactly one candidate
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_collapsed()).count()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Test if the grid has zero area
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Candidate-set size of every cell
    pub fn candidate_counts(&self) -> Array2<usize> {
        self.cells.map(|cell| cell.candidates().count())
    }

    /// Leading symbol of each cell's first remaining candidate
    pub fn resolve(&self, catalog: &PatternCatalog) -> Array2<Symbol> {
        self.cells.map(|cell| {
            cell.candidates()
                .first()
                .and_then(|id| catalog.pattern(id))
                .map_or(0, Pattern::leading_symbol)
        })
    }

    /// Iterate `(position, cell)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (GridPosition, &Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((y, x), cell)| (GridPosition::new(x, y), cell))
    }
}
