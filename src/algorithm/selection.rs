//! Observation and collapse of a single output cell

use crate::math::probability::RandomSelector;
use crate::spatial::grid::{Cell, GridPosition, OutputGrid};
use crate::spatial::tiles::{PatternCatalog, PatternId};

/// Candidates of a cell paired with their catalog counts, in id order
pub fn weighted_candidates(cell: &Cell, catalog: &PatternCatalog) -> Vec<(PatternId, u64)> {
    cell.candidates()
        .iter()
        .map(|id| (id, u64::from(catalog.count(id))))
        .collect()
}

/// Pick the cell to collapse next
///
/// Delegates to the grid's row-major lowest-entropy scan; `None` means the
/// grid is fully collapsed.
pub fn select_cell(grid: &mut OutputGrid, catalog: &PatternCatalog) -> Option<GridPosition> {
    grid.find_lowest_entropy_cell(catalog)
}

/// Collapse a cell to one of its candidates, weighted by catalog count
///
/// The cell's candidate set becomes exactly the chosen pattern and its
/// entropy is set to that pattern's count. Returns `None` if the cell is
/// out of bounds or has no candidate left.
pub fn collapse_cell(
    grid: &mut OutputGrid,
    catalog: &PatternCatalog,
    position: GridPosition,
    selector: &mut RandomSelector,
) -> Option<PatternId> {
    let cell = grid.cell_mut(position)?;
    let weighted = weighted_candidates(cell, catalog);
    let weights: Vec<u64> = weighted.iter().map(|&(_, weight)| weight).collect();

    let index = selector.weighted_choice(&weights)?;
    let &(chosen, _) = weighted.get(index)?;

    cell.collapse_to(chosen, catalog.count(chosen));
    Some(chosen)
}
