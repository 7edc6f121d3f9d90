//! Pattern compatibility predicates
//!
//! Propagation asks, for a neighbour at offset `(dx, dy)` from the current
//! cell, which of the neighbour's patterns still agree with at least one of
//! the current cell's patterns. The answer depends only on pattern content,
//! so it is computed once per catalog and stored as bitsets.

use crate::algorithm::bitset::CandidateSet;
use crate::spatial::tiles::{Pattern, PatternCatalog, PatternId};

/// Which predicate propagation applies between neighbouring cells
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdjacencyRule {
    /// Apply the diagonal-overlap predicate at every neighbour offset
    #[default]
    Diagonal,
    /// Check agreement on the actual overlap for each neighbour offset
    Overlap,
}

/// Diagonal-overlap consistency between two patterns of equal size
///
/// True when every symbol of `a` at `(y, x)` with `x, y < size - 1` equals
/// the symbol of `b` at `(y + 1, x + 1)`. Always true for 1×1 patterns.
pub fn patterns_compatible(a: &Pattern, b: &Pattern) -> bool {
    let size = a.size();
    if size != b.size() {
        return false;
    }

    for y in 0..size.saturating_sub(1) {
        for x in 0..size.saturating_sub(1) {
            if a.cells().get(y * size + x) != b.cells().get((y + 1) * size + x + 1) {
                return false;
            }
        }
    }

    true
}

/// Agreement of two patterns on the region where they overlap
///
/// `neighbor` sits at offset `(dx, dy)` from `current`. Offsets beyond the
/// pattern size leave no overlap and are trivially compatible.
/// `patterns_compatible(a, b)` equals `patterns_compatible_at(a, b, 1, 1)`.
pub fn patterns_compatible_at(neighbor: &Pattern, current: &Pattern, dx: isize, dy: isize) -> bool {
    let size = current.size();
    if size != neighbor.size() {
        return false;
    }

    for row in 0..size {
        for col in 0..size {
            let (Some(neighbor_row), Some(neighbor_col)) =
                (row.checked_add_signed(-dy), col.checked_add_signed(-dx))
            else {
                continue;
            };
            if neighbor_row >= size || neighbor_col >= size {
                continue;
            }
            if neighbor.get(neighbor_row, neighbor_col) != current.get(row, col) {
                return false;
            }
        }
    }

    true
}

/// Precomputed compatibility between every pair of catalog patterns
///
/// For each neighbour pattern `p` (and, under [`AdjacencyRule::Overlap`],
/// each offset) stores the set of current-cell patterns that support `p`.
#[derive(Clone, Debug)]
pub struct CompatibilityRules {
    rule: AdjacencyRule,
    radius: usize,
    tables: Vec<Vec<CandidateSet>>,
}

impl CompatibilityRules {
    /// Evaluate the predicate for every ordered pattern pair
    pub fn build(catalog: &PatternCatalog, rule: AdjacencyRule) -> Self {
        let radius = catalog.pattern_size().saturating_sub(1);
        let patterns: Vec<&Pattern> = catalog.iter().map(|(_, pattern, _)| pattern).collect();

        let support_table = |compatible: &dyn Fn(&Pattern, &Pattern) -> bool| {
            patterns
                .iter()
                .map(|&neighbor| {
                    let mut supporters = CandidateSet::new(patterns.len());
                    for (id, &current) in patterns.iter().enumerate() {
                        if compatible(neighbor, current) {
                            supporters.insert(id);
                        }
                    }
                    supporters
                })
                .collect::<Vec<_>>()
        };

        let tables = match rule {
            AdjacencyRule::Diagonal => vec![support_table(&patterns_compatible)],
            AdjacencyRule::Overlap => {
                let span = radius as isize;
                (-span..=span)
                    .flat_map(|dy| (-span..=span).map(move |dx| (dx, dy)))
                    .map(|(dx, dy)| {
                        support_table(&|neighbor: &Pattern, current: &Pattern| {
                            patterns_compatible_at(neighbor, current, dx, dy)
                        })
                    })
                    .collect()
            }
        };

        Self {
            rule,
            radius,
            tables,
        }
    }

    /// Chebyshev radius of the neighbourhood a collapse influences
    pub const fn radius(&self) -> usize {
        self.radius
    }

    /// Predicate in use
    pub const fn rule(&self) -> AdjacencyRule {
        self.rule
    }

    /// Current-cell patterns compatible with `neighbor` at offset `(dx, dy)`
    pub fn supports(&self, neighbor: PatternId, dx: isize, dy: isize) -> Option<&CandidateSet> {
        let table = match self.rule {
            AdjacencyRule::Diagonal => self.tables.first(),
            AdjacencyRule::Overlap => {
                let span = self.radius as isize;
                if dx.abs() > span || dy.abs() > span {
                    return None;
                }
                let width = 2 * span + 1;
                self.tables.get(((dy + span) * width + dx + span) as usize)
            }
        };
        table.and_then(|table| table.get(neighbor))
    }

    /// Look up a single pattern pair
    pub fn is_compatible(
        &self,
        neighbor: PatternId,
        current: PatternId,
        dx: isize,
        dy: isize,
    ) -> bool {
        self.supports(neighbor, dx, dy)
            .is_some_and(|supporters| supporters.contains(current))
    }
}
