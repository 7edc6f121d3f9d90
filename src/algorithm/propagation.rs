//! Worklist-driven constraint propagation
//!
//! After a collapse, every neighbour within the pattern radius drops the
//! patterns no longer supported by the current cell. Any neighbour that
//! shrinks is pushed onto the worklist in turn, until nothing changes.

use tracing::trace;

use crate::algorithm::bitset::CandidateSet;
use crate::algorithm::compatibility::CompatibilityRules;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::{GridPosition, Neighbor, OutputGrid};

/// What to do when a neighbour would lose every candidate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Keep the neighbour's first original candidate and carry on
    #[default]
    KeepFirst,
    /// Abort the run with [`AlgorithmError::Contradiction`]
    Fail,
}

/// Result of constraining one neighbour against the current cell
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constrained {
    /// Every neighbour candidate is still supported
    Unchanged,
    /// Some candidates were dropped; holds the survivors
    Narrowed(CandidateSet),
    /// No candidate survived; holds the neighbour's first original candidate
    Conflict {
        /// Lowest pattern id the neighbour held before constraining
        fallback: usize,
    },
}

/// Counters gathered over one propagation pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Worklist entries processed
    pub visited: usize,
    /// Candidates removed from neighbours
    pub removed: usize,
    /// Neighbours rescued by the first-candidate fallback
    pub conflicts: usize,
}

/// Keep only neighbour candidates compatible with at least one current candidate
///
/// `dx`/`dy` give the neighbour's offset from the current cell.
pub fn constrain(
    neighbor: &CandidateSet,
    current: &CandidateSet,
    rules: &CompatibilityRules,
    dx: isize,
    dy: isize,
) -> Constrained {
    let mut kept = neighbor.clone();
    kept.retain(|pattern| {
        rules
            .supports(pattern, dx, dy)
            .is_some_and(|supporters| supporters.intersects(current))
    });

    if kept.is_empty() {
        return neighbor
            .first()
            .map_or(Constrained::Unchanged, |fallback| Constrained::Conflict {
                fallback,
            });
    }

    if kept.count() == neighbor.count() {
        Constrained::Unchanged
    } else {
        Constrained::Narrowed(kept)
    }
}

/// Propagate the constraints of `origin` until a fixpoint is reached
///
/// The worklist is a stack; each popped coordinate is the current cell for
/// its own neighbourhood. Candidate sets only ever shrink.
///
/// # Errors
///
/// Returns [`AlgorithmError::Contradiction`] when a neighbour would become
/// empty and `policy` is [`ConflictPolicy::Fail`]. The iteration field is
/// left at zero for the caller to fill in.
pub fn propagate(
    grid: &mut OutputGrid,
    rules: &CompatibilityRules,
    origin: GridPosition,
    policy: ConflictPolicy,
) -> Result<PropagationReport> {
    let mut report = PropagationReport::default();
    let mut worklist = vec![origin];

    while let Some(current) = worklist.pop() {
        report.visited += 1;

        let Some(current_candidates) = grid.cell(current).map(|cell| cell.candidates().clone())
        else {
            continue;
        };
        let neighbors: Vec<Neighbor> = grid.neighbors(current, rules.radius()).collect();

        for neighbor in neighbors {
            let Some(cell) = grid.cell_mut(neighbor.position) else {
                continue;
            };
            let before = cell.candidates().count();

            match constrain(
                cell.candidates(),
                &current_candidates,
                rules,
                neighbor.dx,
                neighbor.dy,
            ) {
                Constrained::Unchanged => {}
                Constrained::Narrowed(kept) => {
                    report.removed += before - kept.count();
                    cell.replace_candidates(kept);
                    worklist.push(neighbor.position);
                }
                Constrained::Conflict { fallback } => {
                    if policy == ConflictPolicy::Fail {
                        return Err(AlgorithmError::Contradiction {
                            position: [neighbor.position.x, neighbor.position.y],
                            iteration: 0,
                        });
                    }

                    report.conflicts += 1;
                    trace!(
                        x = neighbor.position.x,
                        y = neighbor.position.y,
                        fallback,
                        "no supported candidate, keeping first"
                    );

                    if before > 1 {
                        report.removed += before - 1;
                        let capacity = cell.candidates().capacity();
                        cell.replace_candidates(CandidateSet::singleton(capacity, fallback));
                        worklist.push(neighbor.position);
                    }
                }
            }
        }
    }

    Ok(report)
}
