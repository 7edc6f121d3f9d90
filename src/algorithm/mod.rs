/// Fixed-size bitset over catalog pattern ids
pub mod bitset;
/// Pattern compatibility predicates and precomputed support tables
pub mod compatibility;
/// Solver orchestration of the observe, collapse and propagate loop
pub mod executor;
/// Worklist-driven constraint propagation
pub mod propagation;
/// Weighted collapse of a selected cell
pub mod selection;
