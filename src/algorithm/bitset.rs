use crate::spatial::tiles::PatternId;
use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset tracking which catalog patterns remain possible in a cell
///
/// Uses the 0-based pattern ids assigned by the catalog. Iteration always
/// yields ids in ascending order, so the first candidate is the one the
/// catalog discovered earliest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateSet {
    bits: BitVec,
    capacity: usize,
}

impl CandidateSet {
    /// Create a set with no patterns present
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
            capacity,
        }
    }

    /// Create a set containing every pattern id below `capacity`
    pub fn all(capacity: usize) -> Self {
        Self {
            bits: bitvec![1; capacity],
            capacity,
        }
    }

    /// Create a set holding exactly one pattern
    pub fn singleton(capacity: usize, pattern: PatternId) -> Self {
        let mut set = Self::new(capacity);
        set.insert(pattern);
        set
    }

    /// Insert a pattern id, ignoring ids outside the capacity
    pub fn insert(&mut self, pattern: PatternId) {
        if pattern < self.capacity {
            self.bits.set(pattern, true);
        }
    }

    /// Test pattern membership
    pub fn contains(&self, pattern: PatternId) -> bool {
        self.bits.get(pattern).as_deref() == Some(&true)
    }

    /// Test whether the two sets share at least one pattern
    pub fn intersects(&self, other: &Self) -> bool {
        self.bits.iter_ones().any(|pattern| other.contains(pattern))
    }

    /// Keep only the patterns for which `keep` returns true
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(PatternId) -> bool,
    {
        let removed: Vec<PatternId> = self
            .bits
            .iter_ones()
            .filter(|&pattern| !keep(pattern))
            .collect();
        for pattern in removed {
            self.bits.set(pattern, false);
        }
    }

    /// Test if no patterns are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count patterns in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Lowest pattern id in the set
    pub fn first(&self) -> Option<PatternId> {
        self.bits.first_one()
    }

    /// Number of pattern ids the set can hold
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate pattern ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = PatternId> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all pattern ids as a vector
    pub fn to_vec(&self) -> Vec<PatternId> {
        self.iter().collect()
    }
}

impl fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CandidateSet({} patterns: {:?})",
            self.count(),
            self.to_vec()
        )
    }
}
