//! Tests for `CandidateSet` membership, filtering and ordering

#[cfg(test)]
mod tests {
    use wavetile::algorithm::bitset::CandidateSet;

    // Verifies a new set is empty with count 0
    // Verified by initializing bitset with all bits set to 1
    #[test]
    fn test_new_candidate_set() {
        let set = CandidateSet::new(10);
        assert_eq!(set.count(), 0);
        assert!(set.is_empty());
        assert_eq!(set.capacity(), 10);
        assert_eq!(set.first(), None);
    }

    // Tests that `all` holds every id below capacity
    // Verified by filling one fewer bit
    #[test]
    fn test_all_contains_every_pattern() {
        let set = CandidateSet::all(4);
        assert_eq!(set.to_vec(), vec![0, 1, 2, 3]);
        assert!(!set.contains(4));
    }

    // Tests insertion and containment checking
    // Verified by removing the bit-setting logic from insert method
    #[test]
    fn test_insert_and_contains() {
        let mut set = CandidateSet::new(10);
        set.insert(5);
        assert!(set.contains(5));
        assert!(!set.contains(3));
        assert_eq!(set.count(), 1);
    }

    // Tests that ids beyond capacity are ignored rather than growing the set
    // Verified by removing the capacity guard in insert
    #[test]
    fn test_insert_out_of_range_ignored() {
        let mut set = CandidateSet::new(3);
        set.insert(7);
        assert!(set.is_empty());
        assert!(!set.contains(7));
    }

    // Tests singleton holds exactly one id
    // Verified by building singleton from `all`
    #[test]
    fn test_singleton() {
        let set = CandidateSet::singleton(6, 4);
        assert_eq!(set.to_vec(), vec![4]);
        assert_eq!(set.first(), Some(4));
        assert_eq!(set.capacity(), 6);
    }

    // Tests intersection test between sets
    // Verified by replacing `any` with `all`
    #[test]
    fn test_intersects() {
        let mut a = CandidateSet::new(10);
        a.insert(1);
        a.insert(3);

        let mut b = CandidateSet::new(10);
        b.insert(3);
        b.insert(7);

        let mut c = CandidateSet::new(10);
        c.insert(8);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(!CandidateSet::new(10).intersects(&a));
    }

    // Tests retain drops rejected ids and keeps the rest in order
    // Verified by inverting the keep predicate
    #[test]
    fn test_retain() {
        let mut set = CandidateSet::all(8);
        set.retain(|id| id % 3 == 0);
        assert_eq!(set.to_vec(), vec![0, 3, 6]);

        set.retain(|_| false);
        assert!(set.is_empty());
    }

    // Tests first returns the lowest id
    // Verified by returning the last set bit instead
    #[test]
    fn test_first_is_lowest() {
        let mut set = CandidateSet::new(10);
        set.insert(9);
        set.insert(2);
        set.insert(5);
        assert_eq!(set.first(), Some(2));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![2, 5, 9]);
    }

    // Tests display output lists ids
    // Verified by changing the format string
    #[test]
    fn test_display() {
        let mut set = CandidateSet::new(4);
        set.insert(1);
        set.insert(2);
        assert_eq!(set.to_string(), "CandidateSet(2 patterns: [1, 2])");
    }
}
