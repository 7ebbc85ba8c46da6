#[cfg(test)]
use binary_counter::{find_min, find_min12, linear};
use proptest::prelude::*;

/// Leftmost minimal position of `seq`, or `seq.len()` if empty, by comparing every element
/// against every other.
pub fn naive_min<T, C: Fn(&T, &T) -> bool>(seq: &[T], cmp: C) -> usize {
    (0..seq.len())
        .find(|&i| (0..seq.len()).all(|j| !cmp(&seq[j], &seq[i])))
        .unwrap_or(seq.len())
}

/// Leftmost minimal position of `seq` once position `taken` is removed, or `taken` if nothing
/// remains.
pub fn naive_min_without<T, C: Fn(&T, &T) -> bool>(seq: &[T], taken: usize, cmp: C) -> usize {
    let rest: Vec<usize> = (0..seq.len()).filter(|&i| i != taken).collect();
    rest.iter()
        .copied()
        .find(|&i| rest.iter().all(|&j| !cmp(&seq[j], &seq[i])))
        .unwrap_or(taken)
}

/// Short sequences over a small alphabet, so ties are common
pub fn arb_seq() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(0..8i32, 0..200)
}

#[cfg(test)]
proptest! {
    #[test]
    fn find_min_is_leftmost_min(seq in arb_seq()) {
        let less = |a: &i32, b: &i32| a < b;
        let min = find_min(&seq, less);

        prop_assert_eq!(min, naive_min(&seq, less));
        prop_assert_eq!(min, linear::min_element(&seq, less));
    }

    #[test]
    fn find_min_by_greater_is_leftmost_max(seq in arb_seq()) {
        let greater = |a: &i32, b: &i32| a > b;
        prop_assert_eq!(find_min(&seq, greater), naive_min(&seq, greater));
    }

    #[test]
    fn find_min_with_coarse_ordering(seq in prop::collection::vec(any::<i32>(), 0..200)) {
        // many distinct values fall into each equivalence class
        let by_residue = |a: &i32, b: &i32| a.rem_euclid(5) < b.rem_euclid(5);
        prop_assert_eq!(find_min(&seq, by_residue), naive_min(&seq, by_residue));
    }

    #[test]
    fn find_min12_matches_reference(seq in arb_seq()) {
        let less = |a: &i32, b: &i32| a < b;
        let (min1, min2) = find_min12(&seq, less);

        prop_assert_eq!(min1, find_min(&seq, less));
        if seq.len() < 2 {
            prop_assert_eq!(min1, min2);
        } else {
            prop_assert_ne!(min1, min2);
            prop_assert_eq!(min2, naive_min_without(&seq, min1, less));
        }
        prop_assert_eq!((min1, min2), linear::min_element12(&seq, less));
    }

    #[test]
    fn find_min12_with_coarse_ordering(seq in prop::collection::vec(any::<i32>(), 2..200)) {
        let by_residue = |a: &i32, b: &i32| a.rem_euclid(7) < b.rem_euclid(7);
        let (min1, min2) = find_min12(&seq, by_residue);

        prop_assert_eq!(min1, naive_min(&seq, by_residue));
        prop_assert_eq!(min2, naive_min_without(&seq, min1, by_residue));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_single() {
        let less = |a: &u8, b: &u8| a < b;
        assert_eq!(find_min(&[], less), 0);
        assert_eq!(find_min12(&[], less), (0, 0));
        assert_eq!(find_min(&[9], less), 0);
        assert_eq!(find_min12(&[9], less), (0, 0));
    }

    #[test]
    fn sample_inputs() {
        let less = |a: &i32, b: &i32| a < b;

        let v = [9, 13, 7, 124, 32, 17, 8, 32, 3, 237, 417, 41, 42, 13, 14, 15];
        assert_eq!(find_min(&v, less), 8);
        assert_eq!(find_min12(&v, less), (8, 2));
        assert_eq!(naive_min_without(&v, 8, less), 2);

        let v = [3, 8, 0, 7, 9, 1, 2, 5];
        assert_eq!(find_min(&v, less), 2);
        assert_eq!(find_min12(&v, less), (2, 5));
    }

    #[test]
    fn large_permutation() {
        let n = 1 << 14;
        // odd multiplier, so this permutes 0..n
        let v: Vec<u64> = (0..n).map(|i: u64| (i * 2_654_435_761) % n).collect();
        let less = |a: &u64, b: &u64| a < b;
        let (min1, min2) = find_min12(&v, less);
        assert_eq!((v[min1], v[min2]), (0, 1));
    }
}
