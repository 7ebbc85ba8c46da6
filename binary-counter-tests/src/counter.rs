#[cfg(test)]
use binary_counter::BinaryCounter;
use proptest::prelude::*;

/// Inputs that never collide with `i64::MAX`, the sentinel of a min counter
pub fn arb_values() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1000..1000i64, 0..300)
}

/// Non-empty words, so the empty string can serve as the sentinel of a concatenation counter
pub fn arb_words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,3}", 0..100)
}

#[cfg(test)]
proptest! {
    #[test]
    fn reduce_twice_gives_same_answer(values in arb_values()) {
        let mut counter = BinaryCounter::new(|x: i64, y: i64| x.min(y), i64::MAX);
        for v in values.iter() {
            counter.add(*v);
        }
        let first = counter.reduce();
        let second = counter.reduce();

        prop_assert_eq!(first, second);
        prop_assert_eq!(first, values.iter().copied().min().unwrap_or(i64::MAX));
    }

    #[test]
    fn commutative_op_ignores_insertion_order(
        (values, shuffled) in arb_values().prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        let reduce_all = |input: &[i64]| {
            let mut counter = BinaryCounter::new(|x: i64, y: i64| x.min(y), i64::MAX);
            for v in input {
                counter.add(*v);
            }
            counter.reduce()
        };

        prop_assert_eq!(reduce_all(&values), reduce_all(&shuffled));
    }

    #[test]
    fn concatenation_keeps_input_order(words in arb_words()) {
        let mut counter = BinaryCounter::new(|x: String, y: String| x + &y, String::new());
        for w in words.iter() {
            counter.add(w.clone());
        }

        prop_assert_eq!(counter.reduce(), words.concat());
    }

    #[test]
    fn digits_mirror_the_count(values in arb_values()) {
        let mut applied = 0usize;
        let mut counter = BinaryCounter::new(
            |x: i64, y: i64| {
                applied += 1;
                x.min(y)
            },
            i64::MAX,
        );
        for v in values.iter() {
            counter.add(*v);
        }

        let n = values.len();
        let occupied: Vec<bool> = counter.slots().iter().map(|s| *s != i64::MAX).collect();
        let expected: Vec<bool> = (0..counter.len()).map(|i| n & (1 << i) != 0).collect();
        prop_assert_eq!(occupied, expected);
        prop_assert_eq!(counter.len(), (usize::BITS - n.leading_zeros()) as usize);

        // each combine merges two runs into one: n inputs end up in popcount(n) digits
        drop(counter);
        prop_assert_eq!(applied, n - n.count_ones() as usize);
    }
}
