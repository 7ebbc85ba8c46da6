use crate::counter::{BinaryCounter, BinaryOperation, RepeatableOperation};

/// Digits reserved up front by the finders' counters, enough for 65535 inputs
pub(crate) const COUNTER_DIGITS: usize = 16;

/// Keeps the position of the lesser of two elements of `seq`.
///
/// `cmp` is a strict weak ordering ("is less than"). On ties the left operand, which the
/// counter always builds from earlier positions, wins.
pub struct MinOp<'a, T, C> {
    seq: &'a [T],
    cmp: C,
}

impl<'a, T, C> MinOp<'a, T, C>
where
    C: Fn(&T, &T) -> bool,
{
    pub fn new(seq: &'a [T], cmp: C) -> Self {
        Self { seq, cmp }
    }

    /// Compare the elements at two positions
    #[inline(always)]
    pub fn less(&self, x: usize, y: usize) -> bool {
        (self.cmp)(&self.seq[x], &self.seq[y])
    }
}

impl<'a, T, C> BinaryOperation<usize> for MinOp<'a, T, C>
where
    C: Fn(&T, &T) -> bool,
{
    #[inline(always)]
    fn combine(&mut self, x: usize, y: usize) -> usize {
        if self.less(y, x) {
            y
        } else {
            x
        }
    }
}

impl<'a, T, C> RepeatableOperation<usize> for MinOp<'a, T, C> where C: Fn(&T, &T) -> bool {}

/// Position of the leftmost minimal element of `seq` under `cmp`, or `seq.len()` if `seq` is
/// empty.
///
/// ```rust
/// # use binary_counter::find_min;
/// let v = [9, 13, 7, 124, 32, 17, 8, 32, 3, 237, 417, 41, 42, 13, 14, 15];
/// assert_eq!(find_min(&v, |a, b| a < b), 8);
/// assert_eq!(find_min(&v, |a, b| a > b), 10);
/// assert_eq!(find_min::<u8, _>(&[], |a, b| a < b), 0);
/// ```
pub fn find_min<T, C>(seq: &[T], cmp: C) -> usize
where
    C: Fn(&T, &T) -> bool,
{
    // one past the end is never a valid position
    let end = seq.len();
    let mut counter = BinaryCounter::with_capacity(MinOp::new(seq, cmp), end, COUNTER_DIGITS);
    for position in 0..end {
        counter.add(position);
    }
    counter.reduce()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_min_of_sample() {
        let v = vec![3, 8, 0, 7, 9, 1, 2, 5];
        assert_eq!(find_min(&v, |a, b| a < b), 2);
    }

    #[test]
    fn single_element() {
        assert_eq!(find_min(&[42], |a, b| a < b), 0);
    }

    #[test]
    fn ties_go_to_the_leftmost_element() {
        let v = [5, 1, 4, 1, 1, 3, 1];
        assert_eq!(find_min(&v, |a, b| a < b), 1);

        let same = [7; 37];
        assert_eq!(find_min(&same, |a, b| a < b), 0);
    }

    #[test]
    fn comparator_decides_order() {
        let words = ["pear", "fig", "banana", "kiwi", "apple"];
        assert_eq!(find_min(&words, |a, b| a.len() < b.len()), 1);
        assert_eq!(find_min(&words, |a, b| a < b), 4);
        assert_eq!(find_min(&words, |a, b| a.len() > b.len()), 2);
    }

    #[test]
    fn min_op_prefers_left_on_ties() {
        let v = [2, 2];
        let mut op = MinOp::new(&v, |a: &i32, b: &i32| a < b);
        assert_eq!(op.combine(0, 1), 0);
        assert_eq!(op.combine(1, 0), 1);
    }
}
