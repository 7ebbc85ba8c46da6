use std::fmt;

/// An associative binary operation used to combine the values held by a [`BinaryCounter`].
///
/// Only associativity is assumed, never commutativity: the counter always passes the value
/// built from *earlier* input as the left operand `x` and the value built from *later* input
/// as the right operand `y`.
///
/// Any `FnMut(T, T) -> T` closure is a `BinaryOperation`, so most callers never implement this
/// trait by hand. Implement it directly when the operation owns state that the caller needs to
/// recover after the reduction, eg the list pool owned by [`crate::min12::MergeOp`].
///
/// ```rust
/// # use binary_counter::BinaryOperation;
/// let mut concat = |x: String, y: String| x + &y;
/// assert_eq!(concat.combine("ab".to_string(), "c".to_string()), "abc");
/// ```
pub trait BinaryOperation<T> {
    /// Combine `x` (earlier input) with `y` (later input)
    fn combine(&mut self, x: T, y: T) -> T;
}

impl<T, F> BinaryOperation<T> for F
where
    F: FnMut(T, T) -> T,
{
    #[inline(always)]
    fn combine(&mut self, x: T, y: T) -> T {
        self(x, y)
    }
}

/// A [`BinaryOperation`] whose combinations leave no trace outside the returned value, so a
/// counter's digits may be reduced any number of times.
///
/// Closures and [`crate::min::MinOp`] qualify. [`crate::min12::MergeOp`] does not: combining
/// candidates frees the loser's list, so a [`BinaryCounter`] over it can only be reduced through
/// [`BinaryCounter::finish`].
///
/// ```compile_fail
/// # use binary_counter::BinaryCounter;
/// # use binary_counter::min12::{Candidate, MergeOp};
/// let v = [2, 1];
/// let mut counter = BinaryCounter::new(MergeOp::new(&v, |a: &i32, b: &i32| a < b), Candidate::new(2));
/// counter.add(Candidate::new(0));
/// counter.reduce();
/// ```
pub trait RepeatableOperation<T>: BinaryOperation<T> {}

impl<T, F> RepeatableOperation<T> for F where F: FnMut(T, T) -> T {}

/// Reduces a sequence under an associative operation using O(log n) intermediate storage,
/// the way binary addition propagates a carry.
///
/// # Motivation
///
/// Folding a sequence left to right builds a maximally unbalanced combination tree. The binary
/// counter instead combines values pairwise into a balanced tree without knowing the length of
/// the input in advance: digit `i` holds either the `zero` sentinel or the combination of a
/// run of exactly `2^i` consecutive inputs. Adding a value is incrementing the counter, and each
/// carry is one application of the operation, so `n` calls to [`BinaryCounter::add`] apply the
/// operation fewer than `n` times in total.
///
/// # Use
///
/// ```rust
/// # use binary_counter::BinaryCounter;
/// let mut counter = BinaryCounter::new(|x: String, y: String| x + &y, String::new());
/// for word in ["a", "b", "c", "d", "e"] {
///     counter.add(word.to_string());
/// }
///
/// // five inputs: 0b101, so digits 0 and 2 are occupied
/// assert_eq!(counter.slots(), ["e".to_string(), String::new(), "abcd".to_string()]);
/// assert_eq!(counter.reduce(), "abcde");
/// ```
pub struct BinaryCounter<T, Op> {
    // digit i is either `zero` or the combination of 2^i consecutive inputs.
    // later inputs live in lower digits.
    slots: Vec<T>,
    op: Op,
    zero: T,
}

impl<T, Op> BinaryCounter<T, Op>
where
    T: PartialEq + Clone,
    Op: BinaryOperation<T>,
{
    /// An empty counter for `op`, using `zero` to mark unoccupied digits.
    ///
    /// `zero` must be a value that no input can ever equal.
    pub fn new(op: Op, zero: T) -> Self {
        Self {
            slots: Vec::new(),
            op,
            zero,
        }
    }

    /// An empty counter with room for `capacity` digits, ie `2^capacity - 1` inputs,
    /// before the digit array reallocates.
    pub fn with_capacity(op: Op, zero: T, capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            op,
            zero,
        }
    }

    /// Ensure room for at least `capacity` digits in total.
    pub fn reserve(&mut self, capacity: usize) {
        if self.slots.len() < capacity {
            self.slots.reserve(capacity - self.slots.len());
        }
    }

    /// Add `x` to the counter, propagating the carry through the occupied digits.
    ///
    /// # Panics
    ///
    /// If `x` is the sentinel `zero` value.
    pub fn add(&mut self, x: T) {
        assert!(
            x != self.zero,
            "sentinel not allowed as input to BinaryCounter::add"
        );

        let mut carry = x;
        for slot in self.slots.iter_mut() {
            if *slot == self.zero {
                *slot = carry;
                return;
            }
            let current = std::mem::replace(slot, self.zero.clone());
            carry = self.op.combine(current, carry);
        }

        if carry != self.zero {
            tracing::trace!(digits = self.slots.len() + 1, "binary counter grew a digit");
            self.slots.push(carry);
        }
    }

    /// Consume the counter, returning the reduction and the operation.
    pub fn finish(self) -> (T, Op) {
        let Self {
            slots,
            mut op,
            zero,
        } = self;
        let res = fold_slots(slots.into_iter(), &mut op, &zero);
        (res, op)
    }
}

impl<T, Op> BinaryCounter<T, Op>
where
    T: PartialEq + Clone,
    Op: RepeatableOperation<T>,
{
    /// Combine every occupied digit into a single value, or return `zero` if nothing was added.
    ///
    /// Digits are visited from lowest to highest and folded as `op(digit, acc)`, so the result
    /// is the left-to-right combination of all inputs. The counter itself is left untouched, so
    /// calling `reduce` again without an intervening `add` gives the same answer.
    pub fn reduce(&mut self) -> T {
        let Self { slots, op, zero } = self;
        fold_slots(slots.iter().cloned(), op, zero)
    }
}

impl<T, Op> BinaryCounter<T, Op>
where
    T: PartialEq,
{
    /// Number of digits, occupied or not
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if no digit holds a value
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| *slot == self.zero)
    }

    /// The digits, lowest first
    pub fn slots(&self) -> &[T] {
        &self.slots
    }

    pub fn zero(&self) -> &T {
        &self.zero
    }

    pub fn operation(&self) -> &Op {
        &self.op
    }

    pub fn operation_mut(&mut self) -> &mut Op {
        &mut self.op
    }
}

impl<T: fmt::Debug, Op> fmt::Debug for BinaryCounter<T, Op> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryCounter")
            .field("zero", &self.zero)
            .field("slots", &self.slots)
            .finish()
    }
}

fn fold_slots<T, Op>(slots: impl Iterator<Item = T>, op: &mut Op, zero: &T) -> T
where
    T: PartialEq + Clone,
    Op: BinaryOperation<T>,
{
    // higher digits hold earlier input, so they go on the left
    slots
        .filter(|slot| slot != zero)
        .reduce(|acc, slot| op.combine(slot, acc))
        .unwrap_or_else(|| zero.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concat_counter() -> BinaryCounter<String, impl FnMut(String, String) -> String> {
        BinaryCounter::new(|x: String, y: String| x + &y, String::new())
    }

    #[test]
    fn empty_counter_reduces_to_zero() {
        let mut counter = BinaryCounter::new(|x: i64, y: i64| x.min(y), i64::MAX);
        assert!(counter.is_empty());
        assert_eq!(counter.len(), 0);
        assert_eq!(counter.reduce(), i64::MAX);
    }

    #[test]
    fn digits_follow_binary_representation() {
        let mut counter = BinaryCounter::new(|x: u32, y: u32| x + y, 0);
        for n in 1..=11u32 {
            counter.add(1);
            let occupied: Vec<bool> = counter.slots().iter().map(|s| *s != 0).collect();
            let expected: Vec<bool> = (0..counter.len()).map(|i| n & (1 << i) != 0).collect();
            assert_eq!(occupied, expected, "after {} adds", n);
            // digit i counts 2^i inputs
            for (i, slot) in counter.slots().iter().enumerate() {
                if *slot != 0 {
                    assert_eq!(*slot, 1 << i);
                }
            }
        }
        assert_eq!(counter.reduce(), 11);
    }

    #[test]
    fn concatenation_preserves_input_order() {
        let mut counter = concat_counter();
        let letters = "abcdefghijk";
        for c in letters.chars() {
            counter.add(c.to_string());
        }
        assert_eq!(counter.reduce(), letters);
    }

    #[test]
    fn reduce_is_idempotent() {
        let mut counter = concat_counter();
        for c in "xyzzy".chars() {
            counter.add(c.to_string());
        }
        let first = counter.reduce();
        let second = counter.reduce();
        assert_eq!(first, second);
        assert_eq!(counter.slots().len(), 3);
    }

    #[test]
    fn finish_returns_operation() {
        let mut calls = 0;
        let counter = {
            let mut counter = BinaryCounter::new(
                |x: u32, y: u32| {
                    calls += 1;
                    x.max(y)
                },
                0,
            );
            for x in [4, 9, 2, 7, 1] {
                counter.add(x);
            }
            counter
        };
        let (res, op) = counter.finish();
        drop(op);
        assert_eq!(res, 9);
        // 3 carries during add, then digits 0 and 2 combine once
        assert_eq!(calls, 4);
    }

    #[test]
    fn reserve_only_grows() {
        let mut counter = BinaryCounter::with_capacity(|x: u8, y: u8| x | y, 0, 4);
        assert!(counter.slots.capacity() >= 4);
        counter.reserve(2);
        assert!(counter.slots.capacity() >= 4);
        counter.reserve(32);
        assert!(counter.slots.capacity() >= 32);
    }

    #[test]
    #[should_panic(expected = "sentinel not allowed")]
    fn adding_the_sentinel_panics() {
        let mut counter = BinaryCounter::new(|x: i32, y: i32| x + y, 0);
        counter.add(0);
    }
}
