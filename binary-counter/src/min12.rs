//! Minimum and second minimum in one tournament.
//!
//! Every candidate in the counter carries the list of positions it has beaten directly. When two
//! candidates meet, the winner prepends the loser's position to its own list and the loser's list
//! goes back to the pool: the runner-up overall can only have been knocked out by the overall
//! winner, so nothing the loser beat is ever needed again. After the reduction the winner's list
//! holds O(log n) positions and a linear scan over it finds the second minimum.

use crate::counter::{BinaryCounter, BinaryOperation};
use crate::min::{MinOp, COUNTER_DIGITS};
use crate::pool::{List, ListPool};

const POOL_NODES: usize = 256;

/// A position still in contention, with the positions it has beaten directly.
///
/// The `defeated` list is owned by this candidate alone; it is freed when the candidate loses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub position: usize,
    pub defeated: List,
}

impl Candidate {
    /// A candidate that has not played yet
    pub fn new(position: usize) -> Self {
        Self {
            position,
            defeated: List::empty(),
        }
    }
}

/// Plays two candidates against each other, recording the loser in the winner's defeated list.
pub struct MergeOp<'a, T, C> {
    min: MinOp<'a, T, C>,
    pool: ListPool<usize>,
}

impl<'a, T, C> MergeOp<'a, T, C>
where
    C: Fn(&T, &T) -> bool,
{
    pub fn new(seq: &'a [T], cmp: C) -> Self {
        Self::with_pool(seq, cmp, ListPool::with_capacity(POOL_NODES))
    }

    pub fn with_pool(seq: &'a [T], cmp: C, pool: ListPool<usize>) -> Self {
        Self {
            min: MinOp::new(seq, cmp),
            pool,
        }
    }

    pub fn pool(&self) -> &ListPool<usize> {
        &self.pool
    }

    /// The best position `winner` beat directly, ties going to the smaller position.
    pub fn best_defeated(&self, winner: &Candidate) -> Option<usize> {
        self.pool
            .iter(winner.defeated.front)
            .map(|(_, position)| *position)
            .reduce(|best, position| {
                let better = self.min.less(position, best)
                    || (!self.min.less(best, position) && position < best);
                if better {
                    position
                } else {
                    best
                }
            })
    }
}

impl<'a, T, C> BinaryOperation<Candidate> for MergeOp<'a, T, C>
where
    C: Fn(&T, &T) -> bool,
{
    fn combine(&mut self, x: Candidate, y: Candidate) -> Candidate {
        let (winner, loser) = if self.min.less(y.position, x.position) {
            (y, x)
        } else {
            (x, y)
        };
        // free first so the push below reuses one of the loser's nodes
        self.pool.free_list(loser.defeated);
        Candidate {
            position: winner.position,
            defeated: self.pool.push_front(winner.defeated, loser.position),
        }
    }
}

/// Positions of the minimum and the second minimum of `seq` under `cmp`.
///
/// The first position is the leftmost minimal element, exactly as [`crate::find_min`] returns.
/// The second is the leftmost minimal element of what remains once the first is taken out.
/// With fewer than two elements there is no second minimum and both positions are equal: the
/// single element, or `seq.len()` (end) for an empty slice.
///
/// ```rust
/// # use binary_counter::find_min12;
/// let v = [3, 8, 0, 7, 9, 1, 2, 5];
/// assert_eq!(find_min12(&v, |a, b| a < b), (2, 5));
/// assert_eq!(find_min12(&[3], |a, b| a < b), (0, 0));
/// ```
pub fn find_min12<T, C>(seq: &[T], cmp: C) -> (usize, usize)
where
    C: Fn(&T, &T) -> bool,
{
    let zero = Candidate::new(seq.len());
    let mut counter = BinaryCounter::with_capacity(MergeOp::new(seq, cmp), zero, COUNTER_DIGITS);
    for position in 0..seq.len() {
        counter.add(Candidate::new(position));
    }

    // merging frees the losers' lists, so reduce exactly once
    let (winner, op) = counter.finish();
    let runner_up = op.best_defeated(&winner).unwrap_or(winner.position);

    tracing::debug!(
        len = seq.len(),
        pool_size = op.pool().size(),
        min1 = winner.position,
        min2 = runner_up,
        "found min and second min"
    );
    (winner.position, runner_up)
}
