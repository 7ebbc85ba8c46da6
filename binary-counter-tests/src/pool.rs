use binary_counter::pool::{List, ListHandle, ListPool};
use proptest::prelude::*;

/// One step against a set of lists sharing a pool. List indices wrap around the live lists.
#[derive(Debug, Clone)]
pub enum PoolOp {
    NewList,
    PushFront(usize, u32),
    PushBack(usize, u32),
    PopFront(usize),
    FreeList(usize),
}

pub fn arb_pool_ops() -> impl Strategy<Value = Vec<PoolOp>> {
    let op = prop_oneof![
        Just(PoolOp::NewList),
        (any::<usize>(), any::<u32>()).prop_map(|(l, v)| PoolOp::PushFront(l, v)),
        (any::<usize>(), any::<u32>()).prop_map(|(l, v)| PoolOp::PushBack(l, v)),
        any::<usize>().prop_map(PoolOp::PopFront),
        any::<usize>().prop_map(PoolOp::FreeList),
    ];
    prop::collection::vec(op, 0..400)
}

/// Lists in a pool next to a plain model of their contents
pub struct PoolModel {
    pub pool: ListPool<u32>,
    pub lists: Vec<(List, Vec<u32>)>,
}

impl PoolModel {
    pub fn new() -> Self {
        Self {
            pool: ListPool::new(),
            lists: vec![(List::empty(), Vec::new())],
        }
    }

    pub fn live(&self) -> usize {
        self.lists.iter().map(|(_, model)| model.len()).sum()
    }

    pub fn apply(&mut self, op: PoolOp) {
        let n = self.lists.len();
        match op {
            PoolOp::NewList => self.lists.push((List::empty(), Vec::new())),
            PoolOp::PushFront(l, v) => {
                let (list, model) = &mut self.lists[l % n];
                *list = self.pool.push_front(*list, v);
                model.insert(0, v);
            }
            PoolOp::PushBack(l, v) => {
                let (list, model) = &mut self.lists[l % n];
                *list = self.pool.push_back(*list, v);
                model.push(v);
            }
            PoolOp::PopFront(l) => {
                let (list, model) = &mut self.lists[l % n];
                if !list.is_empty() {
                    let next = self.pool.free(list.front);
                    *list = if ListPool::<u32>::is_end(next) {
                        List::empty()
                    } else {
                        List {
                            front: next,
                            back: list.back,
                        }
                    };
                    model.remove(0);
                }
            }
            PoolOp::FreeList(l) => {
                let (list, model) = &mut self.lists[l % n];
                self.pool.free_list(*list);
                *list = List::empty();
                model.clear();
            }
        }
    }
}

impl Default for PoolModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Length of the chain starting at `front`, or `None` if it does not reach the end within
/// `limit` steps.
pub fn chain_len(pool: &ListPool<u32>, front: ListHandle, limit: usize) -> Option<usize> {
    let mut x = front;
    for len in 0..=limit {
        if ListPool::<u32>::is_end(x) {
            return Some(len);
        }
        x = pool.next(x);
    }
    None
}

#[cfg(test)]
proptest! {
    #[test]
    fn chains_terminate_and_match_model(ops in arb_pool_ops()) {
        let mut m = PoolModel::new();
        for op in ops {
            m.apply(op);

            let live = m.live();
            for (list, model) in m.lists.iter() {
                prop_assert_eq!(chain_len(&m.pool, list.front, live), Some(model.len()));
                let values: Vec<u32> = m.pool.iter(list.front).map(|(_, v)| *v).collect();
                prop_assert_eq!(&values, model);
                if !list.is_empty() {
                    prop_assert!(ListPool::<u32>::is_end(m.pool.next(list.back)));
                }
            }
            // every slot is either live or on the free-list, never both
            prop_assert_eq!(m.pool.free_len() + live, m.pool.size());
        }
    }

    #[test]
    fn freed_slots_are_reused_before_growing(ops in arb_pool_ops()) {
        let mut m = PoolModel::new();
        for op in ops {
            let size = m.pool.size();
            let free = m.pool.free_len();
            let grows = matches!(op, PoolOp::PushFront(..) | PoolOp::PushBack(..));
            m.apply(op);
            if grows {
                let expected = if free > 0 { size } else { size + 1 };
                prop_assert_eq!(m.pool.size(), expected);
            }
        }
    }
}
