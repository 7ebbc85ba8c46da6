//! A pool of singly-linked list nodes addressed by index.
//!
//! All lists allocated from one [`ListPool`] share its backing vector. Freed nodes are threaded
//! onto a free-list through their own `next` field and handed out again by later allocations,
//! so a workload that frees as fast as it allocates never grows the pool.

use std::fmt;

/// Identifies a node inside a [`ListPool`].
///
/// Index `0` is reserved for [`ListPool::end`], the terminator of every list. Each handle also
/// carries the generation of the slot it was allocated from; the pool bumps a slot's generation
/// whenever it recycles the slot, so a handle kept past its slot's reuse is rejected by the
/// accessors. A node freed on its own, or the front or back of a freed range, is also flagged
/// as free until it is recycled, and the accessors reject it in the meantime.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListHandle {
    index: usize,
    generation: u32,
}

impl ListHandle {
    const END: ListHandle = ListHandle {
        index: 0,
        generation: 0,
    };

    /// Position of the node in the pool, starting at 1
    pub fn index(self) -> usize {
        self.index
    }
}

impl fmt::Debug for ListHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.index == 0 {
            write!(f, "ListHandle(end)")
        } else {
            write!(f, "ListHandle({}v{})", self.index, self.generation)
        }
    }
}

/// The extremities of a list in a [`ListPool`], for O(1) appends and O(1) whole-list frees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct List {
    pub front: ListHandle,
    pub back: ListHandle,
}

impl List {
    pub const fn empty() -> Self {
        List {
            front: ListHandle::END,
            back: ListHandle::END,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.front.index == 0
    }
}

impl Default for List {
    fn default() -> Self {
        List::empty()
    }
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    next: ListHandle,
    generation: u32,
    free: bool,
}

/// A growable pool of list nodes with a free-list.
///
/// ```rust
/// # use binary_counter::pool::{List, ListPool};
/// let mut pool = ListPool::new();
/// let list = pool.push_front(List::empty(), 'b');
/// let list = pool.push_front(list, 'a');
/// let list = pool.push_back(list, 'c');
///
/// let values: String = pool.iter(list.front).map(|(_, c)| *c).collect();
/// assert_eq!(values, "abc");
///
/// pool.free_list(list);
/// assert_eq!(pool.free_len(), 3);
///
/// // freed nodes are recycled before the pool grows
/// pool.allocate('z', ListPool::<char>::end());
/// assert_eq!(pool.size(), 3);
/// ```
pub struct ListPool<T> {
    nodes: Vec<Node<T>>,
    free_list: ListHandle,
}

impl<T> ListPool<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free_list: ListHandle::END,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free_list: ListHandle::END,
        }
    }

    /// The handle terminating every list
    pub fn end() -> ListHandle {
        ListHandle::END
    }

    pub fn is_end(x: ListHandle) -> bool {
        x.index == 0
    }

    /// True if the pool has never allocated a node
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of node slots, live or free
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Ensure room for at least `capacity` node slots in total.
    pub fn reserve(&mut self, capacity: usize) {
        if self.nodes.len() < capacity {
            self.nodes.reserve(capacity - self.nodes.len());
        }
    }

    /// Number of node slots currently on the free-list.
    ///
    /// Walks the free-list, so this is O(free nodes).
    pub fn free_len(&self) -> usize {
        let mut len = 0;
        let mut x = self.free_list;
        while !Self::is_end(x) {
            len += 1;
            x = self.nodes[x.index - 1].next;
        }
        len
    }

    fn slot(&self, x: ListHandle) -> Option<&Node<T>> {
        x.index
            .checked_sub(1)
            .and_then(|i| self.nodes.get(i))
            .filter(|node| node.generation == x.generation && !node.free)
    }

    fn node(&self, x: ListHandle) -> &Node<T> {
        match self.slot(x) {
            Some(node) => node,
            None => panic!("invalid list handle {:?}", x),
        }
    }

    fn node_mut(&mut self, x: ListHandle) -> &mut Node<T> {
        let valid = self.slot(x).is_some();
        if !valid {
            panic!("invalid list handle {:?}", x);
        }
        &mut self.nodes[x.index - 1]
    }

    /// True if `x` refers to a live node allocated from this pool.
    ///
    /// Interior nodes of a range passed to [`ListPool::free_range`] are not flagged, so they stay
    /// addressable until the pool hands their slots out again.
    pub fn contains(&self, x: ListHandle) -> bool {
        self.slot(x).is_some()
    }

    /// The value stored at `x`, if `x` is valid for this pool.
    pub fn get(&self, x: ListHandle) -> Option<&T> {
        self.slot(x).map(|node| &node.value)
    }

    /// # Panics
    ///
    /// If `x` is the end handle or stale.
    pub fn value(&self, x: ListHandle) -> &T {
        &self.node(x).value
    }

    pub fn value_mut(&mut self, x: ListHandle) -> &mut T {
        &mut self.node_mut(x).value
    }

    /// # Panics
    ///
    /// If `x` is the end handle or stale.
    pub fn next(&self, x: ListHandle) -> ListHandle {
        self.node(x).next
    }

    pub fn next_mut(&mut self, x: ListHandle) -> &mut ListHandle {
        &mut self.node_mut(x).next
    }

    /// Allocate a node holding `value` and pointing at `next`, reusing the head of the
    /// free-list if there is one.
    pub fn allocate(&mut self, value: T, next: ListHandle) -> ListHandle {
        if Self::is_end(self.free_list) {
            if self.nodes.len() == self.nodes.capacity() {
                tracing::trace!(
                    size = self.nodes.len(),
                    "list pool backing storage reallocating"
                );
            }
            self.nodes.push(Node {
                value,
                next,
                generation: 0,
                free: false,
            });
            return ListHandle {
                index: self.nodes.len(),
                generation: 0,
            };
        }

        let index = self.free_list.index;
        let node = &mut self.nodes[index - 1];
        self.free_list = node.next;
        node.generation = node.generation.wrapping_add(1);
        node.free = false;
        node.value = value;
        node.next = next;
        ListHandle {
            index,
            generation: node.generation,
        }
    }

    /// Return the single node `x` to the free-list, handing back what it pointed to.
    ///
    /// # Panics
    ///
    /// If `x` is the end handle, stale, or already free.
    pub fn free(&mut self, x: ListHandle) -> ListHandle {
        let free_list = self.free_list;
        let node = self.node_mut(x);
        node.free = true;
        let next = std::mem::replace(&mut node.next, free_list);
        self.free_list = x;
        next
    }

    /// Return the whole chain `front..=back` to the free-list in O(1), handing back what `back`
    /// pointed to. An empty range (`front` is end) frees nothing and hands back `back`.
    ///
    /// `back` must be reachable from `front`; this is not checked. Only `front` and `back` are
    /// flagged as free, so freeing an interior node of the range a second time goes undetected.
    ///
    /// # Panics
    ///
    /// If `front` or `back` is stale or already free.
    pub fn free_range(&mut self, front: ListHandle, back: ListHandle) -> ListHandle {
        if Self::is_end(front) {
            return back;
        }
        assert!(
            self.contains(front) && self.contains(back),
            "invalid list range {:?}..={:?}",
            front,
            back
        );
        let free_list = self.free_list;
        let next = std::mem::replace(&mut self.nodes[back.index - 1].next, free_list);
        self.nodes[back.index - 1].free = true;
        self.nodes[front.index - 1].free = true;
        self.free_list = front;
        next
    }

    /// Prepend `value` to `list`.
    pub fn push_front(&mut self, list: List, value: T) -> List {
        let front = self.allocate(value, list.front);
        List {
            front,
            back: if list.is_empty() { front } else { list.back },
        }
    }

    /// Append `value` to `list`.
    pub fn push_back(&mut self, list: List, value: T) -> List {
        let back = self.allocate(value, ListHandle::END);
        if list.is_empty() {
            return List { front: back, back };
        }
        *self.next_mut(list.back) = back;
        List {
            front: list.front,
            back,
        }
    }

    /// Return every node of `list` to the free-list in O(1).
    pub fn free_list(&mut self, list: List) {
        if !list.is_empty() {
            self.free_range(list.front, list.back);
        }
    }

    /// Iterate the chain starting at `front`, yielding each node's handle and value.
    pub fn iter(&self, front: ListHandle) -> Iter<'_, T> {
        Iter { pool: self, front }
    }
}

impl<T> Default for ListPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ListPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListPool")
            .field("nodes", &self.nodes)
            .field("free_list", &self.free_list)
            .finish()
    }
}

pub struct Iter<'a, T> {
    pool: &'a ListPool<T>,
    front: ListHandle,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (ListHandle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if ListPool::<T>::is_end(self.front) {
            return None;
        }
        let x = self.front;
        let pool = self.pool;
        let node = pool.node(x);
        self.front = node.next;
        Some((x, &node.value))
    }
}
