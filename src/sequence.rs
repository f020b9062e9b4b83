//! The public operational surface: `insert`, `erase`, `sum`, `assign`,
//! `add`, `reverse`, `next_permutation`, `prev_permutation`, `min`.
//!
//! Every mutating (and, because of splaying, every "read") operation
//! follows the same shape: isolate the affected range with two
//! splits, touch the isolated root, merge back.

use crate::aggregate::push;
use crate::node::{NodeId, NodeStore};
use crate::rotate::splay;
use crate::split_merge::{isolate_range, merge, merge3, search_by_rank, split, splay_min};

/// An in-memory ordered sequence of `i64` supporting rank-indexed
/// insert/erase and range sum/assign/add/reverse/permutation queries
/// in amortised `O(log n)`.
///
/// 1-based positions throughout; ranges are inclusive. Every method
/// that touches the tree at all, including `sum` and `min`, takes
/// `&mut self`, because splaying restructures the tree even on reads.
#[derive(Debug, Default)]
pub struct SplaySequence {
    store: NodeStore,
    root: NodeId,
}

impl SplaySequence {
    pub fn new() -> Self {
        SplaySequence {
            store: NodeStore::default(),
            root: NodeId::NONE,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        SplaySequence {
            store: NodeStore::with_capacity(capacity),
            root: NodeId::NONE,
        }
    }

    pub fn len(&self) -> usize {
        self.store.size_of(self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts `v` so it becomes position `pos + 1`. `pos` ranges over
    /// `0..=len()`; `pos == 0` prepends, `pos == len()` appends.
    pub fn insert(&mut self, value: i64, pos: usize) {
        debug_assert!(pos <= self.len(), "insert: pos {pos} out of range");
        let (left, right) = split(&mut self.store, self.root, pos);
        let node = self.store.alloc(value);
        self.root = merge3(&mut self.store, left, node, right);
        log::trace!("insert({value}, {pos})");
    }

    /// Removes the element at 1-based rank `k`.
    pub fn erase(&mut self, k: usize) {
        debug_assert!((1..=self.len()).contains(&k), "erase: rank {k} out of range");
        let (left, rest) = split(&mut self.store, self.root, k - 1);
        let (mid, right) = split(&mut self.store, rest, 1);
        debug_assert!(mid.is_some());
        self.store.free(mid);
        self.root = merge(&mut self.store, left, right);
        log::trace!("erase({k})");
    }

    /// Sum of the effective values in `[l, r]`. Restructures the tree
    /// via splay like any other operation here.
    pub fn sum(&mut self, l: usize, r: usize) -> i64 {
        self.check_range(l, r);
        let (left, mid, right) = isolate_range(&mut self.store, self.root, l, r);
        let result = self.store.sum_of(mid);
        self.root = merge3(&mut self.store, left, mid, right);
        result
    }

    /// Sets every element in `[l, r]` to `value`.
    pub fn assign(&mut self, l: usize, r: usize, value: i64) {
        self.check_range(l, r);
        let (left, mid, right) = isolate_range(&mut self.store, self.root, l, r);
        let node = self.store.get_mut(mid);
        // The isolated root's own effective fields must reflect the
        // tag immediately; nothing above will push into it again
        // until it's next visited.
        crate::aggregate::apply_assign_fields(node, value);
        node.is_added = false;
        node.added_value = 0;
        node.is_assigned = true;
        node.assigned_value = value;
        self.root = merge3(&mut self.store, left, mid, right);
        log::trace!("assign({l}, {r}, {value})");
    }

    /// Adds `delta` to every element in `[l, r]`.
    pub fn add(&mut self, l: usize, r: usize, delta: i64) {
        self.check_range(l, r);
        let (left, mid, right) = isolate_range(&mut self.store, self.root, l, r);
        {
            let node = self.store.get_mut(mid);
            crate::aggregate::apply_add_fields(node, delta);
            if node.is_assigned {
                node.assigned_value += delta;
            } else if node.is_added {
                node.added_value += delta;
            } else {
                node.is_added = true;
                node.added_value = delta;
            }
        }
        self.root = merge3(&mut self.store, left, mid, right);
        log::trace!("add({l}, {r}, {delta})");
    }

    /// Reverses `[l, r]`. A no-op when `l == r`.
    pub fn reverse(&mut self, l: usize, r: usize) {
        self.check_range(l, r);
        let (left, mid, right) = isolate_range(&mut self.store, self.root, l, r);
        crate::aggregate::toggle_reverse(&mut self.store, mid);
        self.root = merge3(&mut self.store, left, mid, right);
        log::trace!("reverse({l}, {r})");
    }

    /// Advances `[l, r]` to its lexicographically next permutation,
    /// wrapping to the ascending-sorted arrangement when it's already
    /// the greatest.
    pub fn next_permutation(&mut self, l: usize, r: usize) {
        self.check_range(l, r);
        self.permute(l, r, true);
    }

    /// Mirror of [`next_permutation`](Self::next_permutation).
    pub fn prev_permutation(&mut self, l: usize, r: usize) {
        self.check_range(l, r);
        self.permute(l, r, false);
    }

    fn permute(&mut self, l: usize, r: usize, next: bool) {
        let (left_rest, mid, right_rest) = isolate_range(&mut self.store, self.root, l, r);
        let size_mid = self.store.size_of(mid);
        let run = if next {
            self.store.get(mid).decreasing_suffix
        } else {
            self.store.get(mid).increasing_suffix
        };

        if run == size_mid {
            crate::aggregate::toggle_reverse(&mut self.store, mid);
            self.root = merge3(&mut self.store, left_rest, mid, right_rest);
            log::trace!("permutation wrap at [{l}, {r}]");
            return;
        }

        let split_at = size_mid - run;
        let (midleft, mid_prime) = split(&mut self.store, mid, split_at);

        let midleft_size = self.store.size_of(midleft);
        let pivot_id = search_by_rank(&mut self.store, midleft, midleft_size);
        let target = self.store.get(pivot_id).value;

        let found_id = find_boundary(&mut self.store, mid_prime, target, next);
        assert!(
            found_id.is_some(),
            "permutation step found no boundary element in [{l}, {r}]: corrupt monotone-run aggregate"
        );

        let found_value = self.store.get(found_id).value;
        self.store.get_mut(pivot_id).value = found_value;
        crate::aggregate::update(&mut self.store, pivot_id);
        self.store.get_mut(found_id).value = target;
        crate::aggregate::update(&mut self.store, found_id);
        splay(&mut self.store, found_id);

        crate::aggregate::toggle_reverse(&mut self.store, found_id);

        let new_mid = merge(&mut self.store, pivot_id, found_id);
        self.root = merge3(&mut self.store, left_rest, new_mid, right_rest);
        log::trace!("permutation step at [{l}, {r}]");
    }

    /// The smallest-rank element (position 1). Panics on an empty
    /// sequence.
    pub fn min(&mut self) -> i64 {
        assert!(self.root.is_some(), "min() called on an empty sequence");
        let new_root = splay_min(&mut self.store, self.root);
        self.root = new_root;
        self.store.get(new_root).value
    }

    /// Snapshots the whole sequence. An iterative in-order walk,
    /// pushing every node it visits so the collected values are
    /// effective, without recursing on tree height.
    pub fn to_vec(&mut self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut cur = self.root;
        while cur.is_some() || !stack.is_empty() {
            while cur.is_some() {
                push(&mut self.store, cur);
                stack.push(cur);
                cur = self.store.get(cur).left;
            }
            cur = stack.pop().unwrap();
            out.push(self.store.get(cur).value);
            cur = self.store.get(cur).right;
        }
        out
    }

    fn check_range(&self, l: usize, r: usize) {
        debug_assert!(
            l >= 1 && l <= r && r <= self.len(),
            "range [{l}, {r}] out of bounds for a sequence of length {}",
            self.len()
        );
    }

    /// Recomputes every aggregate from scratch and compares it against
    /// the cached value, panicking with a description of the first
    /// mismatch. Used by tests and available to callers in debug
    /// builds who want extra paranoia.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&mut self) {
        use std::collections::HashMap;

        // First pass: push every node top-down, recording a preorder
        // (parent before both children, either order between them).
        // Its reverse then has every descendant before its ancestors,
        // which is all the second pass needs to fold bottom-up without
        // recursing on tree height.
        let mut order = Vec::with_capacity(self.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if id.is_none() {
                continue;
            }
            push(&mut self.store, id);
            let (left, right) = {
                let n = self.store.get(id);
                (n.left, n.right)
            };
            order.push(id);
            stack.push(left);
            stack.push(right);
        }

        let mut computed: HashMap<NodeId, (usize, i64, i64, i64)> = HashMap::new();
        for &id in order.iter().rev() {
            let (left, right, value) = {
                let n = self.store.get(id);
                (n.left, n.right, n.value)
            };
            let (lsize, lsum, lleft, _) = computed.get(&left).copied().unwrap_or((0, 0, 0, 0));
            let (rsize, rsum, _, rright) = computed.get(&right).copied().unwrap_or((0, 0, 0, 0));
            let size = lsize + rsize + 1;
            let sum = lsum + rsum + value;
            let leftest = if left.is_some() { lleft } else { value };
            let rightest = if right.is_some() { rright } else { value };
            let n = self.store.get(id);
            assert_eq!(n.size, size, "size mismatch at {id:?}");
            assert_eq!(n.sum, sum, "sum mismatch at {id:?}");
            assert_eq!(n.leftest, leftest, "leftest mismatch at {id:?}");
            assert_eq!(n.rightest, rightest, "rightest mismatch at {id:?}");
            computed.insert(id, (size, sum, leftest, rightest));
        }
        log::trace!("check_invariants: walked {} nodes", self.len());
    }
}

/// Descends a subtree known to be monotone, looking for the rightmost
/// node whose value is strictly greater (`next == true`) or strictly
/// less (`next == false`) than `target`.
fn find_boundary(store: &mut NodeStore, root: NodeId, target: i64, next: bool) -> NodeId {
    let mut cur = root;
    let mut found = NodeId::NONE;
    while cur.is_some() {
        push(store, cur);
        let v = store.get(cur).value;
        let matches = if next { v > target } else { v < target };
        if matches {
            found = cur;
            cur = store.get(cur).right;
        } else {
            cur = store.get(cur).left;
        }
    }
    found
}
