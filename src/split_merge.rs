//! Positional search, split and merge built directly on `splay`. These
//! are the only primitives that know about absolute rank; everything
//! above this layer works purely in terms of isolated subtrees.

use crate::aggregate::{push, update};
use crate::node::{NodeId, NodeStore};
use crate::rotate::splay;

/// Brings the node at 1-based rank `k` (within the tree rooted at
/// `root`) to the root and returns it. `root` must be non-empty and
/// `k` must be in `1..=size(root)`.
pub fn search_by_rank(store: &mut NodeStore, root: NodeId, k: usize) -> NodeId {
    assert!(root.is_some(), "search_by_rank called on an empty tree");
    let mut cur = root;
    let mut offset = 0usize;
    loop {
        push(store, cur);
        let left = store.get(cur).left;
        let lsize = store.size_of(left);
        let rank_here = offset + lsize + 1;
        if rank_here == k {
            splay(store, cur);
            return cur;
        } else if k <= offset + lsize {
            cur = left;
        } else {
            offset += lsize + 1;
            cur = store.get(cur).right;
        }
        assert!(
            cur.is_some(),
            "search_by_rank: rank {k} out of range for a tree of size {}",
            store.size_of(root)
        );
    }
}

/// Splits `root` into the first `k` nodes and the rest. `(L, R)` with
/// `size(L) == k`. Either half may come back `NONE`.
pub fn split(store: &mut NodeStore, root: NodeId, k: usize) -> (NodeId, NodeId) {
    if k == 0 || root.is_none() {
        return (NodeId::NONE, root);
    }
    let m = search_by_rank(store, root, k);
    let r = store.get(m).right;
    store.get_mut(m).right = NodeId::NONE;
    if r.is_some() {
        store.get_mut(r).parent = NodeId::NONE;
    }
    update(store, m);
    (m, r)
}

/// Merges `l` and `r`, requiring every element of `l` to in-order
/// precede every element of `r`. Returns the new root.
pub fn merge(store: &mut NodeStore, l: NodeId, r: NodeId) -> NodeId {
    if l.is_none() {
        return r;
    }
    if r.is_none() {
        return l;
    }
    let lsize = store.size_of(l);
    let m = search_by_rank(store, l, lsize);
    debug_assert!(store.get(m).right.is_none(), "rightmost node of l has a right child");
    store.get_mut(m).right = r;
    store.get_mut(r).parent = m;
    update(store, m);
    m
}

pub fn merge3(store: &mut NodeStore, l: NodeId, m: NodeId, r: NodeId) -> NodeId {
    let lm = merge(store, l, m);
    merge(store, lm, r)
}

/// Isolates the 1-based inclusive range `[l, r]` of `root` as a
/// standalone middle subtree. Returns `(left_rest, mid, right_rest)`.
pub fn isolate_range(store: &mut NodeStore, root: NodeId, l: usize, r: usize) -> (NodeId, NodeId, NodeId) {
    debug_assert!(l >= 1 && l <= r, "isolate_range: invalid range [{l}, {r}]");
    let (left_rest, rest) = split(store, root, l - 1);
    let (mid, right_rest) = split(store, rest, r - l + 1);
    (left_rest, mid, right_rest)
}

/// Descends to the leftmost node of `root`, splays it there and
/// returns it. Panics if `root` is empty.
pub fn splay_min(store: &mut NodeStore, root: NodeId) -> NodeId {
    assert!(root.is_some(), "splay_min called on an empty tree");
    let mut cur = root;
    loop {
        push(store, cur);
        let left = store.get(cur).left;
        if left.is_none() {
            break;
        }
        cur = left;
    }
    splay(store, cur);
    cur
}
