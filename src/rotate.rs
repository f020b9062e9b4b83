//! Tree-shape primitives: rotation and the three-case splay.
//!
//! Rotation pushes nothing. By the time a rotation runs, every node
//! on the splay path has already been pushed top-down by the caller.
//! It only rewires three edges and recomputes aggregates bottom-up.

use crate::aggregate::update;
use crate::node::{NodeId, NodeStore};

/// Which child `n` is of its parent. Panics if `n` isn't actually a
/// child of `parent`: a broken parent/child link is a structural
/// invariant violation, not something to route around.
fn side_of(store: &NodeStore, parent: NodeId, n: NodeId) -> bool {
    let p = store.get(parent);
    if p.left == n {
        false
    } else if p.right == n {
        true
    } else {
        panic!("node {n:?} is not a child of its own parent {parent:?}");
    }
}

fn set_child(store: &mut NodeStore, parent: NodeId, right: bool, child: NodeId) {
    let p = store.get_mut(parent);
    if right {
        p.right = child;
    } else {
        p.left = child;
    }
    if child.is_some() {
        store.get_mut(child).parent = parent;
    }
}

/// Moves `n` up one level, preserving in-order. `n`'s parent must not
/// be `NodeId::NONE`.
fn rotate(store: &mut NodeStore, n: NodeId) {
    let parent = store.get(n).parent;
    assert!(parent.is_some(), "rotate() called on the root");
    let grandparent = store.get(parent).parent;
    let n_is_right = side_of(store, parent, n);

    // The child of n on the side facing `parent` becomes parent's new
    // child on the side that used to hold n.
    let inner = if n_is_right {
        store.get(n).left
    } else {
        store.get(n).right
    };
    set_child(store, parent, n_is_right, inner);
    set_child(store, n, !n_is_right, parent);

    store.get_mut(n).parent = grandparent;
    if grandparent.is_some() {
        let parent_is_right = side_of(store, grandparent, parent);
        set_child(store, grandparent, parent_is_right, n);
    }

    update(store, parent);
    update(store, n);
    update(store, grandparent);
}

/// Splays `n` to the root of its tree using the standard zig / zig-zig
/// / zig-zag scheme. Every node from the root down to `n` must already
/// be pushed before calling this (callers walk down pushing as they
/// go, then splay on the way back up).
pub fn splay(store: &mut NodeStore, n: NodeId) {
    if n.is_none() {
        return;
    }
    log::trace!("splay: promoting {n:?} to root");
    loop {
        let parent = store.get(n).parent;
        if parent.is_none() {
            break;
        }
        let grandparent = store.get(parent).parent;
        if grandparent.is_none() {
            // zig
            rotate(store, n);
            break;
        }
        let n_side = side_of(store, parent, n);
        let p_side = side_of(store, grandparent, parent);
        if n_side == p_side {
            // zig-zig
            rotate(store, parent);
            rotate(store, n);
        } else {
            // zig-zag
            rotate(store, n);
            rotate(store, n);
        }
    }
}
