//! Lazy tag application, composition, push-down and aggregate
//! recomputation. Has nothing to do with the tree's shape, everything
//! to do with keeping cached sums, endpoints and monotone run lengths
//! correct under four kinds of pending edit.

use crate::node::{Node, NodeId, NodeStore};

pub(crate) fn apply_assign_fields(node: &mut Node, value: i64) {
    node.value = value;
    node.leftest = value;
    node.rightest = value;
    node.sum = value * node.size as i64;
    node.increasing_prefix = node.size;
    node.decreasing_prefix = node.size;
    node.increasing_suffix = node.size;
    node.decreasing_suffix = node.size;
}

pub(crate) fn apply_add_fields(node: &mut Node, delta: i64) {
    node.value += delta;
    node.leftest += delta;
    node.rightest += delta;
    node.sum += delta * node.size as i64;
    // A constant shift preserves every monotone run length.
}

/// Swaps the externally-visible, order-sensitive fields that a
/// reversal affects. Does not touch child pointers. That structural
/// half of a reversal only happens when the node itself is pushed.
fn apply_reverse_exposed(node: &mut Node) {
    std::mem::swap(&mut node.leftest, &mut node.rightest);
    std::mem::swap(&mut node.increasing_prefix, &mut node.decreasing_suffix);
    std::mem::swap(&mut node.decreasing_prefix, &mut node.increasing_suffix);
}

/// Composes an incoming assign onto a child: unconditionally
/// overwrites any pending add.
fn compose_assign(store: &mut NodeStore, child: NodeId, value: i64) {
    if child.is_none() {
        return;
    }
    let node = store.get_mut(child);
    apply_assign_fields(node, value);
    node.is_added = false;
    node.added_value = 0;
    node.is_assigned = true;
    node.assigned_value = value;
}

/// Composes an incoming add onto a child: folds into an existing
/// assign, accumulates onto an existing add, or starts a fresh one.
fn compose_add(store: &mut NodeStore, child: NodeId, delta: i64) {
    if child.is_none() {
        return;
    }
    let node = store.get_mut(child);
    apply_add_fields(node, delta);
    if node.is_assigned {
        node.assigned_value += delta;
    } else if node.is_added {
        node.added_value += delta;
    } else {
        node.is_added = true;
        node.added_value = delta;
    }
}

/// Toggles the pending reverse flag on a node, eagerly swapping its
/// own exposed fields in the same step. `update` on a parent reads a
/// child's `leftest`/`rightest`/run lengths directly, without pushing
/// the child first, so those fields must already be effective the
/// moment the flag changes, not only once the child is later pushed.
pub(crate) fn toggle_reverse(store: &mut NodeStore, id: NodeId) {
    if id.is_none() {
        return;
    }
    let node = store.get_mut(id);
    apply_reverse_exposed(node);
    node.reversed = !node.reversed;
}

/// Pushes `id`'s pending tags one level down, in the fixed order
/// assign/add, then reverse. Must be called before inspecting `id`'s
/// children's structure (their left/right pointers).
pub fn push(store: &mut NodeStore, id: NodeId) {
    if id.is_none() {
        return;
    }
    let (is_assigned, assigned_value, is_added, added_value, reversed, left, right) = {
        let n = store.get(id);
        (
            n.is_assigned,
            n.assigned_value,
            n.is_added,
            n.added_value,
            n.reversed,
            n.left,
            n.right,
        )
    };
    assert!(
        !(is_assigned && is_added),
        "node {id:?} holds both an assign and an add tag simultaneously"
    );

    // `id`'s own value/sum/leftest/rightest already reflect its pending
    // assign or add: whoever set the flag (a direct op in `sequence.rs`
    // or `compose_assign`/`compose_add` cascading from a parent) applied
    // it eagerly. Pushing only needs to clear the flag and hand the tag
    // down to the children, not reapply it here.
    if is_assigned {
        store.get_mut(id).is_assigned = false;
        compose_assign(store, left, assigned_value);
        compose_assign(store, right, assigned_value);
        log::trace!("push: propagated assign({assigned_value}) from {id:?}");
    }
    if is_added {
        store.get_mut(id).is_added = false;
        compose_add(store, left, added_value);
        compose_add(store, right, added_value);
        log::trace!("push: propagated add({added_value}) from {id:?}");
    }
    if reversed {
        // `id`'s own exposed fields are already effective: they were
        // swapped when this flag was set. Only the structural half is
        // still pending here: swap the child pointers, then cascade
        // the flag (and its eager swap) one level further down.
        let node = store.get_mut(id);
        node.reversed = false;
        std::mem::swap(&mut node.left, &mut node.right);
        let (l, r) = (node.left, node.right);
        toggle_reverse(store, l);
        toggle_reverse(store, r);
        log::trace!("push: propagated reverse from {id:?}");
    }
}

/// Recomputes `size`, `sum`, `leftest`, `rightest` and the four
/// monotone run lengths of `id` from its children. Callers must have
/// already pushed `id`'s children so their cached fields are fresh.
pub fn update(store: &mut NodeStore, id: NodeId) {
    if id.is_none() {
        return;
    }
    let (left, right, value) = {
        let n = store.get(id);
        (n.left, n.right, n.value)
    };

    let lsize = store.size_of(left);
    let rsize = store.size_of(right);
    let lsum = store.sum_of(left);
    let rsum = store.sum_of(right);

    let leftest = if left.is_some() {
        store.get(left).leftest
    } else {
        value
    };
    let rightest = if right.is_some() {
        store.get(right).rightest
    } else {
        value
    };

    let increasing_prefix = prefix_run(store, left, right, lsize, value, |l| l.increasing_prefix, |l| l.rightest, |r| r.leftest, |r| r.increasing_prefix, |a, b| a >= b, |a, b| a >= b);
    let decreasing_prefix = prefix_run(store, left, right, lsize, value, |l| l.decreasing_prefix, |l| l.rightest, |r| r.leftest, |r| r.decreasing_prefix, |a, b| a <= b, |a, b| a <= b);
    let increasing_suffix = suffix_run(store, left, right, rsize, value, |r| r.increasing_suffix, |r| r.leftest, |l| l.rightest, |l| l.increasing_suffix, |v, rl| v <= rl, |lr, v| lr <= v);
    let decreasing_suffix = suffix_run(store, left, right, rsize, value, |r| r.decreasing_suffix, |r| r.leftest, |l| l.rightest, |l| l.decreasing_suffix, |v, rl| v >= rl, |lr, v| lr >= v);

    let node = store.get_mut(id);
    node.size = lsize + rsize + 1;
    node.sum = lsum + rsum + value;
    node.leftest = leftest;
    node.rightest = rightest;
    node.increasing_prefix = increasing_prefix;
    node.decreasing_prefix = decreasing_prefix;
    node.increasing_suffix = increasing_suffix;
    node.decreasing_suffix = decreasing_suffix;
}

/// Shared shape of `increasing_prefix`/`decreasing_prefix`: start from
/// the left child's own prefix run, extend through `n` only if the
/// left child's run spans it entirely and the ordering holds across
/// the boundary, then extend (partially) into the right child.
#[allow(clippy::too_many_arguments)]
fn prefix_run(
    store: &NodeStore,
    left: NodeId,
    right: NodeId,
    lsize: usize,
    value: i64,
    left_run: impl Fn(&Node) -> usize,
    left_rightest: impl Fn(&Node) -> i64,
    right_leftest: impl Fn(&Node) -> i64,
    right_run: impl Fn(&Node) -> usize,
    boundary_into_self: impl Fn(i64, i64) -> bool,
    boundary_into_right: impl Fn(i64, i64) -> bool,
) -> usize {
    if left.is_none() {
        let mut run = 1;
        if right.is_some() && boundary_into_right(right_leftest(store.get(right)), value) {
            run += right_run(store.get(right));
        }
        return run;
    }
    let l = store.get(left);
    let spans_left = left_run(l) == lsize;
    if spans_left && boundary_into_self(value, left_rightest(l)) {
        let mut run = left_run(l) + 1;
        if right.is_some() && boundary_into_right(right_leftest(store.get(right)), value) {
            run += right_run(store.get(right));
        }
        run
    } else {
        left_run(l)
    }
}

/// Mirror of [`prefix_run`] for `increasing_suffix`/`decreasing_suffix`.
#[allow(clippy::too_many_arguments)]
fn suffix_run(
    store: &NodeStore,
    left: NodeId,
    right: NodeId,
    rsize: usize,
    value: i64,
    right_run: impl Fn(&Node) -> usize,
    right_leftest: impl Fn(&Node) -> i64,
    left_rightest: impl Fn(&Node) -> i64,
    left_run: impl Fn(&Node) -> usize,
    boundary_into_self: impl Fn(i64, i64) -> bool,
    boundary_into_left: impl Fn(i64, i64) -> bool,
) -> usize {
    if right.is_none() {
        let mut run = 1;
        if left.is_some() && boundary_into_left(left_rightest(store.get(left)), value) {
            run += left_run(store.get(left));
        }
        return run;
    }
    let r = store.get(right);
    let spans_right = right_run(r) == rsize;
    if spans_right && boundary_into_self(value, right_leftest(r)) {
        let mut run = right_run(r) + 1;
        if left.is_some() && boundary_into_left(left_rightest(store.get(left)), value) {
            run += left_run(store.get(left));
        }
        run
    } else {
        right_run(r)
    }
}
