//! An in-memory ordered sequence of 64-bit integers backed by an
//! implicit-key splay tree with lazy tag propagation. Supports
//! positional insert/erase alongside range sum, assign, add, reverse
//! and next/prev-permutation, all in amortised `O(log n)`.
//!
//! ## Usage
//!
//! ```
//! use splay_sequence::SplaySequence;
//!
//! let mut seq = SplaySequence::new();
//! seq.insert(5, 0);
//! seq.insert(3, 0);
//! seq.insert(7, 2);
//! assert_eq!(seq.to_vec(), vec![3, 5, 7]);
//! assert_eq!(seq.sum(1, 3), 15);
//! assert_eq!(seq.min(), 3);
//! ```
//!
//! You can see example usage at `src/bin/demo.rs` and run it with `cargo run`.
//!
//! ## Implementation
//!
//! The tree's implicit key is a node's in-order rank, derived from
//! subtree sizes rather than stored. Four lazy tags (assign, add,
//! reverse) ride along every structural edit and are pushed one
//! level at a time, never skipping ahead of the splay path.
//!
//! - Node storage: see `NodeStore` in `src/node.rs`.
//! - Rotation and splay: see `splay` in `src/rotate.rs`.
//! - Tag push-down, composition and aggregate recomputation,
//!   including the four monotone run lengths behind the permutation
//!   operators: see `push`/`update` in `src/aggregate.rs`.
//! - Positional split/merge built on splay: see `src/split_merge.rs`.
//! - The public surface: see `impl SplaySequence` in `src/sequence.rs`.
//!
//! Every public method on [`SplaySequence`] that inspects the tree at
//! all takes `&mut self`: even `sum` and `min` splay internally, so
//! read operations still restructure the tree.
//!
//! ## Testing
//!
//! Run the tests using:
//!
//! ```skip
//! cargo test
//! ```
//!
//! Add `-- --ignored` to run the randomized stress test against the
//! dynamic-array reference oracle. Use `cargo bench` to see the
//! benchmarks.
pub mod aggregate;
pub mod node;
pub mod rotate;
pub mod sequence;
pub mod split_merge;

pub use sequence::SplaySequence;
