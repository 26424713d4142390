//! # asngraph - DIMACS Assignment-Graph Augmentation
//!
//! `asngraph` reads weighted assignment instances in the DIMACS `asn` format
//! and rewrites them as augmented instances: every node is split into an
//! original and a mirror copy joined by a high-cost arc, and every input arc
//! is re-routed between the copies. The augmented graph has twice the nodes,
//! `2m + n` arcs, and guarantees that every node carries both an in-arc and
//! an out-arc, which downstream matching and min-cost flow algorithms rely
//! on.

pub mod augment;
pub mod fio;
pub mod types;
