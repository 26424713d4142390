//! # Core Types for Assignment Graphs

use std::fmt;

#[cfg(feature = "fxhash")]
pub type RsHashSet<K> = rustc_hash::FxHashSet<K>;
#[cfg(not(feature = "fxhash"))]
pub type RsHashSet<K> = std::collections::HashSet<K>;

/// Node identifier in an assignment graph
///
/// Original nodes are numbered `1..=n`, mirror copies `n+1..=2n`.
pub type NodeId = u64;

/// Default weight of the synthetic arcs joining a node and its mirror copy
///
/// Several orders of magnitude above the costs found in DIMACS assignment
/// benchmarks, so that a min-cost consumer only routes through a mirror arc
/// when it has no other choice.
pub const DEFAULT_HIGH_COST: u64 = 1_000_000_000;

/// The `p asn` declaration of an instance, together with the sizes derived
/// for its augmented counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Problem {
    n_nodes: u64,
    n_arcs: u64,
}

impl Problem {
    /// Creates a problem declaration with `n_nodes` nodes and `n_arcs` arcs
    #[must_use]
    pub fn new(n_nodes: u64, n_arcs: u64) -> Problem {
        Problem { n_nodes, n_arcs }
    }

    /// The declared number of nodes
    #[must_use]
    pub fn n_nodes(&self) -> u64 {
        self.n_nodes
    }

    /// The declared number of arcs
    #[must_use]
    pub fn n_arcs(&self) -> u64 {
        self.n_arcs
    }

    /// The number of nodes in the augmented instance (`2n`)
    #[must_use]
    pub fn aug_n_nodes(&self) -> u64 {
        2 * self.n_nodes
    }

    /// The number of arcs in the augmented instance (`2m + n`)
    ///
    /// Every input arc contributes its original and its cross arc, and every
    /// node contributes exactly one high-cost arc the first time it appears
    /// as an arc endpoint.
    #[must_use]
    pub fn aug_n_arcs(&self) -> u64 {
        2 * self.n_arcs + self.n_nodes
    }

    /// The mirror copy of an original node
    #[must_use]
    pub fn mirror(&self, node: NodeId) -> NodeId {
        node + self.n_nodes
    }
}

/// A non-negative arc weight
///
/// Weights are kept in their original textual form: rewriting an instance
/// must reproduce fractional weights exactly as they appeared in the input,
/// which a round trip through a float cannot guarantee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weight(String);

impl Weight {
    /// Wraps a weight token that has already been validated as a
    /// non-negative decimal
    pub(crate) fn new(token: &str) -> Weight {
        Weight(token.to_owned())
    }

    /// The weight as it appeared in the input
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric value of the weight
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
            .parse()
            .expect("weight tokens are validated at parse time")
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An arc line `a <source> <dest> <weight>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcLine {
    /// The node the arc leaves
    pub source: NodeId,
    /// The node the arc enters
    pub dest: NodeId,
    /// The cost of the arc
    pub weight: Weight,
}
