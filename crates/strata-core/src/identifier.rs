//! Handles for declared nodes and clusters.
//!
//! Handles are plain indices tagged with the [`GraphToken`] of the graph that
//! issued them. Indices are dense and assigned in declaration order, which
//! keeps exported output stable across runs. The token lets a graph reject a
//! handle that was issued by another graph.

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(0);

/// Identity of one [`Graph`](crate::graph::Graph) instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphToken(u64);

impl GraphToken {
    /// Returns a token no other graph in this process holds.
    pub(crate) fn fresh() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a node declared in a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    owner: GraphToken,
    index: usize,
}

impl NodeId {
    pub(crate) fn new(owner: GraphToken, index: usize) -> Self {
        Self { owner, index }
    }

    /// Position of the node in declaration order.
    pub fn index(self) -> usize {
        self.index
    }

    pub(crate) fn owner(self) -> GraphToken {
        self.owner
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.index)
    }
}

/// Handle to a cluster declared in a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClusterId {
    owner: GraphToken,
    index: usize,
}

impl ClusterId {
    pub(crate) fn new(owner: GraphToken, index: usize) -> Self {
        Self { owner, index }
    }

    /// Position of the cluster in declaration order.
    pub fn index(self) -> usize {
        self.index
    }

    pub(crate) fn owner(self) -> GraphToken {
        self.owner
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cluster_{}", self.index)
    }
}
