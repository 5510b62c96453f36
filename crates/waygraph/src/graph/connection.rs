// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Waygraph Contributors

//! Edge representation and the directed/undirected kind policy.
//!
//! Directed and undirected graphs differ only in how an edge between two
//! slots is keyed: ordered for directed (a→b is distinct from b→a),
//! endpoint-normalized for undirected (a↔b is one edge regardless of the
//! order it was added in). Everything else about edge storage is shared.

use crate::graph::node::NodeIdx;

/// Weight used when an edge is added without an explicit weight.
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// Adjacency entry: one outgoing connection from the owning node.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Connection {
    pub(crate) to: NodeIdx,
    pub(crate) weight: f64,
}

/// Identity of an edge in the graph-wide registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct EdgeKey {
    pub(crate) a: NodeIdx,
    pub(crate) b: NodeIdx,
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for crate::graph::directed::Directed {}
    impl Sealed for crate::graph::undirected::Undirected {}
}

/// Edge-kind policy: decides edge identity and which extra algorithm
/// surface a graph exposes (topological sort is directed-only, minimum
/// spanning trees are undirected-only).
///
/// Sealed; the only implementations are [`Directed`](crate::Directed) and
/// [`Undirected`](crate::Undirected).
pub trait GraphKind: sealed::Sealed + 'static {
    const DIRECTED: bool;

    /// Normalizes an endpoint pair into the registry key for this kind.
    fn edge_key(a: NodeIdx, b: NodeIdx) -> EdgeKey;
}
