// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Waygraph Contributors

//! Undirected edge kind.

use crate::graph::connection::{EdgeKey, GraphKind};
use crate::graph::node::NodeIdx;

/// Kind marker for undirected graphs: a↔b is one edge regardless of the
/// order it was added in, stored in both endpoints' adjacency.
///
/// Undirected graphs additionally expose
/// [`spanning_tree`](crate::Graph::spanning_tree) and
/// [`minimum_weight_spanning_tree`](crate::Graph::minimum_weight_spanning_tree).
#[derive(Debug, Clone, Copy)]
pub enum Undirected {}

impl GraphKind for Undirected {
    const DIRECTED: bool = false;

    #[inline]
    fn edge_key(a: NodeIdx, b: NodeIdx) -> EdgeKey {
        if a.0 <= b.0 {
            EdgeKey { a, b }
        } else {
            EdgeKey { a: b, b: a }
        }
    }
}
