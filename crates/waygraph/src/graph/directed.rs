// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Waygraph Contributors

//! Directed edge kind and the directed-only graph surface.

use std::hash::Hash;

use crate::error::Result;
use crate::graph::connection::{EdgeKey, GraphKind};
use crate::graph::node::NodeIdx;
use crate::graph::Graph;

/// Kind marker for directed graphs: an edge a→b is distinct from b→a.
///
/// Directed graphs additionally expose
/// [`topological_sort`](Graph::topological_sort) and incoming-edge queries.
#[derive(Debug, Clone, Copy)]
pub enum Directed {}

impl GraphKind for Directed {
    const DIRECTED: bool = true;

    #[inline]
    fn edge_key(a: NodeIdx, b: NodeIdx) -> EdgeKey {
        EdgeKey { a, b }
    }
}

impl<V> Graph<V, Directed>
where
    V: Clone + Eq + Hash,
{
    /// Number of edges pointing at `value`. [`degree`](Graph::degree) gives
    /// the outgoing count.
    pub fn in_degree(&self, value: &V) -> Option<usize> {
        Some(self.slot(self.node_of(value)?).in_refs.len())
    }

    /// Iterates over the vertices with an edge into `value`, in the order
    /// those edges were added.
    pub fn predecessors(&self, value: &V) -> Result<impl Iterator<Item = &V> + '_> {
        let idx = self.require(value)?;
        Ok(self
            .slot(idx)
            .in_refs
            .iter()
            .map(move |&from| &self.slot(from).value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::graph::DirectedGraph;

    #[test]
    fn test_directed_keys_are_ordered() {
        let u = NodeIdx(1);
        let v = NodeIdx(2);
        assert_ne!(Directed::edge_key(u, v), Directed::edge_key(v, u));
    }

    #[test]
    fn test_in_degree_counts_only_incoming() {
        let mut g = DirectedGraph::new();
        g.add_vertices([0, 1, 2]);
        g.add_default_edge(&0, &2).unwrap();
        g.add_default_edge(&1, &2).unwrap();
        g.add_default_edge(&2, &0).unwrap();

        assert_eq!(g.in_degree(&2), Some(2));
        assert_eq!(g.in_degree(&0), Some(1));
        assert_eq!(g.in_degree(&1), Some(0));
        assert_eq!(g.degree(&2), Some(1));
        assert_eq!(g.in_degree(&9), None);
    }

    #[test]
    fn test_predecessors_in_edge_order() {
        let mut g = DirectedGraph::new();
        g.add_vertices(['a', 'b', 'c']);
        g.add_default_edge(&'b', &'c').unwrap();
        g.add_default_edge(&'a', &'c').unwrap();

        let preds: Vec<char> = g.predecessors(&'c').unwrap().copied().collect();
        assert_eq!(preds, vec!['b', 'a']);
        assert_eq!(
            g.predecessors(&'z').map(|_| ()).unwrap_err(),
            GraphError::VertexNotFound
        );
    }
}
