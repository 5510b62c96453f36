// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Waygraph Contributors

//! Bounded breadth-first and depth-first traversal.
//!
//! Both searches materialize their result as a new graph of the same kind:
//! every processed vertex, plus one edge per non-root vertex pointing at the
//! vertex it was discovered from, always with the default weight. Vertex and
//! edge iteration order of the returned tree is discovery order.

use std::hash::Hash;

use crate::error::Result;
use crate::graph::node::slot_at;
use crate::graph::{Graph, GraphKind};

impl<V, K: GraphKind> Graph<V, K>
where
    V: Clone + Eq + Hash,
{
    /// Breadth-first search over the whole graph from `start`.
    pub fn breadth_first_search(&mut self, start: &V) -> Result<Graph<V, K>> {
        let n = self.size();
        self.breadth_first_search_bounded(start, n, n as i32)
    }

    /// Breadth-first search from `start`, stopping once the tree holds
    /// `max_vertices` vertices or the frontier passes `max_depth` edges from
    /// the root. Vertices at exactly `max_depth` are still included; their
    /// neighbours are not explored. A `max_depth` of zero or less yields an
    /// empty tree.
    pub fn breadth_first_search_bounded(
        &mut self,
        start: &V,
        max_vertices: usize,
        max_depth: i32,
    ) -> Result<Graph<V, K>> {
        let start = self.require(start)?;
        let mut tree = self.create_new();
        if max_depth <= 0 {
            return Ok(tree);
        }
        let run = self.engine.next_run();
        let nodes = &self.nodes;
        let scratch = &mut self.scratch;
        let deque = &mut self.engine.deque;

        scratch[start.index()].ensure(run);
        scratch[start.index()].visited = true;
        deque.clear();
        deque.push_back(start);

        while let Some(v) = deque.pop_front() {
            let slot = slot_at(nodes, v);
            tree.add_vertex(slot.value.clone());
            if let Some(prev) = scratch[v.index()].prev {
                tree.add_default_edge(&slot.value, &slot_at(nodes, prev).value)?;
            }
            if scratch[v.index()].depth == max_depth {
                continue;
            }
            if tree.size() == max_vertices {
                break;
            }
            let depth = scratch[v.index()].depth;
            for conn in &slot.out {
                let w = conn.to;
                let sw = &mut scratch[w.index()];
                sw.ensure(run);
                if !sw.visited {
                    sw.visited = true;
                    sw.depth = depth + 1;
                    sw.prev = Some(v);
                    deque.push_back(w);
                }
            }
        }
        deque.clear();
        Ok(tree)
    }

    /// Depth-first search over the whole graph from `start`.
    pub fn depth_first_search(&mut self, start: &V) -> Result<Graph<V, K>> {
        let n = self.size();
        self.depth_first_search_bounded(start, n, n as i32)
    }

    /// Depth-first search from `start` with the same bounds as
    /// [`breadth_first_search_bounded`], except that a `max_depth` of zero
    /// still yields the root alone rather than an empty tree.
    ///
    /// [`breadth_first_search_bounded`]: Graph::breadth_first_search_bounded
    pub fn depth_first_search_bounded(
        &mut self,
        start: &V,
        max_vertices: usize,
        max_depth: i32,
    ) -> Result<Graph<V, K>> {
        let start = self.require(start)?;
        let mut tree = self.create_new();
        let run = self.engine.next_run();
        let nodes = &self.nodes;
        let scratch = &mut self.scratch;
        let deque = &mut self.engine.deque;

        scratch[start.index()].ensure(run);
        deque.clear();
        deque.push_back(start);

        while let Some(v) = deque.pop_front() {
            if scratch[v.index()].visited {
                continue;
            }
            let slot = slot_at(nodes, v);
            tree.add_vertex(slot.value.clone());
            if let Some(prev) = scratch[v.index()].prev {
                tree.add_default_edge(&slot.value, &slot_at(nodes, prev).value)?;
            }
            if scratch[v.index()].depth == max_depth {
                continue;
            }
            if tree.size() == max_vertices {
                break;
            }
            scratch[v.index()].visited = true;
            let depth = scratch[v.index()].depth;
            // Neighbours are pushed even when already visited; the visited
            // check on pop discards the duplicates.
            for conn in &slot.out {
                let w = conn.to;
                let sw = &mut scratch[w.index()];
                sw.ensure(run);
                sw.depth = depth + 1;
                sw.prev = Some(v);
                deque.push_front(w);
            }
        }
        deque.clear();
        Ok(tree)
    }
}
