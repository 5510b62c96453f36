// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Waygraph Contributors

//! Topological sorting of directed graphs.
//!
//! Depth-first post-order, reversed. Roots are tried in vertex insertion
//! order, so the result is stable for a given build history. The recursion
//! is driven by an explicit frame stack; graph depth is bounded by vertex
//! count, not by thread stack size.

use std::hash::Hash;

use tracing::debug;

use crate::graph::node::{slot_at, NodeIdx, NodeSlot, Scratch};
use crate::graph::{Directed, Graph};

impl<V> Graph<V, Directed>
where
    V: Clone + Eq + Hash,
{
    /// Reorders this graph's vertices in place into topological order, so
    /// that every edge points from an earlier vertex to a later one.
    ///
    /// Returns false and leaves the order untouched when the graph contains
    /// a directed cycle.
    pub fn topological_sort(&mut self) -> bool {
        let mut post_order = Vec::with_capacity(self.size());
        if !self.sort_post_order(&mut post_order) {
            debug!(size = self.size(), "topological sort found a cycle");
            return false;
        }
        post_order.reverse();
        self.set_order(post_order);
        true
    }

    /// Clears `sorted` and fills it with the vertices in topological order,
    /// leaving the graph's own order untouched. Returns false on a cycle;
    /// the buffer then holds an unspecified partial result.
    pub fn topological_sort_into(&mut self, sorted: &mut Vec<V>) -> bool {
        sorted.clear();
        let mut post_order = Vec::with_capacity(self.size());
        let ok = self.sort_post_order(&mut post_order);
        if ok {
            post_order.reverse();
        }
        sorted.extend(
            post_order
                .into_iter()
                .map(|idx| slot_at(&self.nodes, idx).value.clone()),
        );
        ok
    }

    /// Emits finished vertices in post-order. On failure `out` holds the
    /// vertices finished before the cycle was hit.
    fn sort_post_order(&mut self, out: &mut Vec<NodeIdx>) -> bool {
        let run = self.engine.next_run();
        let nodes = &self.nodes;
        let scratch = &mut self.scratch;

        let roots: Vec<NodeIdx> = self.order.clone();
        let mut stack: Vec<(NodeIdx, usize)> = Vec::new();
        for root in roots {
            if !visit(nodes, scratch, run, &mut stack, root, out) {
                return false;
            }
        }
        true
    }
}

/// One depth-first exploration from `root`, appending finished vertices to
/// `out`. Returns false as soon as an edge back into the active stack is
/// found. `seen` marks stack membership; `visited` marks finished vertices,
/// which are skipped when reached again from a later root.
fn visit<V>(
    nodes: &[Option<NodeSlot<V>>],
    scratch: &mut [Scratch],
    run: u64,
    stack: &mut Vec<(NodeIdx, usize)>,
    root: NodeIdx,
    out: &mut Vec<NodeIdx>,
) -> bool {
    scratch[root.index()].ensure(run);
    if scratch[root.index()].visited {
        return true;
    }
    scratch[root.index()].seen = true;
    stack.clear();
    stack.push((root, 0));

    while let Some(&mut (v, ref mut cursor)) = stack.last_mut() {
        let edges = &slot_at(nodes, v).out;
        if *cursor < edges.len() {
            let w = edges[*cursor].to;
            *cursor += 1;
            let sw = &mut scratch[w.index()];
            sw.ensure(run);
            if sw.visited {
                continue;
            }
            if sw.seen {
                return false;
            }
            sw.seen = true;
            stack.push((w, 0));
        } else {
            stack.pop();
            let sv = &mut scratch[v.index()];
            sv.seen = false;
            sv.visited = true;
            out.push(v);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DirectedGraph;

    fn assert_topological<V: Clone + Eq + std::hash::Hash + std::fmt::Debug>(
        g: &DirectedGraph<V>,
        order: &[V],
    ) {
        let pos = |v: &V| order.iter().position(|o| o == v).unwrap();
        for (a, b, _) in g.edges() {
            assert!(pos(a) < pos(b), "edge {a:?} -> {b:?} violates order");
        }
    }

    #[test]
    fn test_sort_into_produces_valid_order() {
        let mut g = DirectedGraph::new();
        g.add_vertices([0, 1, 2, 3, 4, 5]);
        g.add_default_edge(&5, &2).unwrap();
        g.add_default_edge(&5, &0).unwrap();
        g.add_default_edge(&4, &0).unwrap();
        g.add_default_edge(&4, &1).unwrap();
        g.add_default_edge(&2, &3).unwrap();
        g.add_default_edge(&3, &1).unwrap();

        let mut sorted = Vec::new();
        assert!(g.topological_sort_into(&mut sorted));
        assert_eq!(sorted.len(), 6);
        assert_topological(&g, &sorted);
    }

    #[test]
    fn test_in_place_sort_reorders_vertices() {
        let mut g = DirectedGraph::new();
        g.add_vertices(['d', 'c', 'b', 'a']);
        g.add_default_edge(&'a', &'b').unwrap();
        g.add_default_edge(&'b', &'c').unwrap();
        g.add_default_edge(&'c', &'d').unwrap();

        assert!(g.topological_sort());
        let order: Vec<char> = g.vertices().copied().collect();
        assert_eq!(order, vec!['a', 'b', 'c', 'd']);
    }

    #[test]
    fn test_cycle_fails_and_keeps_order() {
        let mut g = DirectedGraph::new();
        g.add_vertices([0, 1, 2]);
        g.add_default_edge(&0, &1).unwrap();
        g.add_default_edge(&1, &2).unwrap();
        g.add_default_edge(&2, &0).unwrap();

        let before: Vec<i32> = g.vertices().copied().collect();
        assert!(!g.topological_sort());
        let after: Vec<i32> = g.vertices().copied().collect();
        assert_eq!(before, after);

        let mut sorted = vec![7];
        assert!(!g.topological_sort_into(&mut sorted));
        // Buffer was cleared even though the sort failed.
        assert!(!sorted.contains(&7));
    }

    #[test]
    fn test_self_loop_rejected_elsewhere_so_two_cycle_is_smallest() {
        let mut g = DirectedGraph::new();
        g.add_vertices([0, 1]);
        g.add_default_edge(&0, &1).unwrap();
        g.add_default_edge(&1, &0).unwrap();
        assert!(!g.topological_sort());
    }

    #[test]
    fn test_empty_and_edgeless_graphs_sort() {
        let mut g: DirectedGraph<i32> = DirectedGraph::new();
        assert!(g.topological_sort());

        g.add_vertices([1, 2, 3]);
        let mut sorted = Vec::new();
        assert!(g.topological_sort_into(&mut sorted));
        // No edges: insertion order is already topological.
        assert_eq!(sorted, vec![1, 2, 3]);
    }

    #[test]
    fn test_diamond_is_stable_for_insertion_order() {
        let mut g = DirectedGraph::new();
        g.add_vertices([0, 1, 2, 3]);
        g.add_default_edge(&0, &1).unwrap();
        g.add_default_edge(&0, &2).unwrap();
        g.add_default_edge(&1, &3).unwrap();
        g.add_default_edge(&2, &3).unwrap();

        let mut sorted = Vec::new();
        assert!(g.topological_sort_into(&mut sorted));
        assert_topological(&g, &sorted);
        assert_eq!(sorted.first(), Some(&0));
        assert_eq!(sorted.last(), Some(&3));
    }

    #[test]
    fn test_sort_twice_is_idempotent() {
        let mut g = DirectedGraph::new();
        g.add_vertices([2, 0, 1]);
        g.add_default_edge(&0, &1).unwrap();
        g.add_default_edge(&1, &2).unwrap();

        assert!(g.topological_sort());
        let first: Vec<i32> = g.vertices().copied().collect();
        assert!(g.topological_sort());
        let second: Vec<i32> = g.vertices().copied().collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![0, 1, 2]);
    }
}
