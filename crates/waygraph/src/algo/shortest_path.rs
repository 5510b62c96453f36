// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Waygraph Contributors

//! Shortest path search: A* unified with Dijkstra.
//!
//! One implementation serves both: the priority queue is keyed by
//! `distance + estimate`, and with no heuristic every estimate stays 0, so
//! the search degenerates to exact Dijkstra. Standard closed-set semantics:
//! a node is finalized after its edges are relaxed and never re-expanded,
//! which is optimal for non-negative weights. Negative weights are not
//! validated and yield an unspecified result.

use std::hash::Hash;

use crate::error::Result;
use crate::graph::node::{slot_at, NodeIdx};
use crate::graph::{Graph, GraphKind};

/// Estimates the remaining cost from a vertex to the target, biasing the
/// search toward the goal. Any `Fn(&V, &V) -> f64` qualifies. A zero
/// estimate turns the search into Dijkstra's algorithm; an admissible
/// (never overestimating) heuristic keeps the result optimal.
pub trait Heuristic<V> {
    fn estimate(&self, from: &V, target: &V) -> f64;
}

impl<V, F> Heuristic<V> for F
where
    F: Fn(&V, &V) -> f64,
{
    #[inline]
    fn estimate(&self, from: &V, target: &V) -> f64 {
        self(from, target)
    }
}

impl<V, K: GraphKind> Graph<V, K>
where
    V: Clone + Eq + Hash,
{
    /// Finds the cheapest path from `start` to `target`, inclusive of both
    /// endpoints. With `None` for the heuristic this is exact Dijkstra.
    ///
    /// Returns an empty vector when no path exists, and
    /// [`GraphError::VertexNotFound`](crate::GraphError::VertexNotFound)
    /// when either endpoint is not in the graph.
    pub fn find_shortest_path(
        &mut self,
        start: &V,
        target: &V,
        heuristic: Option<&dyn Heuristic<V>>,
    ) -> Result<Vec<V>> {
        let mut path = Vec::new();
        self.find_shortest_path_into(start, target, heuristic, &mut path)?;
        Ok(path)
    }

    /// Buffer-filling variant of [`find_shortest_path`]: clears `path`,
    /// fills it with the vertices of a cheapest path, and reports whether
    /// one was found.
    ///
    /// [`find_shortest_path`]: Graph::find_shortest_path
    pub fn find_shortest_path_into(
        &mut self,
        start: &V,
        target: &V,
        heuristic: Option<&dyn Heuristic<V>>,
        path: &mut Vec<V>,
    ) -> Result<bool> {
        path.clear();
        let start = self.require(start)?;
        let target = self.require(target)?;
        let Some(end) = self.a_star(start, target, heuristic) else {
            return Ok(false);
        };

        let mut v = end;
        loop {
            path.push(slot_at(&self.nodes, v).value.clone());
            match self.scratch[v.index()].prev {
                Some(p) => v = p,
                None => break,
            }
        }
        path.reverse();
        Ok(true)
    }

    /// The summed weight of a cheapest path from `start` to `target`, or
    /// `f64::MAX` when the target is unreachable.
    pub fn find_minimum_distance(&mut self, start: &V, target: &V) -> Result<f64> {
        let start = self.require(start)?;
        let target = self.require(target)?;
        match self.a_star(start, target, None) {
            Some(end) => Ok(self.scratch[end.index()].distance),
            None => Ok(f64::MAX),
        }
    }

    /// Whether any path from `start` to `target` exists.
    pub fn is_reachable(&mut self, start: &V, target: &V) -> Result<bool> {
        let start = self.require(start)?;
        let target = self.require(target)?;
        Ok(self.a_star(start, target, None).is_some())
    }

    /// Core A* loop. Returns the target's node when reached, with the
    /// predecessor chain and final distance left in scratch for the caller
    /// to read; the heap is always left empty.
    fn a_star(
        &mut self,
        start: NodeIdx,
        target: NodeIdx,
        heuristic: Option<&dyn Heuristic<V>>,
    ) -> Option<NodeIdx> {
        let run = self.engine.next_run();
        let nodes = &self.nodes;
        let scratch = &mut self.scratch;
        let heap = &mut self.engine.heap;

        scratch[start.index()].ensure(run);
        scratch[start.index()].distance = 0.0;
        heap.push(scratch, start, 0.0);

        while !heap.is_empty() {
            let u = match heap.pop(scratch) {
                Some(u) => u,
                None => break,
            };
            if u == target {
                heap.clear();
                return Some(u);
            }
            if scratch[u.index()].visited {
                continue;
            }
            scratch[u.index()].visited = true;
            let u_distance = scratch[u.index()].distance;

            for conn in &slot_at(nodes, u).out {
                let v = conn.to;
                let (key, requeue) = {
                    let sv = &mut scratch[v.index()];
                    sv.ensure(run);
                    if sv.visited {
                        continue;
                    }
                    let relaxed = u_distance + conn.weight;
                    if relaxed >= sv.distance {
                        continue;
                    }
                    sv.distance = relaxed;
                    sv.prev = Some(u);
                    if !sv.seen {
                        if let Some(h) = heuristic {
                            // Computed exactly once per node, on first
                            // discovery; later relaxations reuse it.
                            sv.estimate =
                                h.estimate(&slot_at(nodes, v).value, &slot_at(nodes, target).value);
                        }
                    }
                    let requeue = sv.seen;
                    sv.seen = true;
                    (sv.distance + sv.estimate, requeue)
                };
                if requeue {
                    heap.update(scratch, v, key);
                } else {
                    heap.push(scratch, v, key);
                }
            }
        }
        heap.clear();
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::graph::{DirectedGraph, UndirectedGraph};

    fn line_graph() -> DirectedGraph<i32> {
        let mut g = DirectedGraph::new();
        g.add_vertices([0, 1, 2, 3]);
        g.add_edge(&0, &1, 1.0).unwrap();
        g.add_edge(&1, &2, 1.0).unwrap();
        g.add_edge(&2, &3, 1.0).unwrap();
        g
    }

    #[test]
    fn test_path_on_line() {
        let mut g = line_graph();
        let path = g.find_shortest_path(&0, &3, None).unwrap();
        assert_eq!(path, vec![0, 1, 2, 3]);
        assert_eq!(g.find_minimum_distance(&0, &3).unwrap(), 3.0);
    }

    #[test]
    fn test_prefers_cheaper_detour() {
        let mut g = DirectedGraph::new();
        g.add_vertices([0, 1, 2, 3]);
        g.add_edge(&0, &3, 10.0).unwrap();
        g.add_edge(&0, &1, 1.0).unwrap();
        g.add_edge(&1, &2, 1.0).unwrap();
        g.add_edge(&2, &3, 1.0).unwrap();

        let path = g.find_shortest_path(&0, &3, None).unwrap();
        assert_eq!(path, vec![0, 1, 2, 3]);
        assert_eq!(g.find_minimum_distance(&0, &3).unwrap(), 3.0);
    }

    #[test]
    fn test_relaxation_decreases_key() {
        // 0->1 is expensive but discovered first; the cheaper route via 2
        // must lower 1's key while it is already enqueued.
        let mut g = DirectedGraph::new();
        g.add_vertices([0, 1, 2, 3]);
        g.add_edge(&0, &1, 5.0).unwrap();
        g.add_edge(&0, &2, 1.0).unwrap();
        g.add_edge(&2, &1, 1.0).unwrap();
        g.add_edge(&1, &3, 1.0).unwrap();

        let path = g.find_shortest_path(&0, &3, None).unwrap();
        assert_eq!(path, vec![0, 2, 1, 3]);
        assert_eq!(g.find_minimum_distance(&0, &3).unwrap(), 3.0);
    }

    #[test]
    fn test_no_path() {
        let mut g = DirectedGraph::new();
        g.add_vertices([0, 1, 2]);
        g.add_edge(&0, &1, 1.0).unwrap();

        let path = g.find_shortest_path(&0, &2, None).unwrap();
        assert!(path.is_empty());
        assert_eq!(g.find_minimum_distance(&0, &2).unwrap(), f64::MAX);
        assert!(!g.is_reachable(&0, &2).unwrap());

        // Directed: the reverse direction is unreachable too.
        assert!(!g.is_reachable(&1, &0).unwrap());
    }

    #[test]
    fn test_start_equals_target() {
        let mut g = line_graph();
        let path = g.find_shortest_path(&1, &1, None).unwrap();
        assert_eq!(path, vec![1]);
        assert_eq!(g.find_minimum_distance(&1, &1).unwrap(), 0.0);
    }

    #[test]
    fn test_unknown_vertex_fails_fast() {
        let mut g = line_graph();
        assert_eq!(
            g.find_shortest_path(&0, &99, None).unwrap_err(),
            GraphError::VertexNotFound
        );
        assert_eq!(
            g.find_minimum_distance(&99, &0).unwrap_err(),
            GraphError::VertexNotFound
        );
    }

    #[test]
    fn test_zero_heuristic_matches_dijkstra() {
        let mut g = UndirectedGraph::new();
        g.add_vertices([0, 1, 2, 3, 4]);
        g.add_edge(&0, &1, 2.0).unwrap();
        g.add_edge(&1, &2, 2.0).unwrap();
        g.add_edge(&0, &3, 1.0).unwrap();
        g.add_edge(&3, &4, 1.0).unwrap();
        g.add_edge(&4, &2, 1.0).unwrap();

        let zero = |_: &i32, _: &i32| 0.0;
        let with_zero = g.find_shortest_path(&0, &2, Some(&zero)).unwrap();
        let plain = g.find_shortest_path(&0, &2, None).unwrap();
        assert_eq!(with_zero, plain);
        assert_eq!(with_zero, vec![0, 3, 4, 2]);
    }

    #[test]
    fn test_admissible_heuristic_stays_optimal() {
        // Vertices are points on a line; |v - target| never overestimates.
        let mut g = DirectedGraph::new();
        g.add_vertices([0, 1, 2, 3, 4]);
        g.add_edge(&0, &1, 1.0).unwrap();
        g.add_edge(&1, &2, 1.0).unwrap();
        g.add_edge(&2, &3, 1.0).unwrap();
        g.add_edge(&3, &4, 1.0).unwrap();
        g.add_edge(&0, &4, 10.0).unwrap();

        let h = |v: &i32, t: &i32| (*t - *v).abs() as f64;
        let path = g.find_shortest_path(&0, &4, Some(&h)).unwrap();
        assert_eq!(path, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_buffer_variant_clears_previous_contents() {
        let mut g = line_graph();
        let mut path = vec![42, 43];
        assert!(g
            .find_shortest_path_into(&0, &2, None, &mut path)
            .unwrap());
        assert_eq!(path, vec![0, 1, 2]);

        assert!(!g
            .find_shortest_path_into(&3, &0, None, &mut path)
            .unwrap());
        assert!(path.is_empty());
    }

    #[test]
    fn test_repeated_queries_reuse_engine() {
        let mut g = line_graph();
        for _ in 0..64 {
            assert_eq!(g.find_shortest_path(&0, &3, None).unwrap().len(), 4);
            assert_eq!(g.find_minimum_distance(&3, &3).unwrap(), 0.0);
            assert!(g.find_shortest_path(&3, &0, None).unwrap().is_empty());
        }
    }
}
