// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Waygraph Contributors

//! Kruskal spanning trees for undirected graphs.
//!
//! Edges are taken in weight order and accepted unless they would close a
//! cycle, tracked by a union-find living in the per-run scratch records:
//! `parent` holds the set parent and `depth` the union rank, both valid for
//! this run only. A disconnected graph yields a spanning forest.

use std::hash::Hash;

use tracing::debug;

use crate::graph::node::{NodeIdx, Scratch};
use crate::graph::{Graph, Undirected};

impl<V> Graph<V, Undirected>
where
    V: Clone + Eq + Hash,
{
    /// The spanning tree of least total weight.
    pub fn minimum_weight_spanning_tree(&mut self) -> Self {
        self.spanning_tree(true)
    }

    /// Builds a spanning tree (or forest, when the graph is disconnected)
    /// over all vertices, minimizing total edge weight when `minimize` is
    /// true and maximizing it otherwise. Accepted edges keep their original
    /// weights; ties are broken by edge insertion order.
    pub fn spanning_tree(&mut self, minimize: bool) -> Self {
        let run = self.engine.next_run();
        let mut tree = self.create_new();
        for &idx in &self.order {
            tree.add_vertex(self.slot(idx).value.clone());
        }

        let mut edges = self.edge_keys().to_vec();
        edges.sort_by(|x, y| {
            let (wx, wy) = (self.key_weight(*x), self.key_weight(*y));
            if minimize {
                wx.total_cmp(&wy)
            } else {
                wy.total_cmp(&wx)
            }
        });

        let max_edges = self.size().saturating_sub(1);
        let mut accepted = 0;
        for key in edges {
            if edge_creates_cycle(&mut self.scratch, run, key.a, key.b) {
                continue;
            }
            let weight = self.key_weight(key);
            let a = self.slot(key.a).value.clone();
            let b = self.slot(key.b).value.clone();
            tree.add_edge(&a, &b, weight)
                .expect("spanning tree endpoints were added above");
            accepted += 1;
            if accepted == max_edges {
                break;
            }
        }
        debug!(
            vertices = tree.size(),
            edges = tree.edge_count(),
            minimize,
            "spanning tree built"
        );
        tree
    }
}

/// Union-find step: joins the sets of `a` and `b`, or reports that they were
/// already connected. A freshly reset record (`parent == None`) is its own
/// root.
fn edge_creates_cycle(scratch: &mut [Scratch], run: u64, a: NodeIdx, b: NodeIdx) -> bool {
    scratch[a.index()].ensure(run);
    scratch[b.index()].ensure(run);
    let root_a = find(scratch, a);
    let root_b = find(scratch, b);
    if root_a == root_b {
        return true;
    }
    union_by_rank(scratch, root_a, root_b);
    false
}

/// Finds the set root, compressing the entry node's parent link.
fn find(scratch: &mut [Scratch], node: NodeIdx) -> NodeIdx {
    let mut root = node;
    while let Some(p) = scratch[root.index()].parent {
        root = p;
    }
    if root != node {
        scratch[node.index()].parent = Some(root);
    }
    root
}

fn union_by_rank(scratch: &mut [Scratch], root_a: NodeIdx, root_b: NodeIdx) {
    if scratch[root_a.index()].depth < scratch[root_b.index()].depth {
        scratch[root_a.index()].parent = Some(root_b);
    } else {
        scratch[root_b.index()].parent = Some(root_a);
        if scratch[root_a.index()].depth == scratch[root_b.index()].depth {
            scratch[root_a.index()].depth += 1;
        }
    }
}
