// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Waygraph Contributors

//! Weighted-graph library for pathfinding and map analysis.
//!
//! Vertices are opaque user values with value equality; edges carry an
//! `f64` weight. A graph is either [`DirectedGraph`] or
//! [`UndirectedGraph`]; the kind decides edge identity and which extra
//! algorithms are available (topological sorting for directed graphs,
//! spanning trees for undirected ones). Shared by both kinds: unified
//! A*/Dijkstra shortest path, bounded breadth- and depth-first traversal,
//! and cycle detection.
//!
//! The library is tuned for "build once, query many times": every graph
//! embeds a reusable algorithm engine, and per-node search state is
//! invalidated lazily by a run counter instead of being swept between
//! queries, so repeated searches on an unchanging graph pay no per-call
//! reset cost. The flip side is that algorithm calls take `&mut self` and
//! one graph value must not be queried from multiple threads at once;
//! clone the graph for per-thread querying.
//!
//! ```
//! use waygraph::DirectedGraph;
//!
//! let mut g = DirectedGraph::new();
//! g.add_vertices(["hall", "door", "vault"]);
//! g.add_edge(&"hall", &"door", 1.0)?;
//! g.add_edge(&"door", &"vault", 4.0)?;
//!
//! let path = g.find_shortest_path(&"hall", &"vault", None)?;
//! assert_eq!(path, vec!["hall", "door", "vault"]);
//! assert_eq!(g.find_minimum_distance(&"hall", &"vault")?, 5.0);
//! # Ok::<(), waygraph::GraphError>(())
//! ```
//!
//! The [`grid`] module builds graphs directly from 2D tile maps and
//! provides the standard grid heuristics for A*.

pub(crate) mod algo;
mod error;
pub mod graph;
pub mod grid;

pub use algo::Heuristic;
pub use error::{GraphError, Result};
pub use graph::{
    Directed, DirectedGraph, Graph, GraphKind, Undirected, UndirectedGraph, DEFAULT_EDGE_WEIGHT,
};
