// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Waygraph Contributors

//! Core graph structure: vertex arena, adjacency, edge registry.
//!
//! Vertices are opaque user values with value equality; each is wrapped in
//! an arena slot addressed by a stable [`NodeIdx`]. The vertex index map
//! gives O(1) value lookup while two parallel `Vec`s carry insertion order
//! for vertices and edges, so iteration order is deterministic and the
//! directed in-place topological reorder is a cheap permutation.
//!
//! The graph is optimized for "build once, query many times": algorithm
//! calls reuse per-node scratch records through the run-id protocol in
//! [`node`] instead of resetting the whole graph between queries.

pub(crate) mod connection;
pub(crate) mod directed;
pub(crate) mod node;
pub(crate) mod undirected;

use std::fmt;
use std::marker::PhantomData;

use fxhash::FxHashMap;

use crate::algo::Engine;
use crate::error::{GraphError, Result};
use crate::graph::connection::{Connection, EdgeKey};
use crate::graph::node::{NodeIdx, NodeSlot, Scratch};

pub use connection::{GraphKind, DEFAULT_EDGE_WEIGHT};
pub use directed::Directed;
pub use undirected::Undirected;

/// A directed weighted graph.
pub type DirectedGraph<V> = Graph<V, Directed>;

/// An undirected weighted graph.
pub type UndirectedGraph<V> = Graph<V, Undirected>;

/// Weighted graph over opaque vertex values, parameterized by edge kind.
///
/// Use the [`DirectedGraph`] and [`UndirectedGraph`] aliases; the kind
/// decides edge identity and which algorithm surface is available.
/// Algorithm methods take `&mut self` because they write per-node scratch
/// state and reuse the embedded engine's buffers; a single graph value must
/// therefore not be queried from multiple threads at once (clone the graph
/// for per-thread querying).
pub struct Graph<V, K: GraphKind> {
    index: FxHashMap<V, NodeIdx>,
    pub(crate) nodes: Vec<Option<NodeSlot<V>>>,
    pub(crate) scratch: Vec<Scratch>,
    pub(crate) order: Vec<NodeIdx>,
    edge_order: Vec<EdgeKey>,
    free: Vec<NodeIdx>,
    pub(crate) engine: Engine,
    kind: PhantomData<K>,
}

impl<V, K: GraphKind> Graph<V, K>
where
    V: Clone + Eq + std::hash::Hash,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            nodes: Vec::new(),
            scratch: Vec::new(),
            order: Vec::new(),
            edge_order: Vec::new(),
            free: Vec::new(),
            engine: Engine::default(),
            kind: PhantomData,
        }
    }

    /// Creates an empty graph with preallocated vertex capacity.
    pub fn with_capacity(vertices: usize) -> Self {
        let mut graph = Self::new();
        graph.nodes.reserve(vertices);
        graph.scratch.reserve(vertices);
        graph.order.reserve(vertices);
        graph
    }

    /// Creates an empty graph of the same directed/undirected kind.
    ///
    /// Algorithms that return a derived graph (traversal trees, spanning
    /// forests) build their result with this.
    pub fn create_new(&self) -> Self {
        Self::new()
    }

    /// Whether edges in this graph are directed.
    #[inline]
    pub fn is_directed(&self) -> bool {
        K::DIRECTED
    }

    /// Number of vertices.
    #[inline]
    pub fn size(&self) -> usize {
        self.order.len()
    }

    /// Number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Adds a vertex. Returns false if an equal value is already present.
    pub fn add_vertex(&mut self, value: V) -> bool {
        if self.index.contains_key(&value) {
            return false;
        }
        self.insert_vertex(value);
        true
    }

    /// Adds every vertex from an iterator, skipping values already present.
    pub fn add_vertices<I: IntoIterator<Item = V>>(&mut self, values: I) {
        for value in values {
            self.add_vertex(value);
        }
    }

    /// Removes a vertex and every edge incident to it. Returns false if the
    /// value was not in the graph.
    pub fn remove_vertex(&mut self, value: &V) -> bool {
        let Some(idx) = self.index.remove(value) else {
            return false;
        };
        let slot = self.nodes[idx.index()]
            .take()
            .expect("indexed slot is occupied");

        // Detach the mirror half of every outgoing edge.
        for conn in &slot.out {
            if K::DIRECTED {
                self.slot_mut(conn.to).in_refs.retain(|&s| s != idx);
            } else {
                detach(self.slot_mut(conn.to), idx);
            }
        }
        // Directed graphs also track incoming edges, which live in other
        // nodes' adjacency.
        if K::DIRECTED {
            for &src in &slot.in_refs {
                detach(self.slot_mut(src), idx);
            }
        }

        self.edge_order.retain(|k| k.a != idx && k.b != idx);
        self.order.retain(|&i| i != idx);
        self.free.push(idx);
        true
    }

    /// Whether a vertex with this value is present.
    #[inline]
    pub fn contains_vertex(&self, value: &V) -> bool {
        self.index.contains_key(value)
    }

    /// Adds an edge with the given weight, or overwrites the weight if an
    /// edge between these endpoints already exists. Both vertices must
    /// already be in the graph.
    ///
    /// For undirected graphs, adding `(a, b)` after `(b, a)` updates the
    /// existing edge rather than creating a second one.
    pub fn add_edge(&mut self, a: &V, b: &V, weight: f64) -> Result<()> {
        if a == b {
            return Err(GraphError::SelfLoop);
        }
        let ia = self.require(a)?;
        let ib = self.require(b)?;
        self.add_edge_idx(ia, ib, weight);
        Ok(())
    }

    /// Adds an edge with [`DEFAULT_EDGE_WEIGHT`].
    pub fn add_default_edge(&mut self, a: &V, b: &V) -> Result<()> {
        self.add_edge(a, b, DEFAULT_EDGE_WEIGHT)
    }

    /// Removes the edge between two vertices. Returns false if no such edge
    /// exists (including when either vertex is absent).
    pub fn remove_edge(&mut self, a: &V, b: &V) -> bool {
        let (Some(ia), Some(ib)) = (self.node_of(a), self.node_of(b)) else {
            return false;
        };
        self.remove_edge_idx(ia, ib)
    }

    /// The weight of the edge from `a` to `b`, if present. For undirected
    /// graphs the direction of the query does not matter.
    pub fn edge_weight(&self, a: &V, b: &V) -> Option<f64> {
        let ia = self.node_of(a)?;
        let ib = self.node_of(b)?;
        let sa = self.slot(ia);
        let pos = *sa.adj.get(&ib)?;
        Some(sa.out[pos as usize].weight)
    }

    /// Whether an edge from `a` to `b` exists.
    #[inline]
    pub fn edge_exists(&self, a: &V, b: &V) -> bool {
        self.edge_weight(a, b).is_some()
    }

    /// Out-degree of a vertex, or `None` if the value is absent.
    pub fn degree(&self, value: &V) -> Option<usize> {
        self.node_of(value).map(|idx| self.slot(idx).out.len())
    }

    /// Iterates the neighbor values reachable by one outgoing edge.
    pub fn neighbors(&self, value: &V) -> Result<impl Iterator<Item = &V> + '_> {
        let idx = self.require(value)?;
        Ok(self
            .slot(idx)
            .out
            .iter()
            .map(move |conn| &self.slot(conn.to).value))
    }

    /// Iterates vertex values in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.order.iter().map(move |&idx| &self.slot(idx).value)
    }

    /// Iterates edges as `(a, b, weight)` in insertion order. Undirected
    /// edges appear once, with endpoints in storage order.
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V, f64)> + '_ {
        self.edge_order.iter().map(move |key| {
            let sa = self.slot(key.a);
            let sb = self.slot(key.b);
            let pos = *sa.adj.get(&key.b).expect("registry edge has adjacency");
            (&sa.value, &sb.value, sa.out[pos as usize].weight)
        })
    }

    /// Removes every vertex and edge. Engine state (the run counter) is
    /// kept, so scratch records never alias a future run.
    pub fn clear(&mut self) {
        self.index.clear();
        self.nodes.clear();
        self.scratch.clear();
        self.order.clear();
        self.edge_order.clear();
        self.free.clear();
    }

    // ---- internal arena plumbing ----

    #[inline]
    pub(crate) fn node_of(&self, value: &V) -> Option<NodeIdx> {
        self.index.get(value).copied()
    }

    /// Resolves a vertex value, failing fast on absent values: algorithms
    /// never silently treat an unknown vertex as "no path".
    #[inline]
    pub(crate) fn require(&self, value: &V) -> Result<NodeIdx> {
        self.node_of(value).ok_or(GraphError::VertexNotFound)
    }

    #[inline]
    pub(crate) fn slot(&self, idx: NodeIdx) -> &NodeSlot<V> {
        self.nodes[idx.index()]
            .as_ref()
            .expect("indexed slot is occupied")
    }

    #[inline]
    pub(crate) fn slot_mut(&mut self, idx: NodeIdx) -> &mut NodeSlot<V> {
        self.nodes[idx.index()]
            .as_mut()
            .expect("indexed slot is occupied")
    }

    fn insert_vertex(&mut self, value: V) -> NodeIdx {
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx.index()] = Some(NodeSlot::new(value.clone()));
                idx
            }
            None => {
                let idx = NodeIdx(self.nodes.len() as u32);
                self.nodes.push(Some(NodeSlot::new(value.clone())));
                self.scratch.push(Scratch::default());
                idx
            }
        };
        self.index.insert(value, idx);
        self.order.push(idx);
        idx
    }

    pub(crate) fn add_edge_idx(&mut self, a: NodeIdx, b: NodeIdx, weight: f64) {
        // Existing edge: overwrite the weight in place, never duplicate.
        let existing = {
            let sa = self.slot_mut(a);
            match sa.adj.get(&b).copied() {
                Some(pos) => {
                    sa.out[pos as usize].weight = weight;
                    true
                }
                None => false,
            }
        };
        if existing {
            if !K::DIRECTED {
                let sb = self.slot_mut(b);
                let pos = *sb.adj.get(&a).expect("undirected mirror adjacency");
                sb.out[pos as usize].weight = weight;
            }
            return;
        }

        let sa = self.slot_mut(a);
        sa.adj.insert(b, sa.out.len() as u32);
        sa.out.push(Connection { to: b, weight });

        let sb = self.slot_mut(b);
        if K::DIRECTED {
            sb.in_refs.push(a);
        } else {
            sb.adj.insert(a, sb.out.len() as u32);
            sb.out.push(Connection { to: a, weight });
        }

        self.edge_order.push(K::edge_key(a, b));
    }

    pub(crate) fn remove_edge_idx(&mut self, a: NodeIdx, b: NodeIdx) -> bool {
        if !detach(self.slot_mut(a), b) {
            return false;
        }
        if K::DIRECTED {
            self.slot_mut(b).in_refs.retain(|&s| s != a);
        } else {
            detach(self.slot_mut(b), a);
        }
        let key = K::edge_key(a, b);
        self.edge_order.retain(|k| *k != key);
        true
    }

    #[inline]
    pub(crate) fn edge_keys(&self) -> &[EdgeKey] {
        &self.edge_order
    }

    /// Weight of a registry edge, read from the `a` endpoint's adjacency.
    pub(crate) fn key_weight(&self, key: EdgeKey) -> f64 {
        let sa = self.slot(key.a);
        let pos = *sa.adj.get(&key.b).expect("registry edge has adjacency");
        sa.out[pos as usize].weight
    }

    /// Replaces the vertex iteration order with a permutation of itself.
    /// Used by the in-place topological reorder.
    pub(crate) fn set_order(&mut self, order: Vec<NodeIdx>) {
        debug_assert_eq!(order.len(), self.order.len());
        self.order = order;
    }
}

/// Removes `to` from a slot's adjacency, keeping list order and fixing the
/// position index of every entry that shifted down.
fn detach<V>(slot: &mut NodeSlot<V>, to: NodeIdx) -> bool {
    let Some(pos) = slot.adj.remove(&to) else {
        return false;
    };
    let NodeSlot { out, adj, .. } = slot;
    out.remove(pos as usize);
    for conn in &out[pos as usize..] {
        if let Some(p) = adj.get_mut(&conn.to) {
            *p -= 1;
        }
    }
    true
}

impl<V, K: GraphKind> Default for Graph<V, K>
where
    V: Clone + Eq + std::hash::Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, K: GraphKind> Clone for Graph<V, K>
where
    V: Clone + Eq + std::hash::Hash,
{
    fn clone(&self) -> Self {
        // The engine is cloned too (its buffers are empty between calls);
        // keeping the run counter means old scratch tags in the copy can
        // never collide with a future run id.
        Self {
            index: self.index.clone(),
            nodes: self.nodes.clone(),
            scratch: self.scratch.clone(),
            order: self.order.clone(),
            edge_order: self.edge_order.clone(),
            free: self.free.clone(),
            engine: self.engine.clone(),
            kind: PhantomData,
        }
    }
}

impl<V, K: GraphKind> fmt::Debug for Graph<V, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("directed", &K::DIRECTED)
            .field("vertices", &self.order.len())
            .field("edges", &self.edge_order.len())
            .finish()
    }
}
