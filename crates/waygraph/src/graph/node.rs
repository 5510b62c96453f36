// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Waygraph Contributors

//! Node arena slots and the per-run scratch-state protocol.
//!
//! Algorithm state (visited flags, tentative distances, back-pointers) is
//! stored per node but tagged with the run id of the algorithm invocation
//! that last wrote it. A stale tag means the whole record is treated as
//! default without being rewritten, so starting a new query is O(1) instead
//! of an O(V) sweep over the graph.

use fxhash::FxHashMap;

use crate::graph::connection::Connection;

/// Dense arena index identifying one node slot.
///
/// Node identity is slot identity: two nodes are never equal, even when they
/// wrap equal vertex values. Slots stay stable across unrelated mutations;
/// a removed slot may be reused by a later `add_vertex`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIdx(pub(crate) u32);

impl NodeIdx {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One occupied arena slot: the wrapped vertex value plus adjacency.
///
/// Outgoing connections are kept twice: an ordered `Vec` for fast iteration
/// and a neighbor-to-position map for O(1) edge lookup. The two views are
/// kept consistent by the mutation paths in `Graph`.
#[derive(Debug, Clone)]
pub(crate) struct NodeSlot<V> {
    pub(crate) value: V,
    pub(crate) out: Vec<Connection>,
    pub(crate) adj: FxHashMap<NodeIdx, u32>,
    /// Sources of incoming edges; only maintained for directed graphs,
    /// where removal needs to find edges that point at this node.
    pub(crate) in_refs: Vec<NodeIdx>,
}

impl<V> NodeSlot<V> {
    pub(crate) fn new(value: V) -> Self {
        Self {
            value,
            out: Vec::new(),
            adj: FxHashMap::default(),
            in_refs: Vec::new(),
        }
    }
}

/// Resolves an arena index against a borrowed slot slice. Algorithms use
/// this to walk adjacency while holding scratch records mutably.
#[inline]
pub(crate) fn slot_at<V>(nodes: &[Option<NodeSlot<V>>], idx: NodeIdx) -> &NodeSlot<V> {
    nodes[idx.index()].as_ref().expect("indexed slot is occupied")
}

/// Per-node algorithm scratch state, valid only for a single run id.
#[derive(Debug, Clone)]
pub(crate) struct Scratch {
    /// Run id of the invocation that last touched this record. Slots start
    /// at 0 and the engine issues ids from 1, so a fresh slot is always
    /// stale.
    pub(crate) run_id: u64,
    /// Node has been finalized (closed set / dequeued / post-order done).
    pub(crate) visited: bool,
    /// Node has been discovered but not finalized. Shortest path uses this
    /// as "enqueued this run"; topological sort and cycle detection use it
    /// as recursion-stack membership.
    pub(crate) seen: bool,
    /// Tentative path cost from the search start.
    pub(crate) distance: f64,
    /// Heuristic estimate to the target, computed once on first discovery.
    pub(crate) estimate: f64,
    /// Search predecessor for path reconstruction and traversal trees.
    pub(crate) prev: Option<NodeIdx>,
    /// Union-find parent (Kruskal). `None` means the node is its own root.
    pub(crate) parent: Option<NodeIdx>,
    /// Edge depth from the traversal root, or union-find rank.
    pub(crate) depth: i32,
    /// Position of this node inside the engine's binary heap.
    pub(crate) heap_pos: u32,
}

impl Default for Scratch {
    fn default() -> Self {
        Self {
            run_id: 0,
            visited: false,
            seen: false,
            distance: f64::MAX,
            estimate: 0.0,
            prev: None,
            parent: None,
            depth: 0,
            heap_pos: 0,
        }
    }
}

impl Scratch {
    /// Makes this record valid for `run`, resetting it to defaults if it
    /// was written by an earlier run. Returns true if a reset happened.
    #[inline]
    pub(crate) fn ensure(&mut self, run: u64) -> bool {
        if self.run_id == run {
            return false;
        }
        *self = Scratch {
            run_id: run,
            ..Scratch::default()
        };
        true
    }
}
