// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Waygraph Contributors

//! Indexed binary min-heap with decrease-key.
//!
//! Backs the shortest-path search. Each enqueued node records its current
//! heap position in its scratch record, so lowering the priority of an
//! already-enqueued node is O(log n) instead of a linear scan, and each
//! node is in the heap at most once per run (no lazy-deletion duplicates).

use crate::graph::node::{NodeIdx, Scratch};

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    node: NodeIdx,
    key: f64,
}

/// Reusable min-heap over node slots, keyed by `distance + estimate`.
///
/// Positions live in `Scratch::heap_pos` and are only meaningful for nodes
/// enqueued during the current run; the owning engine clears the heap at
/// the end of every search.
#[derive(Debug, Clone, Default)]
pub(crate) struct NodeHeap {
    entries: Vec<HeapEntry>,
}

impl NodeHeap {
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Inserts a node that is not currently in the heap.
    pub(crate) fn push(&mut self, scratch: &mut [Scratch], node: NodeIdx, key: f64) {
        let pos = self.entries.len();
        self.entries.push(HeapEntry { node, key });
        scratch[node.index()].heap_pos = pos as u32;
        self.sift_up(scratch, pos);
    }

    /// Removes and returns the node with the smallest key.
    ///
    /// Tie-breaking between equal keys is whatever order the sift happens
    /// to produce; callers must not rely on it.
    pub(crate) fn pop(&mut self, scratch: &mut [Scratch]) -> Option<NodeIdx> {
        let top = self.entries.first()?.node;
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        self.entries.pop();
        if !self.entries.is_empty() {
            scratch[self.entries[0].node.index()].heap_pos = 0;
            self.sift_down(scratch, 0);
        }
        Some(top)
    }

    /// Re-keys a node already in the heap, restoring heap order in either
    /// direction. The shortest-path search only ever lowers keys, but the
    /// structure does not care.
    pub(crate) fn update(&mut self, scratch: &mut [Scratch], node: NodeIdx, key: f64) {
        let pos = scratch[node.index()].heap_pos as usize;
        debug_assert_eq!(self.entries[pos].node, node);
        let old = self.entries[pos].key;
        self.entries[pos].key = key;
        if key < old {
            self.sift_up(scratch, pos);
        } else {
            self.sift_down(scratch, pos);
        }
    }

    fn sift_up(&mut self, scratch: &mut [Scratch], mut pos: usize) {
        while pos > 0 {
            let up = (pos - 1) / 2;
            if self.entries[pos].key >= self.entries[up].key {
                break;
            }
            self.entries.swap(pos, up);
            scratch[self.entries[pos].node.index()].heap_pos = pos as u32;
            pos = up;
        }
        scratch[self.entries[pos].node.index()].heap_pos = pos as u32;
    }

    fn sift_down(&mut self, scratch: &mut [Scratch], mut pos: usize) {
        loop {
            let left = pos * 2 + 1;
            if left >= self.entries.len() {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < self.entries.len() && self.entries[right].key < self.entries[left].key {
                child = right;
            }
            if self.entries[pos].key <= self.entries[child].key {
                break;
            }
            self.entries.swap(pos, child);
            scratch[self.entries[pos].node.index()].heap_pos = pos as u32;
            pos = child;
        }
        scratch[self.entries[pos].node.index()].heap_pos = pos as u32;
    }
}
