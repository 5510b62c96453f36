// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Waygraph Contributors

//! Graph algorithm engine.
//!
//! One engine is embedded in every graph. It owns the reusable priority
//! queue and work deque plus the monotonically increasing run counter that
//! drives the lazy-reset scratch protocol: each top-level algorithm
//! invocation draws a fresh run id, and per-node scratch records tagged
//! with an older id are treated as default the first time they are touched.
//!
//! The engine is deliberately single-threaded: the shared buffers and the
//! run counter are instance state reused across calls, with no internal
//! locking. Concurrent queries need one graph (and thus one engine) per
//! thread; every call here is synchronous and runs to completion.

mod binary_heap;
pub(crate) mod cycle_detection;
pub(crate) mod mst;
pub(crate) mod search;
pub(crate) mod shortest_path;
pub(crate) mod topological_sort;

use std::collections::VecDeque;

use crate::graph::node::NodeIdx;

pub use shortest_path::Heuristic;

pub(crate) use binary_heap::NodeHeap;

/// Reusable per-graph algorithm state.
#[derive(Debug, Clone, Default)]
pub(crate) struct Engine {
    pub(crate) heap: NodeHeap,
    pub(crate) deque: VecDeque<NodeIdx>,
    run_id: u64,
}

impl Engine {
    /// Starts a new top-level algorithm invocation and returns its run id.
    ///
    /// Ids start at 1 so that default scratch records (tagged 0) are always
    /// stale. Internal recursion must not draw a new id; one id covers one
    /// public call.
    #[inline]
    pub(crate) fn next_run(&mut self) -> u64 {
        self.run_id += 1;
        self.run_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_ids_are_monotonic_and_start_past_default() {
        let mut engine = Engine::default();
        let first = engine.next_run();
        assert_eq!(first, 1);
        assert!(engine.next_run() > first);
    }
}
