// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Waygraph Contributors

use thiserror::Error;

/// Errors reported by graph mutation and algorithm entry points.
///
/// Absent-path, non-DAG and disconnected-graph outcomes are ordinary return
/// values, not errors; only precondition violations surface here.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    /// An operation referenced a vertex value that is not in the graph.
    #[error("vertex is not in the graph")]
    VertexNotFound,

    /// Self loops are not allowed.
    #[error("self loops are not allowed")]
    SelfLoop,
}

pub type Result<T> = std::result::Result<T, GraphError>;
