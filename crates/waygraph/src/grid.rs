// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Waygraph Contributors

//! Grid-map helpers for roguelike and tile-map consumers.
//!
//! Builds graphs straight from 2D maps: character maps where `'#'` is a
//! wall, and cost maps where each cell carries the price of stepping into
//! it. Also provides the standard grid heuristics for A* over
//! [`GridPoint`] vertices.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::{DirectedGraph, UndirectedGraph};

/// One cell position on a 2D grid. `x` grows rightward, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Clockwise from up; the first four are the cardinals.
const CLOCKWISE: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];
const CARDINALS_CLOCKWISE: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Four-way grid distance. Admissible when diagonal movement is disallowed.
pub fn manhattan(from: &GridPoint, target: &GridPoint) -> f64 {
    ((target.x - from.x).abs() + (target.y - from.y).abs()) as f64
}

/// Eight-way grid distance where diagonal steps cost the same as cardinal
/// ones. Admissible for `eight_way` graphs.
pub fn chebyshev(from: &GridPoint, target: &GridPoint) -> f64 {
    (target.x - from.x).abs().max((target.y - from.y).abs()) as f64
}

/// Straight-line distance. Admissible for either movement rule, but weaker
/// than [`chebyshev`] on eight-way grids with unit-cost diagonals.
pub fn euclidean(from: &GridPoint, target: &GridPoint) -> f64 {
    let dx = (target.x - from.x) as f64;
    let dy = (target.y - from.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// The zero heuristic; search with it is plain Dijkstra.
pub fn dijkstra(_from: &GridPoint, _target: &GridPoint) -> f64 {
    0.0
}

/// Builds an undirected graph from a character map where `'#'` marks an
/// impassable cell and every other byte is walkable. Each row is one `y`
/// line; all edges get the default weight of 1.0. With `eight_way` the
/// diagonal neighbours are connected too.
pub fn walkable_grid(rows: &[&str], eight_way: bool) -> UndirectedGraph<GridPoint> {
    let height = rows.len() as i32;
    let width = rows.first().map_or(0, |r| r.len()) as i32;
    let wall = |x: i32, y: i32| rows[y as usize].as_bytes()[x as usize] == b'#';

    let mut graph = UndirectedGraph::with_capacity((width * height) as usize / 2);
    let mut cells = Vec::new();
    for x in 0..width {
        for y in 0..height {
            if !wall(x, y) {
                let pt = GridPoint::new(x, y);
                cells.push(pt);
                graph.add_vertex(pt);
            }
        }
    }

    let dirs: &[(i32, i32)] = if eight_way {
        &CLOCKWISE
    } else {
        &CARDINALS_CLOCKWISE
    };
    for center in cells {
        for &(dx, dy) in dirs {
            let (nx, ny) = (center.x + dx, center.y + dy);
            if nx < 0 || ny < 0 || nx >= width || ny >= height || wall(nx, ny) {
                continue;
            }
            let off = GridPoint::new(nx, ny);
            if !graph.edge_exists(&center, &off) {
                graph
                    .add_default_edge(&center, &off)
                    .expect("both grid cells were added above");
            }
        }
    }
    graph
}

/// Builds a directed graph from a cost map: a negative cell is impassable,
/// any other value is the cost of stepping into that cell. Every edge runs
/// from a neighbour into the cell and carries the cell's own cost, so
/// entering expensive terrain is what gets charged, regardless of where the
/// step came from.
pub fn costly_grid(costs: &[Vec<f64>], eight_way: bool) -> DirectedGraph<GridPoint> {
    let height = costs.len() as i32;
    let width = costs.first().map_or(0, |r| r.len()) as i32;
    let cost = |x: i32, y: i32| costs[y as usize][x as usize];

    let mut graph = DirectedGraph::with_capacity((width * height) as usize / 2);
    let mut cells = Vec::new();
    for x in 0..width {
        for y in 0..height {
            if cost(x, y) >= 0.0 {
                let pt = GridPoint::new(x, y);
                cells.push(pt);
                graph.add_vertex(pt);
            }
        }
    }

    let dirs: &[(i32, i32)] = if eight_way {
        &CLOCKWISE
    } else {
        &CARDINALS_CLOCKWISE
    };
    for center in cells {
        for &(dx, dy) in dirs {
            let (nx, ny) = (center.x + dx, center.y + dy);
            if nx < 0 || ny < 0 || nx >= width || ny >= height || cost(nx, ny) < 0.0 {
                continue;
            }
            let off = GridPoint::new(nx, ny);
            graph
                .add_edge(&off, &center, cost(center.x, center.y))
                .expect("both grid cells were added above");
        }
    }
    graph
}
