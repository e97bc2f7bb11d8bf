//! Dijkstra search over the currently known land.
//!
//! Both entry points share one search loop driven by [`MinHeap`]. The heap
//! has no decrease-key, so an improved distance is pushed as a new entry and
//! stale entries are dropped on extraction by checking the finalized set.

use crate::grid::{CostMode, Grid, NodeId, Position};
use crate::hash_table::HashTable;
use crate::min_heap::MinHeap;
use log::trace;
use std::cmp::Ordering;

/// Heap entry: a node and its tentative distance
#[derive(Debug, Clone, Copy)]
struct PathCandidate {
    node: NodeId,
    distance: f64,
}

impl PartialEq for PathCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance
    }
}

impl Eq for PathCandidate {}

impl PartialOrd for PathCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PathCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // MinHeap pops the smallest, so no reversal here
        self.distance
            .partial_cmp(&other.distance)
            .unwrap_or(Ordering::Equal)
    }
}

/// Where a finished search ended up
struct SearchOutcome {
    distance: f64,
    previous: HashTable<NodeId, NodeId>,
}

fn search(
    grid: &Grid,
    start: NodeId,
    dest: NodeId,
    mode: CostMode,
    track_previous: bool,
) -> Option<SearchOutcome> {
    let mut heap: MinHeap<PathCandidate> = MinHeap::new();
    let mut distances: HashTable<NodeId, f64> = HashTable::new();
    let mut previous: HashTable<NodeId, NodeId> = HashTable::new();
    let mut finalized: HashTable<NodeId, ()> = HashTable::new();

    distances.put(start, 0.0);
    heap.insert(PathCandidate {
        node: start,
        distance: 0.0,
    });

    let mut iterations = 0usize;
    while let Some(candidate) = heap.extract_min() {
        let current = candidate.node;
        if finalized.contains_key(&current) {
            continue;
        }
        finalized.put(current, ());
        iterations += 1;

        let current_distance = distances.get_or_default(&current, f64::INFINITY);

        if current == dest {
            trace!(
                "[dijkstra] reached {} at distance {:.2} after {} expansions",
                grid.position(dest),
                current_distance,
                iterations
            );
            return Some(SearchOutcome {
                distance: current_distance,
                previous,
            });
        }

        for edge in grid.neighbors(current) {
            let cost = grid.edge_cost(edge, mode);
            if !cost.is_finite() {
                continue;
            }
            let new_distance = current_distance + cost;
            if new_distance < distances.get_or_default(&edge.to, f64::INFINITY) {
                distances.put(edge.to, new_distance);
                if track_previous {
                    previous.put(edge.to, current);
                }
                heap.insert(PathCandidate {
                    node: edge.to,
                    distance: new_distance,
                });
            }
        }
    }

    trace!(
        "[dijkstra] {} unreachable from {} after {} expansions",
        grid.position(dest),
        grid.position(start),
        iterations
    );
    None
}

/// Shortest path from `start` to `dest`, both ends included, treating every
/// discovered hidden obstacle as impassable. `None` if no route exists.
pub fn find_shortest_path(grid: &Grid, start: NodeId, dest: NodeId) -> Option<Vec<NodeId>> {
    let outcome = search(grid, start, dest, CostMode::Standard, true)?;

    let mut path = vec![dest];
    let mut current = dest;
    while let Some(&prev) = outcome.previous.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    Some(path)
}

/// Length of the shortest route when `class` is treated as passable even
/// where it has been discovered. `f64::INFINITY` if no route exists.
pub fn shortest_distance_ignoring(grid: &Grid, start: NodeId, dest: NodeId, class: u32) -> f64 {
    search(grid, start, dest, CostMode::IgnoreClass(class), false)
        .map(|outcome| outcome.distance)
        .unwrap_or(f64::INFINITY)
}

/// Sum of base travel times along consecutive path nodes
pub fn path_cost(grid: &Grid, path: &[NodeId]) -> f64 {
    path.windows(2)
        .map(|pair| {
            grid.neighbors(pair[0])
                .iter()
                .filter(|edge| edge.to == pair[1])
                .map(|edge| edge.travel_time)
                .fold(f64::INFINITY, f64::min)
        })
        .sum()
}

/// Format path for display
pub fn format_path(grid: &Grid, path: &[NodeId]) -> String {
    if path.is_empty() {
        return "No path".to_string();
    }

    path.iter()
        .map(|&id| {
            let Position { x, y } = grid.position(id);
            format!("({},{})", x, y)
        })
        .collect::<Vec<_>>()
        .join(" -> ")
}
