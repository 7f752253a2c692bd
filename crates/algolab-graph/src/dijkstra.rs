use crate::Graph;
use algolab_core::{AlgoLabError, Result, VertexId};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::debug;

/// Candidate in the priority queue. Ordered by ascending distance so the
/// max-heap `BinaryHeap` pops the closest vertex first.
#[derive(Debug, Clone, Copy, PartialEq)]
struct QueueEntry {
    distance: f64,
    vertex: VertexId,
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Weights are validated finite at insertion, so partial_cmp cannot
        // observe NaN here; Equal is the conservative fallback.
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Single-source shortest-path tree produced by [`shortest_paths`].
#[derive(Debug, Clone, Serialize)]
pub struct ShortestPathTree {
    source: VertexId,
    distances: Vec<f64>,
    predecessors: Vec<Option<VertexId>>,
}

impl ShortestPathTree {
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Shortest distance from the source; `f64::INFINITY` when `vertex` is
    /// unreachable or unknown.
    pub fn distance(&self, vertex: VertexId) -> f64 {
        self.distances.get(vertex).copied().unwrap_or(f64::INFINITY)
    }

    pub fn is_reachable(&self, vertex: VertexId) -> bool {
        self.distance(vertex).is_finite()
    }

    /// Reconstructs the shortest path from the source to `vertex` by walking
    /// predecessor back-pointers. `None` when the vertex is unreachable.
    pub fn path(&self, vertex: VertexId) -> Option<Vec<VertexId>> {
        if !self.is_reachable(vertex) {
            return None;
        }
        let mut path = vec![vertex];
        let mut current = vertex;
        while let Some(prev) = self.predecessors.get(current).copied().flatten() {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        Some(path)
    }
}

/// Dijkstra's algorithm over a binary heap with lazy deletion.
///
/// Instead of decrease-key, every relaxation pushes a fresh queue entry;
/// stale entries are discarded on pop when the vertex is already settled or
/// the stored key exceeds the best known distance. Once a vertex is popped
/// with its stored key equal to the best known distance, that distance is
/// final. O((V + E) log V).
pub fn shortest_paths(graph: &Graph, source: VertexId) -> Result<ShortestPathTree> {
    if !graph.contains_vertex(source) {
        return Err(AlgoLabError::VertexNotFound(format!(
            "source vertex {source} outside vertex range 0..{}",
            graph.vertex_count()
        )));
    }

    let count = graph.vertex_count();
    let mut distances = vec![f64::INFINITY; count];
    let mut predecessors: Vec<Option<VertexId>> = vec![None; count];
    let mut settled = vec![false; count];
    distances[source] = 0.0;

    let mut queue = BinaryHeap::new();
    queue.push(QueueEntry {
        distance: 0.0,
        vertex: source,
    });

    while let Some(QueueEntry { distance, vertex }) = queue.pop() {
        if settled[vertex] {
            continue;
        }
        // Stale entry: a shorter path was found after this one was queued.
        if distance > distances[vertex] {
            continue;
        }
        settled[vertex] = true;

        for edge in graph.neighbors(vertex) {
            if settled[edge.to] {
                continue;
            }
            let candidate = distance + edge.weight;
            if candidate < distances[edge.to] {
                distances[edge.to] = candidate;
                predecessors[edge.to] = Some(vertex);
                queue.push(QueueEntry {
                    distance: candidate,
                    vertex: edge.to,
                });
            }
        }
    }

    let reachable = distances.iter().filter(|d| d.is_finite()).count();
    debug!(source, reachable, vertices = count, "shortest paths computed");

    Ok(ShortestPathTree {
        source,
        distances,
        predecessors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// The 6-vertex directed network from the transport example.
    fn sample_graph() -> Graph {
        let mut g = Graph::new(6).unwrap();
        for (from, to, weight) in [
            (0, 1, 4.0),
            (0, 2, 2.0),
            (1, 2, 1.0),
            (1, 3, 5.0),
            (2, 3, 8.0),
            (2, 4, 10.0),
            (3, 4, 2.0),
            (3, 5, 6.0),
            (4, 5, 3.0),
        ] {
            g.add_edge(from, to, weight).unwrap();
        }
        g
    }

    #[test]
    fn finds_shortest_distances() {
        let tree = shortest_paths(&sample_graph(), 0).unwrap();
        assert_abs_diff_eq!(tree.distance(0), 0.0);
        assert_abs_diff_eq!(tree.distance(1), 4.0);
        assert_abs_diff_eq!(tree.distance(2), 2.0);
        assert_abs_diff_eq!(tree.distance(3), 9.0);
        assert_abs_diff_eq!(tree.distance(4), 11.0);
        assert_abs_diff_eq!(tree.distance(5), 14.0);
    }

    #[test]
    fn reconstructs_paths() {
        let tree = shortest_paths(&sample_graph(), 0).unwrap();
        assert_eq!(tree.path(0), Some(vec![0]));
        assert_eq!(tree.path(3), Some(vec![0, 1, 3]));
        assert_eq!(tree.path(5), Some(vec![0, 1, 3, 4, 5]));
    }

    #[test]
    fn unreachable_vertex_has_no_path() {
        let mut g = Graph::new(3).unwrap();
        g.add_edge(0, 1, 1.0).unwrap();
        let tree = shortest_paths(&g, 0).unwrap();
        assert!(!tree.is_reachable(2));
        assert_eq!(tree.distance(2), f64::INFINITY);
        assert_eq!(tree.path(2), None);
    }

    #[test]
    fn source_out_of_range_is_an_error() {
        let g = Graph::new(2).unwrap();
        assert!(matches!(
            shortest_paths(&g, 7),
            Err(AlgoLabError::VertexNotFound(_))
        ));
    }

    #[test]
    fn bidirectional_network() {
        let mut g = Graph::new(5).unwrap();
        for (a, b, weight) in [
            (0, 1, 10.0),
            (0, 4, 5.0),
            (1, 2, 1.0),
            (1, 4, 2.0),
            (2, 3, 4.0),
            (3, 0, 7.0),
            (3, 2, 6.0),
            (4, 1, 3.0),
            (4, 2, 9.0),
            (4, 3, 2.0),
        ] {
            g.add_edge_bidirectional(a, b, weight).unwrap();
        }
        let tree = shortest_paths(&g, 0).unwrap();
        assert_abs_diff_eq!(tree.distance(4), 5.0);
        assert_abs_diff_eq!(tree.distance(1), 7.0);
        assert_abs_diff_eq!(tree.distance(3), 7.0);
        assert_abs_diff_eq!(tree.distance(2), 8.0);
        assert_eq!(tree.path(2), Some(vec![0, 4, 1, 2]));
    }

    #[test]
    fn later_shorter_path_wins_over_queued_entry() {
        // 0->2 direct costs 10; 0->1->2 costs 3. The direct entry for 2 goes
        // stale in the queue and must be skipped on pop.
        let mut g = Graph::new(3).unwrap();
        g.add_edge(0, 2, 10.0).unwrap();
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(1, 2, 2.0).unwrap();
        let tree = shortest_paths(&g, 0).unwrap();
        assert_abs_diff_eq!(tree.distance(2), 3.0);
        assert_eq!(tree.path(2), Some(vec![0, 1, 2]));
    }

    #[test]
    fn self_loops_and_parallel_edges_are_harmless() {
        let mut g = Graph::new(2).unwrap();
        g.add_edge(0, 0, 1.0).unwrap();
        g.add_edge(0, 1, 5.0).unwrap();
        g.add_edge(0, 1, 3.0).unwrap();
        let tree = shortest_paths(&g, 0).unwrap();
        assert_abs_diff_eq!(tree.distance(0), 0.0);
        assert_abs_diff_eq!(tree.distance(1), 3.0);
    }

    #[test]
    fn zero_weight_edges_relax() {
        let mut g = Graph::new(3).unwrap();
        g.add_edge(0, 1, 0.0).unwrap();
        g.add_edge(1, 2, 0.0).unwrap();
        let tree = shortest_paths(&g, 0).unwrap();
        assert_abs_diff_eq!(tree.distance(2), 0.0);
        assert_eq!(tree.path(2), Some(vec![0, 1, 2]));
    }
}
