use algolab_core::{AlgoLabError, Result, VertexId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outgoing edge of a weighted digraph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub to: VertexId,
    pub weight: f64,
}

/// Adjacency-list weighted digraph over a fixed vertex count.
///
/// Edge weights are validated at insertion: finite and non-negative, which
/// is what the shortest-path algorithms assume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl Graph {
    pub fn new(vertex_count: usize) -> Result<Self> {
        if vertex_count == 0 {
            return Err(AlgoLabError::Graph(
                "graph must have at least one vertex".to_string(),
            ));
        }
        Ok(Self {
            adjacency: vec![Vec::new(); vertex_count],
            edge_count: 0,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn add_edge(&mut self, from: VertexId, to: VertexId, weight: f64) -> Result<()> {
        let count = self.vertex_count();
        if from >= count || to >= count {
            return Err(AlgoLabError::VertexNotFound(format!(
                "edge {from} -> {to} outside vertex range 0..{count}"
            )));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(AlgoLabError::Graph(format!(
                "edge {from} -> {to} has invalid weight {weight}; weights must be finite and non-negative"
            )));
        }
        self.adjacency[from].push(Edge { to, weight });
        self.edge_count += 1;
        Ok(())
    }

    /// Inserts the edge in both directions with the same weight.
    pub fn add_edge_bidirectional(&mut self, a: VertexId, b: VertexId, weight: f64) -> Result<()> {
        self.add_edge(a, b, weight)?;
        self.add_edge(b, a, weight)
    }

    /// Outgoing edges of `vertex`; empty for unknown vertices.
    pub fn neighbors(&self, vertex: VertexId) -> &[Edge] {
        self.adjacency.get(vertex).map_or(&[], Vec::as_slice)
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        vertex < self.vertex_count()
    }
}

/// Serde-friendly graph description, e.g. loaded from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDefinition {
    pub vertices: usize,
    #[serde(default)]
    pub bidirectional: bool,
    pub edges: Vec<EdgeDefinition>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EdgeDefinition {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: f64,
}

impl GraphDefinition {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn build(&self) -> Result<Graph> {
        let mut graph = Graph::new(self.vertices)?;
        for edge in &self.edges {
            if self.bidirectional {
                graph.add_edge_bidirectional(edge.from, edge.to, edge.weight)?;
            } else {
                graph.add_edge(edge.from, edge.to, edge.weight)?;
            }
        }
        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "built graph from definition"
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_graph() {
        assert!(Graph::new(0).is_err());
    }

    #[test]
    fn add_edge_validates_endpoints() {
        let mut g = Graph::new(3).unwrap();
        assert!(g.add_edge(0, 1, 2.0).is_ok());
        assert!(matches!(
            g.add_edge(0, 3, 1.0),
            Err(AlgoLabError::VertexNotFound(_))
        ));
        assert!(matches!(
            g.add_edge(5, 0, 1.0),
            Err(AlgoLabError::VertexNotFound(_))
        ));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn add_edge_validates_weight() {
        let mut g = Graph::new(2).unwrap();
        assert!(g.add_edge(0, 1, -1.0).is_err());
        assert!(g.add_edge(0, 1, f64::NAN).is_err());
        assert!(g.add_edge(0, 1, f64::INFINITY).is_err());
        assert!(g.add_edge(0, 1, 0.0).is_ok());
    }

    #[test]
    fn bidirectional_adds_both_directions() {
        let mut g = Graph::new(2).unwrap();
        g.add_edge_bidirectional(0, 1, 4.0).unwrap();
        assert_eq!(g.neighbors(0), &[Edge { to: 1, weight: 4.0 }]);
        assert_eq!(g.neighbors(1), &[Edge { to: 0, weight: 4.0 }]);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn neighbors_of_unknown_vertex_is_empty() {
        let g = Graph::new(1).unwrap();
        assert!(g.neighbors(9).is_empty());
    }

    #[test]
    fn definition_builds_a_graph() {
        let raw = r#"{
            "vertices": 3,
            "bidirectional": true,
            "edges": [
                {"from": 0, "to": 1, "weight": 1.5},
                {"from": 1, "to": 2, "weight": 2.5}
            ]
        }"#;
        let def = GraphDefinition::from_json(raw).unwrap();
        let g = def.build().unwrap();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.neighbors(2).len(), 1);
    }

    #[test]
    fn definition_rejects_bad_edges() {
        let def = GraphDefinition {
            vertices: 2,
            bidirectional: false,
            edges: vec![EdgeDefinition {
                from: 0,
                to: 5,
                weight: 1.0,
            }],
        };
        assert!(def.build().is_err());
    }
}
