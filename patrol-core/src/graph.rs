//! Adjacency graphs keyed by exact coordinates.

use std::collections::{HashMap, HashSet};

use crate::GeoPoint;

/// Adjacency lists keyed by node.
///
/// Nodes keep their insertion order. Edge weights are implicit: every edge
/// costs the great-circle distance between its endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<GeoPoint>,
    adjacency: HashMap<GeoPoint, Vec<GeoPoint>>,
}

impl Graph {
    /// Construct a graph from explicit adjacency lists.
    ///
    /// A node that appears more than once keeps its first position and its
    /// last neighbour list.
    pub fn from_adjacency<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (GeoPoint, Vec<GeoPoint>)>,
    {
        let mut graph = Self::default();
        for (node, neighbours) in entries {
            if graph.adjacency.insert(node, neighbours).is_none() {
                graph.nodes.push(node);
            }
        }
        graph
    }

    /// Neighbours of `node`, or `None` when it is not a key.
    #[must_use]
    pub fn neighbours(&self, node: &GeoPoint) -> Option<&[GeoPoint]> {
        self.adjacency.get(node).map(Vec::as_slice)
    }

    /// Whether `node` has an adjacency entry.
    #[must_use]
    pub fn contains(&self, node: &GeoPoint) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Nodes in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[GeoPoint] {
        &self.nodes
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}

/// Connect every node to every other node.
///
/// Duplicate inputs collapse to a single node and no node lists itself as a
/// neighbour. Neighbour lists follow input order.
///
/// # Examples
/// ```
/// use patrol_core::{GeoPoint, build_complete_graph};
///
/// let a = GeoPoint::new(0.0, 0.0);
/// let b = GeoPoint::new(0.0, 1.0);
/// let c = GeoPoint::new(1.0, 1.0);
/// let graph = build_complete_graph(&[a, b, c]);
/// assert_eq!(graph.neighbours(&a), Some(&[b, c][..]));
/// assert_eq!(graph.edge_count(), 6);
/// ```
#[must_use]
pub fn build_complete_graph(nodes: &[GeoPoint]) -> Graph {
    let mut seen = HashSet::with_capacity(nodes.len());
    let unique: Vec<GeoPoint> = nodes
        .iter()
        .copied()
        .filter(|node| seen.insert(*node))
        .collect();

    Graph::from_adjacency(unique.iter().map(|node| {
        let neighbours = unique.iter().copied().filter(|other| other != node).collect();
        (*node, neighbours)
    }))
}
