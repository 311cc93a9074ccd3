//! Undirected weighted graph with a fixed number of nodes.

use std::collections::HashMap;

use thiserror::Error;

/// Errors of the graph accessors.
///
/// These are programmer errors: the caller passed a node that does not exist,
/// asked for the weight of an edge that was never added or tried to add a loop.
#[derive(Error, Copy, Clone, PartialEq, Eq, Debug)]
pub enum GraphError {
    #[error("Node index {index} is out of range, graph has {node_count} nodes")]
    OutOfRange { index: usize, node_count: usize },

    #[error("No edge between nodes {0} and {1}")]
    NotFound(usize, usize),

    #[error("Edge must join two distinct nodes, got a loop on node {0}")]
    SelfLoop(usize),
}

pub type Result<T> = std::result::Result<T, GraphError>;

/// Undirected graph with `f64` edge weights.
///
/// Nodes are dense indices in `0..node_count()` and can't be added or removed
/// after construction. Every edge is stored twice (once per endpoint) with the
/// same weight, so adjacency is always symmetric.
///
/// Each node additionally carries a scratch `f64` value which the graph itself
/// never interprets.
#[derive(Clone, Debug)]
pub struct WeightedGraph {
    /// `links[a][b]` is the weight of the edge `a - b`.
    links: Vec<HashMap<usize, f64>>,

    /// Per-node scratch values.
    values: Vec<f64>,

    /// Number of distinct unordered adjacent pairs.
    edge_count: usize,
}

impl WeightedGraph {
    /// Create a graph with `node_count` isolated nodes.
    /// All node values start at `f64::INFINITY`.
    pub fn new(node_count: usize) -> Self {
        WeightedGraph {
            links: vec![HashMap::new(); node_count],
            values: vec![f64::INFINITY; node_count],
            edge_count: 0,
        }
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.links.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        if index < self.node_count() {
            Ok(())
        } else {
            Err(GraphError::OutOfRange { index, node_count: self.node_count() })
        }
    }

    /// Test if there is an edge between two nodes.
    pub fn is_adjacent(&self, a: usize, b: usize) -> Result<bool> {
        self.check_index(a)?;
        self.check_index(b)?;
        Ok(self.links[a].contains_key(&b))
    }

    /// All nodes connected to `node`, in unspecified order.
    pub fn neighbors(&self, node: usize) -> Result<impl Iterator<Item=usize> + '_> {
        self.check_index(node)?;
        Ok(self.links[node].keys().copied())
    }

    /// All nodes connected to `node` together with the connecting edge weight, in unspecified order.
    pub fn links(&self, node: usize) -> Result<impl Iterator<Item=(usize, f64)> + '_> {
        self.check_index(node)?;
        Ok(self.links[node].iter().map(|(&n, &w)| (n, w)))
    }

    /// Every edge once as `(a, b, weight)` with `a < b`, in unspecified order.
    pub fn edges(&self) -> impl Iterator<Item=(usize, usize, f64)> + '_ {
        self.links.iter().enumerate().flat_map(|(a, links)| {
            links.iter().filter(move |&(&b, _)| a < b).map(move |(&b, &w)| (a, b, w))
        })
    }

    /// Create the edge `a - b` or overwrite its weight if it already exists.
    ///
    /// The weight is not validated. Negative weights break shortest path search,
    /// keeping them out is up to whoever builds the graph.
    pub fn set_edge(&mut self, a: usize, b: usize, weight: f64) -> Result<()> {
        self.check_index(a)?;
        self.check_index(b)?;
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }

        if self.links[a].insert(b, weight).is_none() {
            self.edge_count += 1;
        }
        self.links[b].insert(a, weight);

        Ok(())
    }

    /// Delete the edge `a - b` in both directions.
    /// Returns `false` (and leaves the edge counter alone) if there was no such edge.
    pub fn remove_edge(&mut self, a: usize, b: usize) -> Result<bool> {
        self.check_index(a)?;
        self.check_index(b)?;

        let removed = self.links[a].remove(&b).is_some();
        self.links[b].remove(&a);
        if removed {
            self.edge_count -= 1;
        }

        Ok(removed)
    }

    /// Weight of the edge `a - b`.
    pub fn edge_weight(&self, a: usize, b: usize) -> Result<f64> {
        self.check_index(a)?;
        self.check_index(b)?;
        self.links[a].get(&b).copied().ok_or(GraphError::NotFound(a, b))
    }

    pub fn node_value(&self, node: usize) -> Result<f64> {
        self.check_index(node)?;
        Ok(self.values[node])
    }

    pub fn set_node_value(&mut self, node: usize, value: f64) -> Result<()> {
        self.check_index(node)?;
        self.values[node] = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{GraphError, WeightedGraph};

    fn sorted(mut v: Vec<usize>) -> Vec<usize> {
        v.sort();
        v
    }

    #[test]
    fn test_new_graph() {
        let g = WeightedGraph::new(3);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.is_adjacent(0, 1), Ok(false));
        assert_eq!(g.node_value(2), Ok(f64::INFINITY));
        assert_eq!(g.neighbors(1).map(|n| n.count()), Ok(0));
    }

    #[test]
    fn test_set_edge_is_symmetric() {
        let mut g = WeightedGraph::new(4);
        g.set_edge(0, 2, 1.5).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.is_adjacent(0, 2), Ok(true));
        assert_eq!(g.is_adjacent(2, 0), Ok(true));
        assert_eq!(g.edge_weight(0, 2), Ok(1.5));
        assert_eq!(g.edge_weight(2, 0), Ok(1.5));
        assert_eq!(sorted(g.neighbors(0).unwrap().collect()), vec![2]);
        assert_eq!(sorted(g.neighbors(2).unwrap().collect()), vec![0]);
    }

    #[test]
    fn test_set_edge_overwrites() {
        let mut g = WeightedGraph::new(3);
        g.set_edge(0, 1, 1.0).unwrap();
        g.set_edge(1, 0, 7.0).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge_weight(0, 1), Ok(7.0));
        assert_eq!(g.edges().collect::<Vec<_>>(), vec![(0, 1, 7.0)]);
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut g = WeightedGraph::new(2);
        assert_eq!(g.set_edge(1, 1, 1.0), Err(GraphError::SelfLoop(1)));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_remove_edge() {
        let mut g = WeightedGraph::new(3);
        g.set_edge(0, 1, 1.0).unwrap();
        g.set_edge(1, 2, 2.0).unwrap();
        assert_eq!(g.edge_count(), 2);

        assert_eq!(g.remove_edge(1, 0), Ok(true));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.is_adjacent(0, 1), Ok(false));
        assert_eq!(g.is_adjacent(1, 0), Ok(false));
        assert_eq!(g.edge_weight(0, 1), Err(GraphError::NotFound(0, 1)));

        // Removing a missing edge must not desync the counter
        assert_eq!(g.remove_edge(0, 1), Ok(false));
        assert_eq!(g.remove_edge(0, 2), Ok(false));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_out_of_range() {
        let mut g = WeightedGraph::new(2);
        let oor = |index| GraphError::OutOfRange { index, node_count: 2 };
        assert_eq!(g.is_adjacent(0, 2), Err(oor(2)));
        assert_eq!(g.is_adjacent(5, 0), Err(oor(5)));
        assert_eq!(g.set_edge(0, 2, 1.0), Err(oor(2)));
        assert_eq!(g.remove_edge(3, 0), Err(oor(3)));
        assert_eq!(g.edge_weight(0, 9), Err(oor(9)));
        assert_eq!(g.node_value(2), Err(oor(2)));
        assert_eq!(g.set_node_value(2, 0.0), Err(oor(2)));
        assert!(g.neighbors(2).is_err());
        assert!(g.links(2).is_err());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_node_values() {
        let mut g = WeightedGraph::new(2);
        g.set_node_value(1, 3.25).unwrap();
        assert_eq!(g.node_value(1), Ok(3.25));
        assert_eq!(g.node_value(0), Ok(f64::INFINITY));
    }

    #[test]
    fn test_edges_lists_each_pair_once() {
        let mut g = WeightedGraph::new(4);
        g.set_edge(0, 1, 1.0).unwrap();
        g.set_edge(3, 1, 2.0).unwrap();
        g.set_edge(2, 0, 3.0).unwrap();
        let mut edges = g.edges().collect::<Vec<_>>();
        edges.sort_by(|x, y| (x.0, x.1).cmp(&(y.0, y.1)));
        assert_eq!(edges, vec![(0, 1, 1.0), (0, 2, 3.0), (1, 3, 2.0)]);
        assert_eq!(edges.len(), g.edge_count());
    }
}
