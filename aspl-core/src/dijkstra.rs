//! Dijkstra shortest path search.

use log::trace;
use thiserror::Error;

use crate::graph::{GraphError, WeightedGraph};
use crate::pqueue::{PriorityQueue, QueueError};

#[derive(Error, Copy, Clone, PartialEq, Eq, Debug)]
pub enum SearchError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Frontier error: {0}")]
    Frontier(#[from] QueueError),
}

/// Single source, single target shortest path solver.
///
/// The solver borrows the graph it searches and keeps all per-run state
/// (tentative distances, settled flags, predecessor links) in its own buffers,
/// which are reset and reused on every `update_graph()` call.
/// The graph is only read, so any number of solvers may share one graph.
///
/// Edge weights must be non-negative, this is not checked.
///
/// When several shortest paths of equal cost exist, which one `path()` returns
/// depends on the graph's neighbor iteration order. The cost never does.
pub struct ShortestPath<'g> {
    graph: &'g WeightedGraph,
    source: usize,
    target: usize,

    /// Nodes discovered but not yet settled, keyed by tentative distance.
    frontier: PriorityQueue<usize, f64>,

    /// Shortest distance from `source` found so far.
    distance: Vec<f64>,

    /// Nodes popped from the frontier, their distance is final.
    visited: Vec<bool>,

    /// Predecessor of each node on the best known path.
    previous: Vec<Option<usize>>,

    path_exists: bool,
}

impl<'g> ShortestPath<'g> {
    /// Create the solver and immediately run the search from `source` to `target`.
    pub fn new(graph: &'g WeightedGraph, source: usize, target: usize) -> Result<Self, SearchError> {
        let mut solver = ShortestPath {
            graph,
            source,
            target,
            frontier: PriorityQueue::min_first(),
            distance: Vec::new(),
            visited: Vec::new(),
            previous: Vec::new(),
            path_exists: false,
        };
        solver.update_graph(graph, source, target)?;
        Ok(solver)
    }

    /// Rebind the solver to a graph and endpoints and run the search again.
    /// Nothing from the previous run is reused.
    pub fn update_graph(&mut self, graph: &'g WeightedGraph, source: usize, target: usize) -> Result<(), SearchError> {
        graph.check_index(source)?;
        graph.check_index(target)?;

        self.graph = graph;
        self.source = source;
        self.target = target;
        self.path_exists = false;
        self.initialize();
        self.path_exists = self.run()?;

        trace!("shortest path {} -> {}: exists={} cost={}", source, target, self.path_exists, self.path_cost());
        Ok(())
    }

    #[inline]
    pub fn source(&self) -> usize {
        self.source
    }

    #[inline]
    pub fn target(&self) -> usize {
        self.target
    }

    /// Whether the target is reachable from the source.
    #[inline]
    pub fn exists(&self) -> bool {
        self.path_exists
    }

    /// Sum of edge weights along the shortest path, `f64::INFINITY` if there is no path.
    pub fn path_cost(&self) -> f64 {
        if self.path_exists {
            self.distance[self.target]
        } else {
            f64::INFINITY
        }
    }

    /// Shortest path from source to target, both included.
    ///
    /// Empty if there is no path. When source and target are the same node
    /// the result is that node twice: `[source, source]`.
    pub fn path(&self) -> Vec<usize> {
        let mut path = self.reverse_path();

        // Reverse the path, so the result will be from `source` to `target`
        path.reverse();

        path
    }

    /// Same as `path()` but from target to source.
    pub fn reverse_path(&self) -> Vec<usize> {
        if !self.path_exists {
            return Vec::new();
        }
        if self.source == self.target {
            return vec![self.source, self.source];
        }

        let mut rev_path = vec![self.target];
        let mut cur = self.target;
        while let Some(prev) = self.previous[cur] {
            rev_path.push(prev);
            cur = prev;
        }

        debug_assert_eq!(cur, self.source, "path does not lead to the source");
        rev_path
    }

    fn initialize(&mut self) {
        let n = self.graph.node_count();

        self.frontier.clear();

        self.distance.clear();
        self.distance.resize(n, f64::INFINITY);

        self.visited.clear();
        self.visited.resize(n, false);

        self.previous.clear();
        self.previous.resize(n, None);
    }

    /// Main loop. Returns `true` as soon as the target is settled,
    /// `false` if the frontier runs dry first (target is in another component).
    fn run(&mut self) -> Result<bool, SearchError> {
        let graph = self.graph;

        self.distance[self.source] = 0.0;
        self.frontier.push(self.source, 0.0)?;

        while !self.frontier.is_empty() {
            // Node with the smallest tentative distance is settled
            let node = self.frontier.pop()?;
            self.visited[node] = true;
            if node == self.target {
                return Ok(true);
            }

            for (neighbor, weight) in graph.links(node)? {
                if self.visited[neighbor] {
                    continue;
                }

                let dist = self.distance[node] + weight;
                if dist < self.distance[neighbor] {
                    self.distance[neighbor] = dist;
                    self.previous[neighbor] = Some(node);
                    if !self.frontier.change_priority(&neighbor, dist) {
                        self.frontier.push(neighbor, dist)?;
                    }
                }
            }
        }

        Ok(false)
    }
}

#[cfg(test)]
fn path_weight(graph: &WeightedGraph, path: &[usize]) -> f64 {
    path.windows(2).map(|w| graph.edge_weight(w[0], w[1]).expect("path uses missing edge")).sum()
}

#[cfg(test)]
fn graph_from(node_count: usize, edges: &[(usize, usize, f64)]) -> WeightedGraph {
    let mut g = WeightedGraph::new(node_count);
    for &(a, b, w) in edges {
        g.set_edge(a, b, w).expect("bad test edge");
    }
    g
}

#[test]
fn test_shortest_path_prefers_cheaper_detour() {
    let g = graph_from(4, &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 5.0), (2, 3, 1.0)]);
    let sp = ShortestPath::new(&g, 0, 3).unwrap();
    assert!(sp.exists());
    assert_eq!(sp.path(), vec![0, 1, 2, 3]);
    assert_eq!(sp.reverse_path(), vec![3, 2, 1, 0]);
    assert_eq!(sp.path_cost(), 3.0);
}

#[test]
fn test_classic_graph() {
    let g = graph_from(6, &[
        (0, 1, 7.0), (0, 2, 9.0), (0, 5, 14.0),
        (1, 2, 10.0), (1, 3, 15.0),
        (2, 3, 11.0), (2, 5, 2.0),
        (3, 4, 6.0),
        (4, 5, 9.0),
    ]);
    let mut sp = ShortestPath::new(&g, 0, 4).unwrap();
    assert_eq!(sp.path(), vec![0, 2, 5, 4]);
    assert_eq!(sp.path_cost(), 20.0);

    sp.update_graph(&g, 0, 3).unwrap();
    assert_eq!(sp.path(), vec![0, 2, 3]);
    assert_eq!(sp.path_cost(), 20.0);

    // 4-3-1 and 4-5-2-1 both cost 21
    sp.update_graph(&g, 4, 1).unwrap();
    assert_eq!(sp.path_cost(), 21.0);
    let path = sp.path();
    assert!(path == vec![4, 3, 1] || path == vec![4, 5, 2, 1], "unexpected path {:?}", path);
    assert_eq!(path_weight(&g, &path), 21.0);
    assert_eq!(sp.source(), 4);
    assert_eq!(sp.target(), 1);
}

#[test]
fn test_isolated_node() {
    let g = graph_from(5, &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)]);
    let sp = ShortestPath::new(&g, 0, 4).unwrap();
    assert!(!sp.exists());
    assert_eq!(sp.path_cost(), f64::INFINITY);
    assert!(sp.path().is_empty());
    assert!(sp.reverse_path().is_empty());
}

#[test]
fn test_disjoint_components() {
    let g = graph_from(4, &[(0, 1, 2.0), (2, 3, 2.0)]);
    let mut sp = ShortestPath::new(&g, 0, 3).unwrap();
    assert!(!sp.exists());
    assert_eq!(sp.path_cost(), f64::INFINITY);

    sp.update_graph(&g, 3, 2).unwrap();
    assert!(sp.exists());
    assert_eq!(sp.path(), vec![3, 2]);
    assert_eq!(sp.path_cost(), 2.0);
}

#[test]
fn test_same_node() {
    let g = graph_from(3, &[(0, 1, 1.0)]);
    for &node in &[0, 2] {
        let sp = ShortestPath::new(&g, node, node).unwrap();
        assert!(sp.exists());
        assert_eq!(sp.path_cost(), 0.0);
        assert_eq!(sp.path(), vec![node, node]);
    }
}

#[test]
fn test_out_of_range_endpoints() {
    let g = graph_from(3, &[(0, 1, 1.0)]);
    let oor = |index| SearchError::Graph(GraphError::OutOfRange { index, node_count: 3 });
    assert_eq!(ShortestPath::new(&g, 3, 0).err(), Some(oor(3)));
    assert_eq!(ShortestPath::new(&g, 0, 7).err(), Some(oor(7)));

    let mut sp = ShortestPath::new(&g, 0, 1).unwrap();
    assert_eq!(sp.update_graph(&g, 0, 3), Err(oor(3)));
}

#[test]
fn test_equal_cost_ties() {
    // Two paths of cost 2 between 0 and 3
    let g = graph_from(4, &[(0, 1, 1.0), (1, 3, 1.0), (0, 2, 1.0), (2, 3, 1.0)]);
    let sp = ShortestPath::new(&g, 0, 3).unwrap();
    assert_eq!(sp.path_cost(), 2.0);
    let path = sp.path();
    assert!(path == vec![0, 1, 3] || path == vec![0, 2, 3], "unexpected path {:?}", path);
}

#[test]
fn test_update_graph_rebinds_and_is_idempotent() {
    let g1 = graph_from(3, &[(0, 1, 1.0), (1, 2, 1.0)]);
    let g2 = graph_from(5, &[(0, 4, 0.5)]);

    let mut sp = ShortestPath::new(&g1, 0, 2).unwrap();
    assert_eq!(sp.path_cost(), 2.0);

    sp.update_graph(&g2, 0, 4).unwrap();
    assert_eq!(sp.path(), vec![0, 4]);
    assert_eq!(sp.path_cost(), 0.5);

    sp.update_graph(&g2, 0, 2).unwrap();
    assert!(!sp.exists());

    sp.update_graph(&g1, 0, 2).unwrap();
    let (cost, path) = (sp.path_cost(), sp.path());
    sp.update_graph(&g1, 0, 2).unwrap();
    assert_eq!(sp.path_cost(), cost);
    assert_eq!(sp.path(), path);
}

#[test]
fn test_search_leaves_graph_untouched() {
    let mut g = graph_from(3, &[(0, 1, 1.0), (1, 2, 1.0)]);
    g.set_node_value(1, 42.0).unwrap();
    let sp = ShortestPath::new(&g, 0, 2).unwrap();
    assert_eq!(sp.path_cost(), 2.0);
    assert_eq!(g.node_value(1), Ok(42.0));
    assert_eq!(g.node_value(0), Ok(f64::INFINITY));
}

#[test]
fn test_against_floyd_warshall() {
    use rand::{Rng, SeedableRng};
    use rand::rngs::SmallRng;

    let mut rng = SmallRng::seed_from_u64(0x0dd_ba11);
    for round in 0..40 {
        let n = rng.gen_range(2, 14);
        let density = rng.gen_range(0.05, 0.7);
        let mut g = WeightedGraph::new(n);
        for a in 0..n {
            for b in a + 1..n {
                if rng.gen::<f64>() < density {
                    // Small integer weights produce plenty of equal cost ties
                    g.set_edge(a, b, rng.gen_range(1, 5) as f64).unwrap();
                }
            }
        }

        // Reference all-pairs distances
        let mut dist = vec![vec![f64::INFINITY; n]; n];
        for (i, row) in dist.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        for (a, b, w) in g.edges() {
            dist[a][b] = w;
            dist[b][a] = w;
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    if dist[i][k] + dist[k][j] < dist[i][j] {
                        dist[i][j] = dist[i][k] + dist[k][j];
                    }
                }
            }
        }

        let mut sp = ShortestPath::new(&g, 0, 0).unwrap();
        for s in 0..n {
            for t in 0..n {
                sp.update_graph(&g, s, t).unwrap();
                assert_eq!(sp.exists(), dist[s][t].is_finite(), "round {} {} -> {}", round, s, t);
                assert_eq!(sp.path_cost(), dist[s][t], "round {} {} -> {}", round, s, t);
                if sp.exists() && s != t {
                    let path = sp.path();
                    assert_eq!(path.first(), Some(&s));
                    assert_eq!(path.last(), Some(&t));
                    assert_eq!(path_weight(&g, &path), sp.path_cost());
                }
            }
        }
    }
}
