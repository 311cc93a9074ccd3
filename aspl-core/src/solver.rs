//! Path solver traits.

use crate::dijkstra::{SearchError, ShortestPath};
use crate::graph::WeightedGraph;

/// Single pair shortest path search over a `WeightedGraph`.
///
/// A solver is bound to one graph at a time and answers for the
/// source/target pair of the most recent `search()`.
pub trait PathSolver<'g> {
    /// Run a new search, discarding the result of the previous one.
    fn search(&mut self, graph: &'g WeightedGraph, source: usize, target: usize) -> Result<(), SearchError>;

    /// Whether the last searched target is reachable.
    fn exists(&self) -> bool;

    /// Cost of the last found path, `f64::INFINITY` if there is none.
    fn path_cost(&self) -> f64;

    /// Last found path from source to target.
    fn path(&self) -> Vec<usize>;

    /// Last found path from target to source.
    fn reverse_path(&self) -> Vec<usize> {
        let mut path = self.path();
        path.reverse();
        path
    }
}

impl<'g> PathSolver<'g> for ShortestPath<'g> {
    fn search(&mut self, graph: &'g WeightedGraph, source: usize, target: usize) -> Result<(), SearchError> {
        self.update_graph(graph, source, target)
    }

    fn exists(&self) -> bool {
        ShortestPath::exists(self)
    }

    fn path_cost(&self) -> f64 {
        ShortestPath::path_cost(self)
    }

    fn path(&self) -> Vec<usize> {
        ShortestPath::path(self)
    }

    fn reverse_path(&self) -> Vec<usize> {
        ShortestPath::reverse_path(self)
    }
}

#[test]
fn test_dijkstra_as_path_solver() {
    fn run<'g, S: PathSolver<'g>>(solver: &mut S, graph: &'g WeightedGraph) -> (f64, Vec<usize>, Vec<usize>) {
        solver.search(graph, 0, 2).expect("search failed");
        (solver.path_cost(), solver.path(), solver.reverse_path())
    }

    let mut g = WeightedGraph::new(3);
    g.set_edge(0, 1, 1.0).unwrap();
    g.set_edge(1, 2, 2.0).unwrap();

    let mut sp = ShortestPath::new(&g, 0, 0).unwrap();
    let (cost, path, rev_path) = run(&mut sp, &g);
    assert!(PathSolver::exists(&sp));
    assert_eq!(cost, 3.0);
    assert_eq!(path, vec![0, 1, 2]);
    assert_eq!(rev_path, vec![2, 1, 0]);
}
