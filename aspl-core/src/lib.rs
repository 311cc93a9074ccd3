//! Shortest path engine: undirected weighted graph,
//! mutable priority queue and Dijkstra path search on top of them.

pub use self::dijkstra::{SearchError, ShortestPath};
pub use self::graph::{GraphError, WeightedGraph};
pub use self::pqueue::{PriorityQueue, QueueError};
pub use self::solver::PathSolver;

mod dijkstra;
mod graph;
mod solver;

pub mod numtraits;
pub mod pqueue;

#[test]
fn test_reachability_sweep_from_one_source() {
    let mut g = WeightedGraph::new(5);
    g.set_edge(0, 1, 2.0).unwrap();
    g.set_edge(1, 2, 3.0).unwrap();
    g.set_edge(0, 3, 10.0).unwrap();
    g.set_edge(2, 3, 1.0).unwrap();

    let mut sp = ShortestPath::new(&g, 0, 0).unwrap();
    let costs = (1..g.node_count())
        .map(|t| {
            sp.update_graph(&g, 0, t).unwrap();
            sp.path_cost()
        })
        .collect::<Vec<_>>();
    assert_eq!(costs, vec![2.0, 5.0, 6.0, f64::INFINITY]);
}
