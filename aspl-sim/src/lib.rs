//! Monte Carlo simulation of the average shortest path length
//! in random undirected weighted graphs, as a function of edge density.

pub use self::config::{Opts, Params};
pub use self::errors::SimError;
pub use self::generator::random_graph;
pub use self::montecarlo::{average_shortest_path_length, graph_average_path_length, simulate, simulate_all, DensityReport};

mod config;
mod errors;
mod generator;
mod montecarlo;
