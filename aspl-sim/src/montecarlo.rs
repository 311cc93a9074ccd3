//! Monte Carlo estimation of the expected average shortest path length.

use std::fmt;

use log::{debug, info};
use rand::Rng;
use serde::Serialize;

use aspl_core::{PathSolver, SearchError, ShortestPath, WeightedGraph};

use crate::config::Params;
use crate::errors::SimError;
use crate::generator::{check_density, random_graph};

/// Node all shortest paths are measured from.
const SOURCE_NODE: usize = 0;

/// Average cost of the shortest paths from `source` to every other node
/// reachable from it, using the given solver.
/// Returns `None` if no other node is reachable.
pub fn average_shortest_path_length<'g, S: PathSolver<'g>>(solver: &mut S, graph: &'g WeightedGraph, source: usize) -> Result<Option<f64>, SearchError> {
    let mut total_cost = 0.0;
    let mut reachable = 0_usize;

    for target in (0..graph.node_count()).filter(|&t| t != source) {
        solver.search(graph, source, target)?;
        if solver.exists() {
            total_cost += solver.path_cost();
            reachable += 1;
        }
    }

    if reachable > 0 {
        Ok(Some(total_cost / reachable as f64))
    } else {
        Ok(None)
    }
}

/// Same as `average_shortest_path_length()` with a Dijkstra solver.
pub fn graph_average_path_length(graph: &WeightedGraph, source: usize) -> Result<Option<f64>, SearchError> {
    let mut solver = ShortestPath::new(graph, source, source)?;
    average_shortest_path_length(&mut solver, graph, source)
}

/// Result of the simulation for one density.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DensityReport {
    pub density: f64,
    pub node_count: usize,
    pub trials: usize,

    /// Trials whose graph left the source node with no reachable peer.
    /// They contribute nothing to the mean.
    pub skipped_trials: usize,

    /// Mean over the non-skipped trials, `None` if every trial was skipped.
    pub mean_path_length: Option<f64>,
}

impl fmt::Display for DensityReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.mean_path_length {
            Some(mean) => write!(f, "density {}; average shortest path length: {}", self.density, mean),
            None => write!(f, "density {}; average shortest path length: n/a (no connected pairs)", self.density),
        }
    }
}

/// Generate `params.trials` random graphs of the given density
/// and average their average shortest path lengths.
pub fn simulate<R: Rng + ?Sized>(params: &Params, density: f64, rng: &mut R) -> Result<DensityReport, SimError> {
    check_density(density)?;

    let mut sum = 0.0;
    let mut skipped_trials = 0;

    for trial in 0..params.trials {
        let graph = random_graph(rng, params.node_count, density, params.weight_range)?;
        match graph_average_path_length(&graph, SOURCE_NODE)? {
            Some(avg) => sum += avg,
            None => {
                debug!("trial {}: source node is isolated", trial);
                skipped_trials += 1;
            }
        }
    }

    let used_trials = params.trials - skipped_trials;
    let mean_path_length = if used_trials > 0 { Some(sum / used_trials as f64) } else { None };

    let report = DensityReport {
        density,
        node_count: params.node_count,
        trials: params.trials,
        skipped_trials,
        mean_path_length,
    };
    info!("{} ({} of {} trials skipped)", report, skipped_trials, params.trials);
    Ok(report)
}

/// Run `simulate()` for every configured density, in order.
pub fn simulate_all<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Result<Vec<DensityReport>, SimError> {
    params.densities.iter().map(|&density| simulate(params, density, &mut *rng)).collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use aspl_core::WeightedGraph;

    use super::*;

    fn params(node_count: usize, trials: usize) -> Params {
        Params {
            node_count,
            densities: vec![0.2, 0.4],
            weight_range: (1.0, 10.0),
            trials,
            seed: None,
        }
    }

    #[test]
    fn test_graph_average() {
        // 0 - 1 - 2, 3 is isolated
        let mut g = WeightedGraph::new(4);
        g.set_edge(0, 1, 2.0).unwrap();
        g.set_edge(1, 2, 4.0).unwrap();
        assert_eq!(graph_average_path_length(&g, 0).unwrap(), Some((2.0 + 6.0) / 2.0));
        assert_eq!(graph_average_path_length(&g, 2).unwrap(), Some((6.0 + 4.0) / 2.0));
        assert_eq!(graph_average_path_length(&g, 3).unwrap(), None);
    }

    #[test]
    fn test_generic_solver_average() {
        let mut g = WeightedGraph::new(3);
        g.set_edge(0, 1, 1.0).unwrap();
        g.set_edge(0, 2, 3.0).unwrap();
        let mut solver = ShortestPath::new(&g, 0, 0).unwrap();
        assert_eq!(average_shortest_path_length(&mut solver, &g, 0).unwrap(), Some(2.0));
    }

    #[test]
    fn test_average_bad_source() {
        let g = WeightedGraph::new(3);
        assert!(graph_average_path_length(&g, 3).is_err());
    }

    #[test]
    fn test_complete_graph_with_fixed_weights() {
        // Every pair is directly connected with weight 3: every shortest path costs 3
        let p = Params { weight_range: (3.0, 3.0), ..params(10, 5) };
        let report = simulate(&p, 1.0, &mut SmallRng::seed_from_u64(1)).unwrap();
        assert_eq!(report, DensityReport {
            density: 1.0,
            node_count: 10,
            trials: 5,
            skipped_trials: 0,
            mean_path_length: Some(3.0),
        });
        assert_eq!(report.to_string(), "density 1; average shortest path length: 3");
    }

    #[test]
    fn test_empty_graphs_are_skipped() {
        let report = simulate(&params(5, 4), 0.0, &mut SmallRng::seed_from_u64(2)).unwrap();
        assert_eq!(report.skipped_trials, 4);
        assert_eq!(report.mean_path_length, None);
        assert_eq!(report.to_string(), "density 0; average shortest path length: n/a (no connected pairs)");
    }

    #[test]
    fn test_denser_graphs_have_shorter_paths() {
        let mut rng = SmallRng::seed_from_u64(3);
        let reports = simulate_all(&params(30, 200), &mut rng).unwrap();
        assert_eq!(reports.len(), 2);
        let sparse = reports[0].mean_path_length.unwrap();
        let dense = reports[1].mean_path_length.unwrap();
        assert!(sparse > dense, "{} <= {}", sparse, dense);
        // Every edge weighs at least 1, a lone edge at most 10
        assert!(dense > 1.0 && sparse < 10.0);
    }

    #[test]
    fn test_invalid_density() {
        let err = simulate(&params(5, 1), 2.0, &mut SmallRng::seed_from_u64(4)).unwrap_err();
        assert!(matches!(err, SimError::InvalidDensity(_)));
    }

    #[test]
    fn test_report_json() {
        let report = DensityReport { density: 0.5, node_count: 4, trials: 2, skipped_trials: 1, mean_path_length: Some(1.5) };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json, serde_json::json!({
            "density": 0.5,
            "nodeCount": 4,
            "trials": 2,
            "skippedTrials": 1,
            "meanPathLength": 1.5,
        }));
    }
}
