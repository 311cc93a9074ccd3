//! Random graph generation.

use log::debug;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use aspl_core::WeightedGraph;

use crate::errors::SimError;

pub(crate) fn check_node_count(node_count: usize) -> Result<(), SimError> {
    if node_count < 2 {
        return Err(SimError::TooFewNodes(node_count));
    }
    Ok(())
}

pub(crate) fn check_density(density: f64) -> Result<(), SimError> {
    if !(0.0..=1.0).contains(&density) {
        return Err(SimError::InvalidDensity(density));
    }
    Ok(())
}

pub(crate) fn check_weight_range((min, max): (f64, f64)) -> Result<(), SimError> {
    if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
        return Err(SimError::InvalidWeightRange(min, max));
    }
    Ok(())
}

/// Random undirected graph with `node_count` nodes.
///
/// Every pair of distinct nodes gets an edge with probability `density`,
/// its weight is uniformly distributed in `[min, max)`
/// (or is exactly `min` when `min == max`).
pub fn random_graph<R: Rng + ?Sized>(rng: &mut R, node_count: usize, density: f64, weight_range: (f64, f64)) -> Result<WeightedGraph, SimError> {
    check_node_count(node_count)?;
    check_density(density)?;
    check_weight_range(weight_range)?;

    let (min, max) = weight_range;
    let weights = if min < max { Uniform::new(min, max) } else { Uniform::new_inclusive(min, max) };

    let mut graph = WeightedGraph::new(node_count);
    for a in 0..node_count - 1 {
        for b in a + 1..node_count {
            if rng.gen::<f64>() < density {
                graph.set_edge(a, b, weights.sample(rng))?;
            }
        }
    }

    debug!("generated graph: {} nodes, {} edges, density {}", node_count, graph.edge_count(), density);
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::random_graph;
    use crate::errors::SimError;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(20_201_018)
    }

    #[test]
    fn test_empty_and_complete() {
        let g = random_graph(&mut rng(), 10, 0.0, (1.0, 10.0)).unwrap();
        assert_eq!(g.node_count(), 10);
        assert_eq!(g.edge_count(), 0);

        let g = random_graph(&mut rng(), 10, 1.0, (1.0, 10.0)).unwrap();
        assert_eq!(g.edge_count(), 10 * 9 / 2);
    }

    #[test]
    fn test_weights_in_range() {
        let g = random_graph(&mut rng(), 30, 0.5, (1.0, 10.0)).unwrap();
        assert!(g.edge_count() > 0);
        for (a, b, w) in g.edges() {
            assert!(a < b);
            assert!(w >= 1.0 && w < 10.0, "weight {} out of range", w);
        }

        let g = random_graph(&mut rng(), 8, 1.0, (2.5, 2.5)).unwrap();
        assert!(g.edges().all(|(_, _, w)| w == 2.5));
    }

    #[test]
    fn test_density_is_respected() {
        let n = 200;
        let g = random_graph(&mut rng(), n, 0.3, (1.0, 2.0)).unwrap();
        let ratio = g.edge_count() as f64 / (n * (n - 1) / 2) as f64;
        assert!((ratio - 0.3).abs() < 0.02, "edge ratio {}", ratio);
    }

    #[test]
    fn test_same_seed_same_graph() {
        let g1 = random_graph(&mut rng(), 20, 0.4, (1.0, 10.0)).unwrap();
        let g2 = random_graph(&mut rng(), 20, 0.4, (1.0, 10.0)).unwrap();
        let sorted = |g: &aspl_core::WeightedGraph| {
            let mut e = g.edges().collect::<Vec<_>>();
            e.sort_by(|x, y| (x.0, x.1).cmp(&(y.0, y.1)));
            e
        };
        assert_eq!(sorted(&g1), sorted(&g2));
    }

    #[test]
    fn test_bad_arguments() {
        assert!(matches!(random_graph(&mut rng(), 1, 0.5, (1.0, 2.0)), Err(SimError::TooFewNodes(1))));
        assert!(matches!(random_graph(&mut rng(), 5, 1.5, (1.0, 2.0)), Err(SimError::InvalidDensity(_))));
        assert!(matches!(random_graph(&mut rng(), 5, -0.1, (1.0, 2.0)), Err(SimError::InvalidDensity(_))));
        assert!(matches!(random_graph(&mut rng(), 5, f64::NAN, (1.0, 2.0)), Err(SimError::InvalidDensity(_))));
        assert!(matches!(random_graph(&mut rng(), 5, 0.5, (3.0, 2.0)), Err(SimError::InvalidWeightRange(_, _))));
        assert!(matches!(random_graph(&mut rng(), 5, 0.5, (-1.0, 2.0)), Err(SimError::InvalidWeightRange(_, _))));
        assert!(matches!(random_graph(&mut rng(), 5, 0.5, (1.0, f64::INFINITY)), Err(SimError::InvalidWeightRange(_, _))));
    }
}
