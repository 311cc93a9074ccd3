//! Average shortest path length estimator

use std::path::PathBuf;
use std::process;

use anyhow::Error;
use clap::Parser;
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use aspl_sim::{simulate_all, Opts};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let args: Args = Args::parse();
    let json = args.json;

    let file_opts = Opts::load(args.config.as_deref())?;
    let params = file_opts.merge(args.into_opts()).into_params()?;

    let seed = resolve_seed(params.seed);
    info!("Simulating {} trials of {}-node graphs, weights in [{}, {}), seed {}", params.trials, params.node_count, params.weight_range.0, params.weight_range.1, seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let reports = simulate_all(&params, &mut rng)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in reports {
            println!("{}", report);
        }
    }

    Ok(())
}

/// Configured seed, or a fresh random one.
fn resolve_seed(configured: Option<u64>) -> u64 {
    configured.unwrap_or_else(rand::random)
}

/// Monte Carlo estimate of the average shortest path length in random weighted graphs.
#[derive(Parser)]
#[clap(version, author = "The aspl developers")]
struct Args {
    /// JSON config file (default `./aspl.json`, if it exists)
    #[clap(long = "config")]
    config: Option<PathBuf>,

    /// Number of nodes per graph (default 50)
    #[clap(long = "nodes")]
    nodes: Option<usize>,

    /// Edge density in [0, 1], may be repeated (default 0.2 and 0.4)
    #[clap(long = "density")]
    densities: Vec<f64>,

    /// Lower bound of edge weights (default 1.0)
    #[clap(long = "min-weight")]
    min_weight: Option<f64>,

    /// Upper bound of edge weights (default 10.0)
    #[clap(long = "max-weight")]
    max_weight: Option<f64>,

    /// Number of graphs generated per density (default 10000)
    #[clap(long = "trials")]
    trials: Option<usize>,

    /// Random seed, drawn at random if not given
    #[clap(long = "seed")]
    seed: Option<u64>,

    /// Print results as JSON
    #[clap(long = "json")]
    json: bool,
}

impl Args {
    fn into_opts(self) -> Opts {
        Opts {
            nodes: self.nodes,
            densities: if self.densities.is_empty() { None } else { Some(self.densities) },
            min_weight: self.min_weight,
            max_weight: self.max_weight,
            trials: self.trials,
            seed: self.seed,
        }
    }
}

#[test]
fn test_args_into_opts() {
    let args = Args::parse_from(&["aspl", "--density", "0.1", "--density", "0.3", "--nodes", "12", "--seed", "7"]);
    assert!(!args.json);
    assert_eq!(
        args.into_opts(),
        Opts {
            nodes: Some(12),
            densities: Some(vec![0.1, 0.3]),
            seed: Some(7),
            ..Opts::default()
        }
    );

    let args = Args::parse_from(&["aspl", "--json", "--min-weight", "2", "--max-weight", "3"]);
    assert!(args.json);
    assert_eq!(
        args.into_opts(),
        Opts {
            min_weight: Some(2.0),
            max_weight: Some(3.0),
            ..Opts::default()
        }
    );
}

#[test]
fn test_resolve_seed() {
    assert_eq!(resolve_seed(Some(7)), 7);
    assert_eq!(resolve_seed(Some(0)), 0);
    // Unset seed is fresh on every run
    let drawn: Vec<u64> = (0..4).map(|_| resolve_seed(None)).collect();
    assert!(drawn.windows(2).any(|w| w[0] != w[1]));
}
