//! Configuration options.

use std::fs;
use std::io;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::errors::SimError;
use crate::generator::{check_density, check_node_count, check_weight_range};

const DEFAULT_NODES: usize = 50;
const DEFAULT_DENSITIES: [f64; 2] = [0.2, 0.4];
const DEFAULT_MIN_WEIGHT: f64 = 1.0;
const DEFAULT_MAX_WEIGHT: f64 = 10.0;
const DEFAULT_TRIALS: usize = 10_000;
const DEFAULT_CONFIG_FILE_NAME: &'static str = "aspl.json";

/// Simulation options. Can be loaded from a config file, any missing value is defaulted.
#[derive(Clone, Default, PartialEq, Debug, Deserialize)]
pub struct Opts {
    /// Number of nodes in every generated graph.
    #[serde(rename = "nodes")]
    pub nodes: Option<usize>,

    /// Edge densities to simulate, each one separately.
    #[serde(rename = "densities")]
    pub densities: Option<Vec<f64>>,

    /// Lower bound of edge weights.
    #[serde(rename = "minWeight")]
    pub min_weight: Option<f64>,

    /// Upper bound of edge weights.
    #[serde(rename = "maxWeight")]
    pub max_weight: Option<f64>,

    /// Number of graphs generated per density.
    #[serde(rename = "trials")]
    pub trials: Option<usize>,

    /// Random seed. A random one is drawn and logged if not set.
    #[serde(rename = "seed")]
    pub seed: Option<u64>,
}

/// Validated simulation parameters.
#[derive(Clone, PartialEq, Debug)]
pub struct Params {
    pub node_count: usize,
    pub densities: Vec<f64>,
    pub weight_range: (f64, f64),
    pub trials: usize,
    pub seed: Option<u64>,
}

impl Opts {
    /// Load options from the config file.
    ///
    /// An explicitly given file must exist, while a missing default file
    /// (`./aspl.json`) just means all options are defaulted.
    pub fn load(config_file: Option<&Path>) -> Result<Self, SimError> {
        match config_file {
            Some(path) => Self::read_config_file(path),
            None => Ok(Self::read_optional_config_file(Path::new(DEFAULT_CONFIG_FILE_NAME))?.unwrap_or_default()),
        }
    }

    /// Options from `overrides` take precedence over ones from `self`.
    pub fn merge(self, overrides: Opts) -> Opts {
        Opts {
            nodes: overrides.nodes.or(self.nodes),
            densities: overrides.densities.or(self.densities),
            min_weight: overrides.min_weight.or(self.min_weight),
            max_weight: overrides.max_weight.or(self.max_weight),
            trials: overrides.trials.or(self.trials),
            seed: overrides.seed.or(self.seed),
        }
    }

    /// Fill in the defaults and validate.
    pub fn into_params(self) -> Result<Params, SimError> {
        let node_count = self.nodes.unwrap_or(DEFAULT_NODES);
        check_node_count(node_count)?;

        let densities = self.densities.unwrap_or_else(|| DEFAULT_DENSITIES.to_vec());
        if densities.is_empty() {
            return Err(SimError::NoDensities);
        }
        for &density in densities.iter() {
            check_density(density)?;
        }

        let weight_range = (self.min_weight.unwrap_or(DEFAULT_MIN_WEIGHT), self.max_weight.unwrap_or(DEFAULT_MAX_WEIGHT));
        check_weight_range(weight_range)?;

        let trials = self.trials.unwrap_or(DEFAULT_TRIALS);
        if trials == 0 {
            return Err(SimError::NoTrials);
        }

        Ok(Params {
            node_count,
            densities,
            weight_range,
            trials,
            seed: self.seed,
        })
    }

    fn parse_config(json: &[u8]) -> Result<Self, SimError> {
        serde_json::from_slice(json).map_err(|e| SimError::BadConfigFile(e))
    }

    fn read_config_file(file_path: &Path) -> Result<Self, SimError> {
        debug!("Reading config file [{}]", file_path.display());
        let json = fs::read(file_path).map_err(|e| SimError::ConfigFileRead(e))?;
        Self::parse_config(&json)
    }

    fn read_optional_config_file(file_path: &Path) -> Result<Option<Self>, SimError> {
        match Self::read_config_file(file_path) {
            Ok(conf) => Ok(Some(conf)),
            Err(SimError::ConfigFileRead(err)) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No config file at [{}], using defaults", file_path.display());
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

#[test]
fn test_parse_config() {
    let c = |json: &str| -> Opts { Opts::parse_config(json.as_bytes()).expect("bad test config") };

    assert_eq!(c(r#"{}"#), Opts::default());

    assert_eq!(c(r#"{ "unknown": "foo" }"#), Opts::default());

    assert_eq!(
        c(r#"{ "nodes": 20 }"#),
        Opts {
            nodes: Some(20),
            ..Opts::default()
        }
    );

    assert_eq!(
        c(r#"{ "densities": [0.1, 0.5], "minWeight": 2, "maxWeight": 4.5 }"#),
        Opts {
            densities: Some(vec![0.1, 0.5]),
            min_weight: Some(2.0),
            max_weight: Some(4.5),
            ..Opts::default()
        }
    );

    assert_eq!(
        c(r#"{ "trials": 100, "seed": 42 }"#),
        Opts {
            trials: Some(100),
            seed: Some(42),
            ..Opts::default()
        }
    );

    assert!(matches!(Opts::parse_config(br#"{ "nodes": "many" }"#), Err(SimError::BadConfigFile(_))));
    assert!(matches!(Opts::parse_config(b"not json"), Err(SimError::BadConfigFile(_))));
}

#[test]
fn test_default_params() {
    assert_eq!(
        Opts::default().into_params().unwrap(),
        Params {
            node_count: 50,
            densities: vec![0.2, 0.4],
            weight_range: (1.0, 10.0),
            trials: 10_000,
            seed: None,
        }
    );
}

#[test]
fn test_merge() {
    let file = Opts {
        nodes: Some(20),
        densities: Some(vec![0.3]),
        seed: Some(1),
        ..Opts::default()
    };
    let cli = Opts {
        nodes: Some(30),
        trials: Some(5),
        ..Opts::default()
    };
    assert_eq!(
        file.merge(cli),
        Opts {
            nodes: Some(30),
            densities: Some(vec![0.3]),
            trials: Some(5),
            seed: Some(1),
            ..Opts::default()
        }
    );
}

#[test]
fn test_invalid_params() {
    let p = |opts: Opts| opts.into_params().unwrap_err();
    assert!(matches!(p(Opts { nodes: Some(1), ..Opts::default() }), SimError::TooFewNodes(1)));
    assert!(matches!(p(Opts { densities: Some(vec![]), ..Opts::default() }), SimError::NoDensities));
    assert!(matches!(p(Opts { densities: Some(vec![0.2, 1.2]), ..Opts::default() }), SimError::InvalidDensity(_)));
    assert!(matches!(p(Opts { min_weight: Some(11.0), ..Opts::default() }), SimError::InvalidWeightRange(_, _)));
    assert!(matches!(p(Opts { min_weight: Some(-1.0), ..Opts::default() }), SimError::InvalidWeightRange(_, _)));
    assert!(matches!(p(Opts { trials: Some(0), ..Opts::default() }), SimError::NoTrials));
}

#[test]
fn test_missing_config_file() {
    let missing = Path::new("./definitely/not/here/aspl.json");
    assert!(matches!(Opts::read_optional_config_file(missing), Ok(None)));
    assert!(matches!(Opts::load(Some(missing)), Err(SimError::ConfigFileRead(_))));
}
