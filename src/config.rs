//! Configuration for loading the edge list and running the metrics.
//!
//! Every section and field is optional, an empty document yields the defaults below. A file
//! that can't be read is an [`Error::Io`].
//!
//! ```toml
//! [input]
//! source = "source"
//! target = "target"
//! quantity = "quantity"
//! attributes = ["year"]
//!
//! [metrics]
//! top_n = 15
//! weight = "weight"
//! threads = 1
//!
//! [metrics.top_n_overrides]
//! weighted_degree = 20
//!
//! [metrics.eigenvector]
//! max_iterations = 1000
//! tolerance = 1e-6
//! ```

use std::{collections::BTreeMap, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    edge::WEIGHT,
    error::{Error, Result},
    metrics::Metric,
};

/// Number of entries kept in a ranking unless overridden.
pub const DEFAULT_TOP_N: usize = 15;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub metrics: MetricsConfig,
}

/// Column names of the edge list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub source: String,
    pub target: String,
    /// Stored on each edge as its `weight`.
    pub quantity: String,
    /// Extra numeric columns carried onto the edges under their own name. Empty or null
    /// cells are skipped, they don't cause the row to be dropped. None of them may be named
    /// `weight`, the key the quantity is stored under.
    pub attributes: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            source: "source".to_owned(),
            target: "target".to_owned(),
            quantity: "quantity".to_owned(),
            attributes: Vec::new(),
        }
    }
}

impl InputConfig {
    /// Checks that the column names can be told apart once on an edge.
    pub fn validate(&self) -> Result<()> {
        if self.source == self.target
            || self.source == self.quantity
            || self.target == self.quantity
        {
            return Err(Error::InvalidConfig(
                "source, target and quantity must name different columns".to_owned(),
            ));
        }

        if self.attributes.iter().any(|name| name == WEIGHT) {
            return Err(Error::InvalidConfig(format!(
                "attribute columns can't be named `{WEIGHT}`, it holds the quantity"
            )));
        }

        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Ranking length used by every ranked metric without an override.
    pub top_n: usize,
    /// Ranking lengths keyed by metric identifier (e.g. `weighted_degree`).
    pub top_n_overrides: BTreeMap<String, usize>,
    /// Edge attribute summed by the weighted degree.
    pub weight: String,
    /// Worker threads used by the path-based centralities.
    pub threads: usize,
    pub eigenvector: EigenvectorConfig,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            top_n_overrides: BTreeMap::new(),
            weight: WEIGHT.to_owned(),
            threads: 1,
            eigenvector: EigenvectorConfig::default(),
        }
    }
}

impl MetricsConfig {
    /// Returns the ranking length for a metric.
    pub fn top_n(&self, metric: Metric) -> usize {
        self.top_n_overrides
            .get(metric.as_str())
            .copied()
            .unwrap_or(self.top_n)
    }
}

/// Power iteration budget for eigenvector centrality.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EigenvectorConfig {
    pub max_iterations: usize,
    /// Convergence is reached once the summed absolute change drops below
    /// `node_count * tolerance`.
    pub tolerance: f64,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: 1e-6,
        }
    }
}

impl Config {
    /// Reads and validates a TOML configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        contents.parse()
    }

    /// Checks the values serde can't.
    pub fn validate(&self) -> Result<()> {
        for key in self.metrics.top_n_overrides.keys() {
            if Metric::from_str(key).is_err() {
                return Err(Error::InvalidConfig(format!(
                    "unknown metric `{key}` in top_n_overrides"
                )));
            }
        }

        if self.metrics.threads == 0 {
            return Err(Error::InvalidConfig("threads must be at least 1".to_owned()));
        }

        let eigenvector = &self.metrics.eigenvector;
        if eigenvector.max_iterations == 0 {
            return Err(Error::InvalidConfig(
                "eigenvector.max_iterations must be at least 1".to_owned(),
            ));
        }
        if !(eigenvector.tolerance.is_finite() && eigenvector.tolerance > 0.0) {
            return Err(Error::InvalidConfig(
                "eigenvector.tolerance must be a positive number".to_owned(),
            ));
        }

        self.input.validate()
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;

        Ok(config)
    }
}
