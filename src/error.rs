//! Error types shared by graph construction and the metrics.

use thiserror::Error;

/// Errors surfaced while loading a graph or computing a metric on it.
///
/// Degenerate but valid numeric results (a NaN assortativity, a zero density, an empty
/// partition) are never reported through this type, they are returned as regular values.
#[derive(Error, Debug)]
pub enum Error {
    /// The input table is malformed or incomplete, no graph is produced.
    #[error("data error: {0}")]
    Data(String),

    /// An iterative metric ran out of iterations before meeting its tolerance.
    #[error("{metric} failed to converge within {iterations} iterations (tolerance {tolerance})")]
    Convergence {
        metric: &'static str,
        iterations: usize,
        tolerance: f64,
    },

    /// The metric doesn't apply to this kind of graph.
    #[error("unsupported mode: {0}")]
    UnsupportedMode(String),

    /// The graph doesn't meet the preconditions of the metric (e.g. it has no edges).
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// The name doesn't match any metric of the catalogue.
    #[error("unknown metric `{0}`")]
    UnknownMetric(String),

    /// Failed to parse the configuration file.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration parsed but holds values the engine can't use.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
