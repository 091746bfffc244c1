//! The metric catalogue and the engine that runs it against a graph.

use std::{fmt, fmt::Debug, hash::Hash, str::FromStr, time::Instant};

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize, Serializer};

use crate::{
    annotations::{Annotations, Attribute},
    betweenness::compute_betweenness,
    closeness::compute_closeness,
    clustering::Triangles,
    components::{strongly_connected, weakly_connected},
    config::MetricsConfig,
    degree::{self, DegreeBucket},
    eigenvector::compute_eigenvector,
    error::{Error, Result},
    graph::{Graph, GraphKind},
    ranking::Ranking,
};

/// Identifies one of the metrics the engine can compute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    AdjacencyMatrix,
    Betweenness,
    WeightedDegree,
    DegreeCentrality,
    Clustering,
    Eigenvector,
    Closeness,
    DegreeDistribution,
    Assortativity,
    Density,
    ConnectedComponents,
}

impl Metric {
    /// Every metric, in catalogue order.
    pub const ALL: [Metric; 11] = [
        Metric::AdjacencyMatrix,
        Metric::Betweenness,
        Metric::WeightedDegree,
        Metric::DegreeCentrality,
        Metric::Clustering,
        Metric::Eigenvector,
        Metric::Closeness,
        Metric::DegreeDistribution,
        Metric::Assortativity,
        Metric::Density,
        Metric::ConnectedComponents,
    ];

    /// The identifier used in configuration files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::AdjacencyMatrix => "adjacency_matrix",
            Metric::Betweenness => "betweenness",
            Metric::WeightedDegree => "weighted_degree",
            Metric::DegreeCentrality => "degree_centrality",
            Metric::Clustering => "clustering",
            Metric::Eigenvector => "eigenvector",
            Metric::Closeness => "closeness",
            Metric::DegreeDistribution => "degree_distribution",
            Metric::Assortativity => "assortativity",
            Metric::Density => "density",
            Metric::ConnectedComponents => "connected_components",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Metric::ALL
            .into_iter()
            .find(|metric| metric.as_str() == s)
            .ok_or_else(|| Error::UnknownMetric(s.to_owned()))
    }
}

/// Strongly and weakly connected components of a directed graph.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Components<T> {
    pub strong: Vec<Vec<T>>,
    pub weak: Vec<Vec<T>>,
}

/// The result of a metric run, in one of the shapes the catalogue produces.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MetricOutput<T> {
    Matrix {
        labels: Vec<T>,
        #[serde(serialize_with = "matrix_rows")]
        matrix: DMatrix<f64>,
    },
    Ranking(Ranking<T>),
    Clustering {
        local: Ranking<T>,
        transitivity: f64,
    },
    Scalar(f64),
    Density {
        density: f64,
        sparsity: f64,
    },
    Histogram(Vec<DegreeBucket>),
    Components(Components<T>),
}

/// Runs metrics against a graph and keeps the per-vertex values they produce.
///
/// The graph is only ever borrowed immutably, vertex values end up in the engine's
/// [`Annotations`] table instead. Metrics are independent: the failure of one leaves the
/// others and the table untouched.
///
/// # Examples
///
/// ```
/// use tradenet::builder::{GraphBuilder, Row};
/// use tradenet::config::MetricsConfig;
/// use tradenet::metrics::{Metric, MetricOutput, MetricsEngine};
///
/// let (graph, _) = GraphBuilder::from_rows([
///     Row::new("A", "B", 10.0),
///     Row::new("B", "C", 5.0),
///     Row::new("A", "B", 3.0),
/// ]);
/// let mut engine = MetricsEngine::new(&graph, MetricsConfig::default());
///
/// let ranking = engine.weighted_degree();
/// assert_eq!(ranking.entries()[0], ("B", 18.0));
/// assert_eq!(engine.annotations().get(&"A").unwrap().weighted_degree, Some(13.0));
///
/// assert!(matches!(engine.run(Metric::Density)?, MetricOutput::Density { .. }));
/// # Ok::<(), tradenet::error::Error>(())
/// ```
pub struct MetricsEngine<'g, T> {
    graph: &'g Graph<T>,
    config: MetricsConfig,
    annotations: Annotations<T>,
}

impl<'g, T> MetricsEngine<'g, T>
where
    T: Clone + Eq + Hash + Debug,
{
    pub fn new(graph: &'g Graph<T>, config: MetricsConfig) -> Self {
        Self {
            graph,
            config,
            annotations: Annotations::new(graph),
        }
    }

    pub fn graph(&self) -> &'g Graph<T> {
        self.graph
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// The per-vertex values recorded by the metrics run so far.
    pub fn annotations(&self) -> &Annotations<T> {
        &self.annotations
    }

    /// Computes a metric, truncating rankings to the configured length.
    pub fn run(&mut self, metric: Metric) -> Result<MetricOutput<T>> {
        let start = Instant::now();
        let top_n = self.config.top_n(metric);

        let output = match metric {
            Metric::AdjacencyMatrix => Ok(MetricOutput::Matrix {
                labels: self.graph.nodes().to_vec(),
                matrix: self.adjacency_matrix(),
            }),
            Metric::Betweenness => Ok(MetricOutput::Ranking(
                self.betweenness_centrality().truncate(top_n),
            )),
            Metric::WeightedDegree => Ok(MetricOutput::Ranking(
                self.weighted_degree().truncate(top_n),
            )),
            Metric::DegreeCentrality => Ok(MetricOutput::Ranking(
                self.degree_centrality().truncate(top_n),
            )),
            Metric::Clustering => {
                let (local, transitivity) = self.clustering();
                Ok(MetricOutput::Clustering {
                    local: local.truncate(top_n),
                    transitivity,
                })
            }
            Metric::Eigenvector => self
                .eigenvector_centrality()
                .map(|ranking| MetricOutput::Ranking(ranking.truncate(top_n))),
            Metric::Closeness => Ok(MetricOutput::Ranking(
                self.closeness_centrality().truncate(top_n),
            )),
            Metric::DegreeDistribution => self.degree_distribution().map(MetricOutput::Histogram),
            Metric::Assortativity => self.assortativity().map(MetricOutput::Scalar),
            Metric::Density => {
                let (density, sparsity) = self.density();
                Ok(MetricOutput::Density { density, sparsity })
            }
            Metric::ConnectedComponents => {
                self.connected_components().map(MetricOutput::Components)
            }
        };

        match &output {
            Ok(_) => tracing::debug!("computed {metric} in {:?}", start.elapsed()),
            Err(e) => tracing::debug!("{metric} failed after {:?}: {e}", start.elapsed()),
        }

        output
    }

    /// The summed edge weights between every ordered pair of vertices.
    pub fn adjacency_matrix(&self) -> DMatrix<f64> {
        self.graph.adjacency_matrix()
    }

    /// The share of shortest paths passing through each vertex, ignoring weights.
    pub fn betweenness_centrality(&mut self) -> Ranking<T> {
        let values = compute_betweenness(&self.graph.successors(), self.config.threads);
        self.annotations.record(Attribute::Betweenness, &values);

        Ranking::new(self.graph.nodes(), &values)
    }

    /// The summed weight of the edges at each vertex, using the configured weight key.
    pub fn weighted_degree(&mut self) -> Ranking<T> {
        let key = self.config.weight.clone();
        self.weighted_degree_by(&key)
    }

    /// The summed `key` attribute of the edges at each vertex. Edges without the attribute
    /// don't contribute.
    pub fn weighted_degree_by(&mut self, key: &str) -> Ranking<T> {
        let values = self.graph.weighted_degrees(key);
        self.annotations.record(Attribute::WeightedDegree, &values);

        Ranking::new(self.graph.nodes(), &values)
    }

    /// The number of edges at each vertex, incoming and outgoing.
    pub fn degree_centrality(&mut self) -> Ranking<T> {
        let degrees = self.graph.degrees();
        self.annotations.record_degrees(&degrees);

        let values: Vec<f64> = degrees.iter().map(|&d| d as f64).collect();
        Ranking::new(self.graph.nodes(), &values)
    }

    /// Local clustering of each vertex and the transitivity of the graph, both computed on the
    /// simple undirected projection.
    pub fn clustering(&mut self) -> (Ranking<T>, f64) {
        let triangles = Triangles::count(&self.graph.simplified().neighbours());
        let local = triangles.local();
        self.annotations.record(Attribute::Clustering, &local);

        (
            Ranking::new(self.graph.nodes(), &local),
            triangles.transitivity(),
        )
    }

    /// Eigenvector centrality of the simple undirected projection.
    ///
    /// Fails with [`Error::Convergence`] when the iteration budget runs out, in which case no
    /// value is recorded.
    pub fn eigenvector_centrality(&mut self) -> Result<Ranking<T>> {
        let neighbours = self.graph.simplified().neighbours();

        let n = neighbours.len();
        let mut adjacency = DMatrix::<f64>::zeros(n, n);
        for (i, list) in neighbours.iter().enumerate() {
            for &j in list {
                adjacency[(i, j)] = 1.0;
            }
        }

        let vector = compute_eigenvector(adjacency, self.config.eigenvector)?;
        let values: Vec<f64> = vector.iter().copied().collect();
        self.annotations.record(Attribute::Eigenvector, &values);

        Ok(Ranking::new(self.graph.nodes(), &values))
    }

    /// Closeness of each vertex, from incoming distances on directed graphs.
    pub fn closeness_centrality(&mut self) -> Ranking<T> {
        let values = compute_closeness(&self.graph.predecessors(), self.config.threads);
        self.annotations.record(Attribute::Closeness, &values);

        Ranking::new(self.graph.nodes(), &values)
    }

    /// Histogram of vertex degrees, see [`degree::histogram`] for the binning.
    pub fn degree_distribution(&self) -> Result<Vec<DegreeBucket>> {
        degree::histogram(&self.graph.degrees())
    }

    /// Degree assortativity: on directed graphs the source's out-degree is paired with the
    /// target's in-degree for every edge, on undirected graphs each edge is read both ways.
    ///
    /// A NaN result (no degree variance) is returned as is.
    pub fn assortativity(&self) -> Result<f64> {
        let pairs: Vec<(usize, usize)> = match self.graph.kind() {
            GraphKind::Directed => {
                let (out, inc) = (self.graph.out_degrees(), self.graph.in_degrees());
                self.graph
                    .endpoints()
                    .iter()
                    .map(|&(i, j)| (out[i], inc[j]))
                    .collect()
            }
            GraphKind::Undirected => {
                let degrees = self.graph.degrees();
                self.graph
                    .endpoints()
                    .iter()
                    .flat_map(|&(i, j)| {
                        let reverse = (i != j).then_some((degrees[j], degrees[i]));
                        std::iter::once((degrees[i], degrees[j])).chain(reverse)
                    })
                    .collect()
            }
        };

        degree::assortativity(&pairs)
    }

    /// Density and sparsity (`1 - density`) of the graph.
    pub fn density(&self) -> (f64, f64) {
        let density = self.graph.density();

        (density, 1.0 - density)
    }

    /// Strongly and weakly connected components.
    ///
    /// Only defined for directed graphs, an undirected graph yields
    /// [`Error::UnsupportedMode`] rather than weak components alone.
    pub fn connected_components(&self) -> Result<Components<T>> {
        if !self.graph.is_directed() {
            return Err(Error::UnsupportedMode(
                "the graph must be directed to compute strongly connected components".to_owned(),
            ));
        }

        let labels = |components: Vec<Vec<usize>>| -> Vec<Vec<T>> {
            components
                .into_iter()
                .map(|c| c.into_iter().map(|i| self.graph.nodes()[i].clone()).collect())
                .collect()
        };

        Ok(Components {
            strong: labels(strongly_connected(&self.graph.successors())),
            weak: labels(weakly_connected(&self.graph.neighbours())),
        })
    }
}

//
// Helpers
//

fn matrix_rows<S: Serializer>(
    matrix: &DMatrix<f64>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let rows: Vec<Vec<f64>> = matrix
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect();

    rows.serialize(serializer)
}
