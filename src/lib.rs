//! Tradenet is a small toolkit for analysing weighted transaction networks: who trades with
//! whom, how much, and which participants hold the network together.
//!
//! # Basic usage
//!
//! The library is centered around the [`Graph`](graph::Graph) structure, a directed multigraph
//! usually built from an edge list with [`GraphBuilder`](builder::GraphBuilder). Repeated
//! transactions between the same pair stay separate edges. Once built the graph never changes,
//! metrics are computed on demand by a [`MetricsEngine`](metrics::MetricsEngine) which keeps
//! the per-vertex values it produces in its own table.
//!
//! ```rust
//! use tradenet::builder::GraphBuilder;
//! use tradenet::config::Config;
//! use tradenet::metrics::{Metric, MetricOutput, MetricsEngine};
//!
//! let csv = "source,target,quantity\n\
//!            A,B,10\n\
//!            B,C,5\n\
//!            A,B,3\n";
//!
//! // Construct the graph instance, rows with missing fields are skipped.
//! let config = Config::default();
//! let (graph, summary) = GraphBuilder::from_reader(csv.as_bytes(), &config.input)?;
//! assert_eq!(summary.edges, 3);
//!
//! // Compute some metrics on the graph.
//! let mut engine = MetricsEngine::new(&graph, config.metrics);
//! let weighted = engine.weighted_degree();
//! assert_eq!(weighted.entries()[0], ("B".to_owned(), 18.0));
//!
//! // Or pick them by identifier.
//! if let MetricOutput::Density { density, sparsity } = engine.run(Metric::Density)? {
//!     assert_eq!(density, 0.5);
//!     assert_eq!(sparsity, 0.5);
//! }
//!
//! // Matrices can be pretty printed...
//! println!("{}", engine.adjacency_matrix());
//! // ...outputs:
//! //  ┌          ┐
//! //  │  0 13  0 │
//! //  │  0  0  5 │
//! //  │  0  0  0 │
//! //  └          ┘
//! # Ok::<(), tradenet::error::Error>(())
//! ```

mod betweenness;
mod closeness;
mod clustering;
mod components;
mod eigenvector;
mod sweep;

pub mod annotations;
pub mod builder;
pub mod config;
pub mod degree;
pub mod edge;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod ranking;
