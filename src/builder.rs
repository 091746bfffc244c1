//! Construction of graphs, either edge by edge or from a tabular edge list.

use std::{fmt::Debug, fs::File, hash::Hash, io::Read, path::Path};

use serde::Serialize;

use crate::{
    config::InputConfig,
    edge::Edge,
    error::{Error, Result},
    graph::{Graph, GraphKind},
};

/// Cell contents read as missing values, the same set pandas treats as NA by default.
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// One row of an edge list, any field may be missing.
#[derive(Clone, Debug, PartialEq)]
pub struct Row<T> {
    pub source: Option<T>,
    pub target: Option<T>,
    pub quantity: Option<f64>,
}

impl<T> Row<T> {
    /// Creates a complete row.
    pub fn new(source: T, target: T, quantity: f64) -> Self {
        Self {
            source: Some(source),
            target: Some(target),
            quantity: Some(quantity),
        }
    }
}

/// What happened while turning rows into a graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    /// Rows seen, including dropped ones.
    pub rows: usize,
    /// Rows skipped because a required field was missing or the quantity was NaN.
    pub dropped: usize,
    pub nodes: usize,
    pub edges: usize,
}

/// Accumulates vertices and edges, then produces an immutable [`Graph`].
#[derive(Clone, Debug)]
pub struct GraphBuilder<T> {
    kind: GraphKind,
    nodes: Vec<T>,
    edges: Vec<Edge<T>>,
}

impl<T> GraphBuilder<T>
where
    T: Clone + Eq + Hash + Debug,
{
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Adds a vertex, it is kept even if no edge touches it. Adding a known vertex is a no-op.
    pub fn add_node(mut self, node: T) -> Self {
        self.nodes.push(node);
        self
    }

    /// Adds an edge, its endpoints are added as vertices when first seen.
    pub fn add_edge(mut self, edge: Edge<T>) -> Self {
        self.edges.push(edge);
        self
    }

    pub fn extend_edges(mut self, edges: impl IntoIterator<Item = Edge<T>>) -> Self {
        self.edges.extend(edges);
        self
    }

    pub fn build(self) -> Graph<T> {
        Graph::from_parts(self.kind, self.nodes, self.edges)
    }

    /// Builds a directed multigraph from edge list rows.
    ///
    /// Rows missing any field are dropped, a NaN quantity counts as missing. Every remaining
    /// row becomes its own `source -> target` edge weighted by its quantity, repeated pairs
    /// stay parallel edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use tradenet::builder::{GraphBuilder, Row};
    ///
    /// let (graph, summary) = GraphBuilder::from_rows([
    ///     Row::new("A", "B", 10.0),
    ///     Row { source: Some("B"), target: None, quantity: Some(1.0) },
    ///     Row::new("A", "B", 3.0),
    /// ]);
    ///
    /// assert_eq!(graph.edge_count(), 2);
    /// assert_eq!(summary.dropped, 1);
    /// ```
    pub fn from_rows(rows: impl IntoIterator<Item = Row<T>>) -> (Graph<T>, BuildSummary) {
        Self::assemble(rows.into_iter().map(|row| (row, Vec::new())))
    }

    /// Turns rows and their extra edge attributes into a directed multigraph.
    fn assemble(
        rows: impl IntoIterator<Item = (Row<T>, Vec<(String, f64)>)>,
    ) -> (Graph<T>, BuildSummary) {
        let mut builder = Self::new(GraphKind::Directed);
        let mut summary = BuildSummary::default();

        for (row, attributes) in rows {
            summary.rows += 1;

            match row {
                Row {
                    source: Some(source),
                    target: Some(target),
                    quantity: Some(quantity),
                } if !quantity.is_nan() => {
                    let mut edge = Edge::weighted(source, target, quantity);
                    for (key, value) in attributes {
                        edge.set_attribute(key, value);
                    }
                    builder.edges.push(edge);
                }
                _ => summary.dropped += 1,
            }
        }

        let graph = builder.build();
        summary.nodes = graph.node_count();
        summary.edges = graph.edge_count();
        log_summary(&summary, negative_weights(&graph));

        (graph, summary)
    }
}

impl GraphBuilder<String> {
    /// Builds a directed multigraph from CSV data with a header row.
    ///
    /// NA cells and NaN quantities drop the row, an infinite or non-numeric value is a
    /// [`Error::Data`] naming the line. Columns are checked with [`InputConfig::validate`]
    /// first.
    ///
    /// # Examples
    ///
    /// ```
    /// use tradenet::builder::GraphBuilder;
    /// use tradenet::config::InputConfig;
    ///
    /// let data = "source,target,quantity\nA,B,10\nB,C,\nA,B,3\n";
    /// let (graph, summary) = GraphBuilder::from_reader(data.as_bytes(), &InputConfig::default())?;
    ///
    /// assert_eq!(graph.node_count(), 2);
    /// assert_eq!(summary.dropped, 1);
    /// # Ok::<(), tradenet::error::Error>(())
    /// ```
    pub fn from_reader<R: Read>(
        reader: R,
        columns: &InputConfig,
    ) -> Result<(Graph<String>, BuildSummary)> {
        columns.validate()?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| Error::Data(format!("unreadable header: {e}")))?
            .clone();
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Error::Data(format!("missing required column `{name}`")))
        };

        let source = position(&columns.source)?;
        let target = position(&columns.target)?;
        let quantity = position(&columns.quantity)?;
        let attributes = columns
            .attributes
            .iter()
            .map(|name| Ok((name.as_str(), position(name)?)))
            .collect::<Result<Vec<_>>>()?;

        let mut rows = Vec::new();

        for record in reader.records() {
            let record = record.map_err(|e| Error::Data(format!("malformed row: {e}")))?;
            let line = record.position().map_or(0, |p| p.line());

            let cell = |i: usize| record.get(i).filter(|value| !is_na(value));

            let row = Row {
                source: cell(source).map(str::to_owned),
                target: cell(target).map(str::to_owned),
                quantity: cell(quantity)
                    .map(|value| parse_number(value, &columns.quantity, line))
                    .transpose()?,
            };

            let mut values = Vec::new();
            for (name, i) in &attributes {
                if let Some(value) = cell(*i) {
                    let number = parse_number(value, name, line)?;
                    if !number.is_nan() {
                        values.push(((*name).to_owned(), number));
                    }
                }
            }

            rows.push((row, values));
        }

        Ok(GraphBuilder::assemble(rows))
    }

    /// Builds a directed multigraph from a CSV file.
    pub fn from_path(
        path: impl AsRef<Path>,
        columns: &InputConfig,
    ) -> Result<(Graph<String>, BuildSummary)> {
        let path = path.as_ref();
        tracing::debug!("loading edge list from {}", path.display());

        Self::from_reader(File::open(path)?, columns)
    }
}

//
// Helpers
//

fn is_na(value: &str) -> bool {
    NA_VALUES.contains(&value)
}

/// Parses a numeric cell. NaN spellings the NA list misses (`NAN`, `Nan`) come back as NaN,
/// infinities are rejected.
fn parse_number(value: &str, column: &str, line: u64) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(number) if !number.is_infinite() => Ok(number),
        Ok(_) => Err(Error::Data(format!(
            "line {line}: `{value}` in column `{column}` is not a finite number"
        ))),
        Err(_) => Err(Error::Data(format!(
            "line {line}: `{value}` in column `{column}` is not a number"
        ))),
    }
}

fn negative_weights<T>(graph: &Graph<T>) -> usize
where
    T: Clone + Eq + Hash + Debug,
{
    graph
        .edges()
        .iter()
        .filter(|e| e.weight().is_some_and(|w| w < 0.0))
        .count()
}

fn log_summary(summary: &BuildSummary, negative: usize) {
    if summary.dropped > 0 {
        tracing::warn!(
            "dropped {} of {} rows with missing fields",
            summary.dropped,
            summary.rows
        );
    }
    if negative > 0 {
        tracing::warn!("{negative} edges carry a negative weight");
    }

    tracing::info!(
        rows = summary.rows,
        nodes = summary.nodes,
        edges = summary.edges,
        "built graph"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(data: &str) -> Result<(Graph<String>, BuildSummary)> {
        GraphBuilder::from_reader(data.as_bytes(), &InputConfig::default())
    }

    #[test]
    fn from_rows() {
        let (graph, summary) = GraphBuilder::from_rows([
            Row::new("A", "B", 10.0),
            Row::new("B", "C", 5.0),
            Row::new("A", "B", 3.0),
        ]);

        assert_eq!(graph.nodes(), &["A", "B", "C"]);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.weighted_degrees("weight")[0], 13.0);
        assert_eq!(
            summary,
            BuildSummary {
                rows: 3,
                dropped: 0,
                nodes: 3,
                edges: 3
            }
        );
    }

    #[test]
    fn rows_with_missing_fields_are_dropped() {
        let (graph, summary) = GraphBuilder::from_rows([
            Row::new("A", "B", 1.0),
            Row {
                source: None,
                target: Some("C"),
                quantity: Some(1.0),
            },
            Row {
                source: Some("D"),
                target: Some("E"),
                quantity: None,
            },
        ]);

        // Endpoints of dropped rows never become vertices.
        assert_eq!(graph.nodes(), &["A", "B"]);
        assert_eq!(summary.dropped, 2);
    }

    #[test]
    fn isolated_nodes() {
        let graph = GraphBuilder::new(GraphKind::Directed)
            .add_node("z")
            .add_edge(Edge::new("a", "b"))
            .add_node("a")
            .build();

        assert_eq!(graph.nodes(), &["z", "a", "b"]);
    }

    #[test]
    fn csv() {
        let (graph, summary) = load(
            "year,source,target,quantity\n\
             2001,A,B,10\n\
             2002,B,C,5\n\
             2003,A,B,3\n",
        )
        .unwrap();

        assert_eq!(graph.nodes(), &["A", "B", "C"]);
        assert_eq!(graph.edges()[2].weight(), Some(3.0));
        assert_eq!(graph.edges()[0].attribute("year"), None);
        assert_eq!(summary.edges, 3);
    }

    #[test]
    fn csv_na_markers() {
        let (graph, summary) = load(
            "source,target,quantity\n\
             A,B,1\n\
             NA,B,1\n\
             A,,1\n\
             A,B,NaN\n\
             A,B,null\n\
             B,A,2\n",
        )
        .unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(summary.rows, 6);
        assert_eq!(summary.dropped, 4);
    }

    #[test]
    fn csv_missing_column() {
        let err = load("source,target\nA,B\n").unwrap_err();

        assert!(matches!(err, Error::Data(ref msg) if msg.contains("quantity")));
    }

    #[test]
    fn csv_malformed_row() {
        let err = load("source,target,quantity\nA,B,1\nA,B\n").unwrap_err();

        assert!(matches!(err, Error::Data(_)));
    }

    #[test]
    fn csv_non_numeric_quantity() {
        let err = load("source,target,quantity\nA,B,lots\n").unwrap_err();

        assert!(matches!(err, Error::Data(ref msg) if msg.contains("line 2")));
    }

    #[test]
    fn csv_custom_columns_and_attributes() {
        let columns = InputConfig {
            source: "supplier".to_owned(),
            target: "recipient".to_owned(),
            quantity: "tiv".to_owned(),
            attributes: vec!["year".to_owned()],
        };
        let data = "supplier,recipient,tiv,year\n\
                    A,B,10,2001\n\
                    A,,4,2002\n\
                    B,C,5,\n";

        let (graph, summary) = GraphBuilder::from_reader(data.as_bytes(), &columns).unwrap();

        assert_eq!(summary.dropped, 1);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edges()[0].attribute("year"), Some(2001.0));
        assert_eq!(graph.edges()[1].attribute("year"), None);
        assert_eq!(graph.weighted_degrees("year"), vec![2001.0, 2001.0, 0.0]);
    }

    #[test]
    fn nan_quantity_is_missing() {
        let (graph, summary) =
            GraphBuilder::from_rows([Row::new("A", "B", 10.0), Row::new("A", "C", f64::NAN)]);

        assert_eq!(graph.nodes(), &["A", "B"]);
        assert_eq!(summary.dropped, 1);
        assert_eq!(graph.weighted_degrees("weight"), vec![10.0, 10.0]);
        assert!(graph.adjacency_matrix().iter().all(|w| w.is_finite()));
    }

    #[test]
    fn csv_nan_spellings_are_missing() {
        let (graph, summary) = load(
            "source,target,quantity\n\
             A,B,1\n\
             A,C,NAN\n\
             A,D,Nan\n",
        )
        .unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(summary.dropped, 2);
        assert!(!graph.contains_node(&"D".to_owned()));
    }

    #[test]
    fn csv_infinite_quantity() {
        let err = load("source,target,quantity\nA,B,1\nA,C,inf\n").unwrap_err();

        assert!(matches!(err, Error::Data(ref msg) if msg.contains("line 3")));
    }

    #[test]
    fn csv_nan_attribute_is_skipped() {
        let columns = InputConfig {
            attributes: vec!["year".to_owned()],
            ..InputConfig::default()
        };
        let data = "source,target,quantity,year\nA,B,1,NAN\n";

        let (graph, _) = GraphBuilder::from_reader(data.as_bytes(), &columns).unwrap();

        assert_eq!(graph.edges()[0].attribute("year"), None);
    }

    #[test]
    fn csv_attribute_cant_replace_weight() {
        let columns = InputConfig {
            attributes: vec!["weight".to_owned()],
            ..InputConfig::default()
        };
        let data = "source,target,quantity,weight\nA,B,10,0.5\n";

        let err = GraphBuilder::from_reader(data.as_bytes(), &columns).unwrap_err();

        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn csv_negative_quantity_is_kept() {
        let (graph, _) = load("source,target,quantity\nA,B,-2\n").unwrap();

        assert_eq!(graph.edges()[0].weight(), Some(-2.0));
    }

    #[test]
    fn missing_file() {
        let err = GraphBuilder::from_path("does/not/exist.csv", &InputConfig::default())
            .unwrap_err();

        assert!(matches!(err, Error::Io(_)));
    }
}
