//! Per-vertex metric values kept next to the graph rather than inside it.

use std::{collections::HashMap, fmt::Debug, hash::Hash};

use serde::Serialize;

use crate::graph::Graph;

/// The metric values recorded for one vertex. A field is `None` until its metric has run and
/// is overwritten each time the metric runs again.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NodeAttributes {
    pub degree: Option<usize>,
    pub weighted_degree: Option<f64>,
    pub betweenness_centrality: Option<f64>,
    pub closeness_centrality: Option<f64>,
    pub eigenvector_centrality: Option<f64>,
    pub clustering_coefficient: Option<f64>,
}

/// Column selector used when recording a metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Attribute {
    WeightedDegree,
    Betweenness,
    Closeness,
    Eigenvector,
    Clustering,
}

/// The attribute table of a graph, one row per vertex in iteration order.
#[derive(Clone, Debug, Serialize)]
pub struct Annotations<T> {
    nodes: Vec<T>,
    #[serde(skip)]
    index: HashMap<T, usize>,
    rows: Vec<NodeAttributes>,
}

impl<T> Annotations<T>
where
    T: Clone + Eq + Hash + Debug,
{
    /// Creates an empty table for the vertices of `graph`.
    pub fn new(graph: &Graph<T>) -> Self {
        let index = graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, node)| (node.clone(), i))
            .collect();

        Self {
            nodes: graph.nodes().to_vec(),
            index,
            rows: vec![NodeAttributes::default(); graph.node_count()],
        }
    }

    /// Returns the attributes of a vertex, `None` if it isn't part of the graph.
    pub fn get(&self, node: &T) -> Option<&NodeAttributes> {
        self.index.get(node).map(|&i| &self.rows[i])
    }

    /// Iterates over `(vertex, attributes)` in vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &NodeAttributes)> {
        self.nodes.iter().zip(&self.rows)
    }

    pub(crate) fn record_degrees(&mut self, values: &[usize]) {
        debug_assert_eq!(values.len(), self.rows.len());

        for (row, value) in self.rows.iter_mut().zip(values) {
            row.degree = Some(*value);
        }
    }

    pub(crate) fn record(&mut self, attribute: Attribute, values: &[f64]) {
        debug_assert_eq!(values.len(), self.rows.len());

        for (row, value) in self.rows.iter_mut().zip(values) {
            let slot = match attribute {
                Attribute::WeightedDegree => &mut row.weighted_degree,
                Attribute::Betweenness => &mut row.betweenness_centrality,
                Attribute::Closeness => &mut row.closeness_centrality,
                Attribute::Eigenvector => &mut row.eigenvector_centrality,
                Attribute::Clustering => &mut row.clustering_coefficient,
            };

            *slot = Some(*value);
        }
    }
}

// The index is derived from `nodes`.
impl<T: PartialEq> PartialEq for Annotations<T> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.rows == other.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;

    #[test]
    fn starts_empty() {
        let graph = Graph::directed([Edge::new("a", "b")]);
        let annotations = Annotations::new(&graph);

        assert_eq!(annotations.get(&"a"), Some(&NodeAttributes::default()));
        assert_eq!(annotations.get(&"z"), None);
        assert_eq!(annotations.iter().count(), 2);
    }

    #[test]
    fn lookup_follows_vertex_order() {
        let graph = Graph::directed([Edge::new("c", "a"), Edge::new("b", "c")]);
        let mut annotations = Annotations::new(&graph);

        annotations.record(Attribute::Closeness, &[1.0, 2.0, 3.0]);

        assert_eq!(annotations.get(&"c").unwrap().closeness_centrality, Some(1.0));
        assert_eq!(annotations.get(&"a").unwrap().closeness_centrality, Some(2.0));
        assert_eq!(annotations.get(&"b").unwrap().closeness_centrality, Some(3.0));
    }

    #[test]
    fn record_overwrites_one_column() {
        let graph = Graph::directed([Edge::new("a", "b")]);
        let mut annotations = Annotations::new(&graph);

        annotations.record(Attribute::Betweenness, &[1.0, 2.0]);
        annotations.record_degrees(&[1, 1]);
        annotations.record(Attribute::Betweenness, &[3.0, 4.0]);

        let b = annotations.get(&"b").unwrap();
        assert_eq!(b.betweenness_centrality, Some(4.0));
        assert_eq!(b.degree, Some(1));
        assert_eq!(b.closeness_centrality, None);
    }
}
