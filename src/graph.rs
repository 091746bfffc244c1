//! A module for working with graphs.

use std::{
    collections::{hash_map::Entry, HashMap},
    fmt::Debug,
    hash::Hash,
};

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::{builder::GraphBuilder, edge::Edge};

/// Whether edges are read with or without their direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphKind {
    Directed,
    Undirected,
}

/// A multigraph, made up of vertices and (possibly parallel) edges.
///
/// Once built the graph can't be changed: metrics borrow it immutably and return their
/// results as separate values.
#[derive(Clone, Debug)]
pub struct Graph<T> {
    kind: GraphKind,
    /// The vertices in first-appearance order, this is the order used for the rows of every
    /// matrix and for breaking ties in rankings.
    nodes: Vec<T>,
    /// A mapping of vertices to their position in `nodes`.
    index: HashMap<T, usize>,
    /// The edges in insertion order.
    edges: Vec<Edge<T>>,
    /// The `(source, target)` indices of each edge, parallel to `edges`.
    endpoints: Vec<(usize, usize)>,
}

impl<T> Graph<T>
where
    T: Clone + Eq + Hash + Debug,
{
    /// Creates a directed multigraph from a sequence of edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use tradenet::edge::Edge;
    /// use tradenet::graph::Graph;
    ///
    /// let graph = Graph::directed([
    ///     Edge::weighted("A", "B", 10.0),
    ///     Edge::weighted("B", "C", 5.0),
    ///     Edge::weighted("A", "B", 3.0),
    /// ]);
    ///
    /// assert_eq!(graph.node_count(), 3);
    /// assert_eq!(graph.edge_count(), 3);
    /// ```
    pub fn directed(edges: impl IntoIterator<Item = Edge<T>>) -> Self {
        GraphBuilder::new(GraphKind::Directed)
            .extend_edges(edges)
            .build()
    }

    /// Creates an undirected multigraph from a sequence of edges.
    pub fn undirected(edges: impl IntoIterator<Item = Edge<T>>) -> Self {
        GraphBuilder::new(GraphKind::Undirected)
            .extend_edges(edges)
            .build()
    }

    pub(crate) fn from_parts(kind: GraphKind, nodes: Vec<T>, edges: Vec<Edge<T>>) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        let mut ordered = Vec::with_capacity(nodes.len());

        for node in nodes
            .into_iter()
            .chain(edges.iter().flat_map(|e| [e.source().clone(), e.target().clone()]))
        {
            if let Entry::Vacant(entry) = index.entry(node.clone()) {
                entry.insert(ordered.len());
                ordered.push(node);
            }
        }

        // Every endpoint was registered above.
        let endpoints = edges
            .iter()
            .map(|e| (index[e.source()], index[e.target()]))
            .collect();

        Self {
            kind,
            nodes: ordered,
            index,
            edges,
            endpoints,
        }
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn is_directed(&self) -> bool {
        self.kind == GraphKind::Directed
    }

    /// Returns the vertices in iteration order.
    pub fn nodes(&self) -> &[T] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    /// Returns the `(source, target)` vertex indices of every edge, in edge order.
    pub(crate) fn endpoints(&self) -> &[(usize, usize)] {
        &self.endpoints
    }

    /// Returns the position of a vertex in the iteration order.
    pub fn index_of(&self, node: &T) -> Option<usize> {
        self.index.get(node).copied()
    }

    pub fn contains_node(&self, node: &T) -> bool {
        self.index.contains_key(node)
    }

    /// Returns the vertex count of the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the edge count of the graph, parallel edges included.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Computes the density of the graph, the ratio of edges with respect to the maximum possible
    /// edges.
    ///
    /// Parallel edges are all counted, so a multigraph may have a density above 1. Graphs with
    /// fewer than two vertices have a density of 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use tradenet::edge::Edge;
    /// use tradenet::graph::Graph;
    ///
    /// let graph = Graph::directed([Edge::new("a", "b")]);
    /// assert_eq!(graph.density(), 0.5);
    ///
    /// let graph = Graph::undirected([Edge::new("a", "b")]);
    /// assert_eq!(graph.density(), 1.0);
    /// ```
    pub fn density(&self) -> f64 {
        let vc = self.node_count() as f64;
        let ec = self.edge_count() as f64;

        if self.node_count() < 2 {
            return 0.0;
        }

        // Calculate the total number of possible edges given a vertex count.
        let pec = match self.kind {
            GraphKind::Directed => vc * (vc - 1.0),
            GraphKind::Undirected => vc * (vc - 1.0) / 2.0,
        };

        ec / pec
    }

    /// Constructs the adjacency matrix for this graph.
    ///
    /// Entry `(i, j)` is the summed weight of every `i -> j` edge, an edge without a weight
    /// counts as 1. Rows and columns follow the vertex iteration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use tradenet::edge::Edge;
    /// use tradenet::graph::Graph;
    ///
    /// let graph = Graph::directed([
    ///     Edge::weighted("a", "b", 10.0),
    ///     Edge::weighted("a", "b", 3.0),
    /// ]);
    /// assert_eq!(
    ///     graph.adjacency_matrix(),
    ///     dmatrix![0.0, 13.0;
    ///              0.0, 0.0]
    /// );
    /// ```
    pub fn adjacency_matrix(&self) -> DMatrix<f64> {
        let n = self.node_count();
        let mut matrix = DMatrix::<f64>::zeros(n, n);

        for (edge, &(i, j)) in self.edges.iter().zip(&self.endpoints) {
            let weight = edge.weight().unwrap_or(1.0);

            matrix[(i, j)] += weight;

            // Self-loops sit on the diagonal and are only written once.
            if self.kind == GraphKind::Undirected && i != j {
                matrix[(j, i)] += weight;
            }
        }

        matrix
    }

    /// Returns the number of edge ends at each vertex (in + out for directed graphs).
    ///
    /// A self-loop contributes two to its vertex.
    pub fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.node_count()];

        for &(i, j) in &self.endpoints {
            degrees[i] += 1;
            degrees[j] += 1;
        }

        degrees
    }

    /// Returns the summed `key` attribute of the edges at each vertex.
    ///
    /// Edges without the attribute don't contribute.
    pub fn weighted_degrees(&self, key: &str) -> Vec<f64> {
        let mut degrees = vec![0.0; self.node_count()];

        for (edge, &(i, j)) in self.edges.iter().zip(&self.endpoints) {
            if let Some(weight) = edge.attribute(key) {
                degrees[i] += weight;
                degrees[j] += weight;
            }
        }

        degrees
    }

    /// Returns the number of edges leaving each vertex. Matches `degrees` for undirected graphs.
    pub fn out_degrees(&self) -> Vec<usize> {
        if self.kind == GraphKind::Undirected {
            return self.degrees();
        }

        let mut degrees = vec![0; self.node_count()];
        for &(i, _) in &self.endpoints {
            degrees[i] += 1;
        }

        degrees
    }

    /// Returns the number of edges entering each vertex. Matches `degrees` for undirected graphs.
    pub fn in_degrees(&self) -> Vec<usize> {
        if self.kind == GraphKind::Undirected {
            return self.degrees();
        }

        let mut degrees = vec![0; self.node_count()];
        for &(_, j) in &self.endpoints {
            degrees[j] += 1;
        }

        degrees
    }

    /// Returns the undirected simple projection of the graph.
    ///
    /// Parallel and antiparallel edges collapse into one edge per vertex pair whose attributes
    /// are merged, later edges overwriting shared keys. Self-loops survive. The vertex order is
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use tradenet::edge::Edge;
    /// use tradenet::graph::Graph;
    ///
    /// let graph = Graph::directed([
    ///     Edge::new("a", "b"),
    ///     Edge::new("a", "b"),
    ///     Edge::new("b", "a"),
    /// ]);
    /// let simple = graph.simplified();
    ///
    /// assert!(!simple.is_directed());
    /// assert_eq!(simple.edge_count(), 1);
    /// ```
    pub fn simplified(&self) -> Graph<T> {
        let mut pairs: HashMap<(usize, usize), usize> = HashMap::new();
        let mut edges: Vec<Edge<T>> = Vec::new();

        for (edge, &(i, j)) in self.edges.iter().zip(&self.endpoints) {
            let key = (i.min(j), i.max(j));

            match pairs.entry(key) {
                Entry::Occupied(slot) => {
                    // The first edge's orientation is kept, attributes are merged with later
                    // edges overwriting shared keys.
                    let kept = &mut edges[*slot.get()];
                    for (key, value) in edge.attributes() {
                        kept.set_attribute(key.clone(), *value);
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(edges.len());
                    edges.push(edge.clone());
                }
            }
        }

        Graph::from_parts(GraphKind::Undirected, self.nodes.clone(), edges)
    }

    /// Returns, for each vertex, the distinct vertices reachable over one edge. Direction is
    /// respected for directed graphs. Parallel edges don't produce duplicate entries.
    pub(crate) fn successors(&self) -> Vec<Vec<usize>> {
        self.neighbourhoods(false)
    }

    /// Returns, for each vertex, the distinct vertices with an edge into it. Matches
    /// `successors` for undirected graphs.
    pub(crate) fn predecessors(&self) -> Vec<Vec<usize>> {
        self.neighbourhoods(true)
    }

    /// Returns, for each vertex, the distinct neighbours ignoring direction.
    pub(crate) fn neighbours(&self) -> Vec<Vec<usize>> {
        let mut lists = vec![Vec::new(); self.node_count()];

        for &(i, j) in &self.endpoints {
            lists[i].push(j);
            if i != j {
                lists[j].push(i);
            }
        }

        dedup(lists)
    }

    fn neighbourhoods(&self, incoming: bool) -> Vec<Vec<usize>> {
        if self.kind == GraphKind::Undirected {
            return self.neighbours();
        }

        let mut lists = vec![Vec::new(); self.node_count()];
        for &(i, j) in &self.endpoints {
            if incoming {
                lists[j].push(i);
            } else {
                lists[i].push(j);
            }
        }

        dedup(lists)
    }
}

//
// Helpers
//

/// Removes duplicates from each list while keeping first-seen order.
fn dedup(lists: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
    use itertools::Itertools;

    lists
        .into_iter()
        .map(|list| list.into_iter().unique().collect())
        .collect()
}
