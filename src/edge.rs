//! A module for working with edges.

use std::collections::BTreeMap;

/// The attribute key the builder stores transaction quantities under.
pub const WEIGHT: &str = "weight";

/// A directed edge from `source` to `target` carrying numeric attributes.
///
/// Edges have no identity beyond their position in the graph: two edges with the same
/// endpoints are distinct parallel edges, each keeping its own attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge<T> {
    source: T,
    target: T,
    attributes: BTreeMap<String, f64>,
}

impl<T> Edge<T> {
    /// Creates a new unweighted edge from two vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use tradenet::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_eq!(edge.weight(), None);
    /// assert_ne!(edge, Edge::new("b", "a"));
    /// ```
    pub fn new(source: T, target: T) -> Self {
        Self {
            source,
            target,
            attributes: BTreeMap::new(),
        }
    }

    /// Creates a new edge with the given weight.
    ///
    /// # Examples
    ///
    /// ```
    /// use tradenet::edge::Edge;
    ///
    /// let edge = Edge::weighted("a", "b", 10.0);
    /// assert_eq!(edge.weight(), Some(10.0));
    /// ```
    pub fn weighted(source: T, target: T, weight: f64) -> Self {
        Self::new(source, target).with_attribute(WEIGHT, weight)
    }

    /// Sets a numeric attribute, replacing any previous value under the same key.
    pub fn with_attribute(mut self, key: impl Into<String>, value: f64) -> Self {
        self.set_attribute(key, value);
        self
    }

    pub(crate) fn set_attribute(&mut self, key: impl Into<String>, value: f64) {
        self.attributes.insert(key.into(), value);
    }

    /// Returns the vertex the edge leaves from.
    ///
    /// # Examples
    ///
    /// ```
    /// use tradenet::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_eq!(edge.source(), &"a");
    /// ```
    pub fn source(&self) -> &T {
        &self.source
    }

    /// Returns the vertex the edge points to.
    ///
    /// # Examples
    ///
    /// ```
    /// use tradenet::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_eq!(edge.target(), &"b");
    /// ```
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Returns the value stored under `key`, if any.
    pub fn attribute(&self, key: &str) -> Option<f64> {
        self.attributes.get(key).copied()
    }

    /// Returns all the attributes of the edge.
    pub fn attributes(&self) -> &BTreeMap<String, f64> {
        &self.attributes
    }

    /// Returns the `weight` attribute, if any.
    pub fn weight(&self) -> Option<f64> {
        self.attribute(WEIGHT)
    }

    /// Returns whether the edge contains the given vertex.
    ///
    /// # Examples
    ///
    /// ```
    /// use tradenet::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    ///
    /// assert_eq!(edge.contains(&"a"), true);
    /// assert_eq!(edge.contains(&"b"), true);
    /// assert_eq!(edge.contains(&"c"), false);
    /// ```
    pub fn contains(&self, vertex: &T) -> bool
    where
        T: PartialEq,
    {
        self.source() == vertex || self.target() == vertex
    }

    /// Returns whether both ends of the edge are the same vertex.
    pub fn is_self_loop(&self) -> bool
    where
        T: PartialEq,
    {
        self.source == self.target
    }
}
