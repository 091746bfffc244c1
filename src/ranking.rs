//! Per-vertex scores ordered from highest to lowest.

use serde::Serialize;

/// An ordered list of `(vertex, value)` pairs, highest value first.
///
/// Ties keep the graph's vertex iteration order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ranking<T> {
    entries: Vec<(T, f64)>,
}

impl<T: Clone> Ranking<T> {
    /// Ranks `values`, which must be parallel to `nodes`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tradenet::ranking::Ranking;
    ///
    /// let ranking = Ranking::new(&["a", "b", "c"], &[1.0, 3.0, 1.0]);
    /// assert_eq!(ranking.entries(), &[("b", 3.0), ("a", 1.0), ("c", 1.0)]);
    /// ```
    pub fn new(nodes: &[T], values: &[f64]) -> Self {
        debug_assert_eq!(nodes.len(), values.len());

        let mut entries: Vec<(T, f64)> = nodes.iter().cloned().zip(values.iter().copied()).collect();

        // `sort_by` is stable, equal values stay in vertex order.
        entries.sort_by(|(_, a), (_, b)| b.total_cmp(a));

        Self { entries }
    }

    /// Keeps only the `n` highest entries.
    pub fn truncate(mut self, n: usize) -> Self {
        self.entries.truncate(n);
        self
    }

    pub fn entries(&self) -> &[(T, f64)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &(T, f64)> {
        self.entries.iter()
    }

    /// Returns the value recorded for a vertex, if it is part of the ranking.
    pub fn get(&self, node: &T) -> Option<f64>
    where
        T: PartialEq,
    {
        self.entries
            .iter()
            .find(|(n, _)| n == node)
            .map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> IntoIterator for Ranking<T> {
    type Item = (T, f64);
    type IntoIter = std::vec::IntoIter<(T, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descending() {
        let ranking = Ranking::new(&["a", "b", "c"], &[0.5, 2.0, 1.0]);

        assert_eq!(ranking.entries(), &[("b", 2.0), ("c", 1.0), ("a", 0.5)]);
    }

    #[test]
    fn ties_keep_vertex_order() {
        let ranking = Ranking::new(&["d", "c", "b", "a"], &[1.0, 1.0, 2.0, 1.0]);

        assert_eq!(
            ranking.entries(),
            &[("b", 2.0), ("d", 1.0), ("c", 1.0), ("a", 1.0)]
        );
    }

    #[test]
    fn truncate() {
        let ranking = Ranking::new(&["a", "b", "c"], &[1.0, 2.0, 3.0]).truncate(2);

        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking.get(&"a"), None);
        assert_eq!(ranking.get(&"c"), Some(3.0));

        // Truncating past the end is a no-op.
        assert_eq!(ranking.clone().truncate(15), ranking);
    }

    #[test]
    fn empty() {
        let ranking: Ranking<&str> = Ranking::new(&[], &[]);

        assert!(ranking.is_empty());
    }
}
