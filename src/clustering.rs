//! A module for local clustering and transitivity on simple undirected graphs.

use std::collections::HashSet;

use itertools::Itertools;

/// Triangle and degree counts of a simple undirected graph, self-loops excluded.
pub struct Triangles {
    /// Triangles each vertex takes part in.
    pub triangles: Vec<usize>,
    /// Neighbours of each vertex, not counting itself.
    pub degrees: Vec<usize>,
}

impl Triangles {
    /// Counts triangles from the neighbour lists of a simple undirected graph.
    pub fn count(neighbours: &[Vec<usize>]) -> Self {
        let sets: Vec<HashSet<usize>> = neighbours
            .iter()
            .enumerate()
            .map(|(v, list)| list.iter().copied().filter(|&u| u != v).collect())
            .collect();

        let triangles = neighbours
            .iter()
            .enumerate()
            .map(|(v, list)| {
                list.iter()
                    .filter(|&&u| u != v)
                    .tuple_combinations()
                    .filter(|(u, w)| sets[**u].contains(*w))
                    .count()
            })
            .collect();

        let degrees = sets.iter().map(HashSet::len).collect();

        Self { triangles, degrees }
    }

    /// The fraction of pairs of neighbours that are themselves connected, 0 for vertices with
    /// fewer than two neighbours.
    pub fn local(&self) -> Vec<f64> {
        self.triangles
            .iter()
            .zip(&self.degrees)
            .map(|(&t, &d)| {
                if t == 0 {
                    0.0
                } else {
                    2.0 * t as f64 / (d * (d - 1)) as f64
                }
            })
            .collect()
    }

    /// The global clustering coefficient, closed triplets over all triplets. 0 when the graph
    /// has no triangle.
    pub fn transitivity(&self) -> f64 {
        let closed: usize = self.triangles.iter().sum();
        if closed == 0 {
            return 0.0;
        }

        let triplets: usize = self.degrees.iter().map(|&d| d * d.saturating_sub(1) / 2).sum();

        closed as f64 / triplets as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle() {
        let triangles = Triangles::count(&[vec![1, 2], vec![0, 2], vec![0, 1]]);

        assert_eq!(triangles.triangles, vec![1, 1, 1]);
        assert_eq!(triangles.local(), vec![1.0, 1.0, 1.0]);
        assert_eq!(triangles.transitivity(), 1.0);
    }

    #[test]
    fn triangle_with_tail() {
        // a, b, c form a triangle and c - d hangs off it.
        let triangles = Triangles::count(&[vec![1, 2], vec![0, 2], vec![0, 1, 3], vec![2]]);

        assert_eq!(triangles.local(), vec![1.0, 1.0, 1.0 / 3.0, 0.0]);
        // 3 closed triplets out of 1 + 1 + 3 + 0.
        assert_eq!(triangles.transitivity(), 3.0 / 5.0);
    }

    #[test]
    fn self_loops_are_ignored() {
        let triangles = Triangles::count(&[vec![0, 1], vec![0]]);

        assert_eq!(triangles.degrees, vec![1, 1]);
        assert_eq!(triangles.local(), vec![0.0, 0.0]);
    }

    #[test]
    fn no_triangles() {
        let triangles = Triangles::count(&[vec![1], vec![0, 2], vec![1], vec![]]);

        assert_eq!(triangles.local(), vec![0.0; 4]);
        assert_eq!(triangles.transitivity(), 0.0);
    }
}
