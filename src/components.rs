//! A module for strongly and weakly connected components.
//!
//! Components are lists of vertex indices in ascending order, and the components themselves
//! are ordered by their lowest index.

use std::collections::HashMap;

use petgraph::{
    algo::tarjan_scc,
    graph::{DiGraph, NodeIndex},
    unionfind::UnionFind,
};

/// Finds the strongly connected components with Tarjan's algorithm.
///
/// `successors` holds the vertices each vertex has an edge to.
pub fn strongly_connected(successors: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let num_edges = successors.iter().map(Vec::len).sum();
    let mut graph = DiGraph::<(), ()>::with_capacity(successors.len(), num_edges);

    for _ in successors {
        graph.add_node(());
    }
    for (v, list) in successors.iter().enumerate() {
        for &w in list {
            graph.add_edge(NodeIndex::new(v), NodeIndex::new(w), ());
        }
    }

    let mut components: Vec<Vec<usize>> = tarjan_scc(&graph)
        .into_iter()
        .map(|component| {
            let mut members: Vec<usize> = component.into_iter().map(|n| n.index()).collect();
            members.sort_unstable();
            members
        })
        .collect();

    components.sort_unstable_by_key(|component| component[0]);
    components
}

/// Finds the weakly connected components, `neighbours` must ignore edge direction.
pub fn weakly_connected(neighbours: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut sets = UnionFind::<usize>::new(neighbours.len());

    for (v, list) in neighbours.iter().enumerate() {
        for &w in list {
            sets.union(v, w);
        }
    }

    // Vertices are visited in ascending order, so each component starts at its lowest index.
    let mut positions: HashMap<usize, usize> = HashMap::new();
    let mut components: Vec<Vec<usize>> = Vec::new();

    for v in 0..neighbours.len() {
        let root = sets.find_mut(v);
        let position = *positions.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[position].push(v);
    }

    components
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_and_tail() {
        // 0 -> 1 -> 2 -> 0, 2 -> 3
        let successors = vec![vec![1], vec![2], vec![0, 3], vec![]];

        assert_eq!(
            strongly_connected(&successors),
            vec![vec![0, 1, 2], vec![3]]
        );
    }

    #[test]
    fn chain_is_all_singletons() {
        let successors = vec![vec![1], vec![2], vec![]];

        assert_eq!(
            strongly_connected(&successors),
            vec![vec![0], vec![1], vec![2]]
        );
    }

    #[test]
    fn two_cycles_joined_one_way() {
        // 0 <-> 1, 2 <-> 3, 3 -> 0
        let successors = vec![vec![1], vec![0], vec![3], vec![2, 0]];

        assert_eq!(
            strongly_connected(&successors),
            vec![vec![0, 1], vec![2, 3]]
        );
    }

    #[test]
    fn self_loop() {
        assert_eq!(strongly_connected(&[vec![0]]), vec![vec![0]]);
    }

    #[test]
    fn long_cycle() {
        let n = 1_000;
        let successors: Vec<Vec<usize>> = (0..n)
            .map(|i| if i + 1 < n { vec![i + 1] } else { vec![0] })
            .collect();

        let components = strongly_connected(&successors);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), n);
    }

    #[test]
    fn weak() {
        // 0 - 1, 2 - 3 - 4, 5 alone
        let neighbours = vec![vec![1], vec![0], vec![3], vec![2, 4], vec![3], vec![]];

        assert_eq!(
            weakly_connected(&neighbours),
            vec![vec![0, 1], vec![2, 3, 4], vec![5]]
        );
    }

    #[test]
    fn empty() {
        assert!(strongly_connected(&[]).is_empty());
        assert!(weakly_connected(&[]).is_empty());
    }
}
