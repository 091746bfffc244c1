//! A module for performing the multi-threaded computation of closeness

use std::collections::VecDeque;

use crate::sweep::sum_over_sources;

/// Breadth-first search from `index` over `indices`, storing the vertex's closeness.
///
/// Only reachable vertices count towards the distance total, the result is then scaled by the
/// share of the graph that was reached (Wasserman and Faust).
fn closeness_for_node(index: usize, indices: &[Vec<usize>], closeness: &mut [f64]) {
    let num_nodes = indices.len();

    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut deltas: Vec<Option<usize>> = vec![None; num_nodes];

    deltas[index] = Some(0);
    queue.push_back(index);

    let mut reached: usize = 0;
    let mut total_path_length: usize = 0;

    while let Some(current) = queue.pop_front() {
        let depth = deltas[current].unwrap_or_default() + 1;

        for &j in &indices[current] {
            if deltas[j].is_none() {
                deltas[j] = Some(depth);
                queue.push_back(j);

                reached += 1;
                total_path_length += depth;
            }
        }
    }

    if total_path_length > 0 && num_nodes > 1 {
        let reached = reached as f64;
        closeness[index] =
            reached / total_path_length as f64 * (reached / (num_nodes - 1) as f64);
    }
}

/// Computes the closeness of every vertex.
///
/// `indices` lists, for each vertex, the vertices one step closer to it: predecessors for
/// directed graphs (so distances are measured inwards) and neighbours for undirected ones.
///
/// It is public for the metrics engine, but is not exposed in the public library interface.
pub fn compute_closeness(indices: &[Vec<usize>], num_threads: usize) -> Vec<f64> {
    sum_over_sources(indices.len(), num_threads, |index, closeness| {
        closeness_for_node(index, indices, closeness)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undirected_path() {
        // a - b - c
        let indices = vec![vec![1], vec![0, 2], vec![1]];

        assert_eq!(compute_closeness(&indices, 1), vec![2.0 / 3.0, 1.0, 2.0 / 3.0]);
    }

    #[test]
    fn inward_star() {
        // Every leaf points at the hub, which sees them all one step away.
        let predecessors = vec![vec![1, 2, 3], vec![], vec![], vec![]];

        assert_eq!(
            compute_closeness(&predecessors, 1),
            vec![1.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn partial_reach_is_scaled() {
        // a - b, c isolated: a reaches 1 of 2 others at distance 1.
        let indices = vec![vec![1], vec![0], vec![]];

        assert_eq!(compute_closeness(&indices, 1), vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn single_vertex() {
        assert_eq!(compute_closeness(&[vec![]], 1), vec![0.0]);
    }

    #[test]
    fn threads_agree() {
        let indices = vec![vec![1, 2], vec![2], vec![3], vec![0], vec![]];

        assert_eq!(compute_closeness(&indices, 3), compute_closeness(&indices, 1));
    }
}
