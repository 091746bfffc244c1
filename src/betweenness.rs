//! A module for performing the multi-threaded computation of betweenness

use std::collections::VecDeque;

use crate::sweep::sum_over_sources;

/// this is an implementation of Ulrik Brandes's
/// A Faster Algorithm for Betweenness Centrality
/// http://snap.stanford.edu/class/cs224w-readings/brandes01centrality.pdf
/// page 10, "Algorithm 1: Betweenness centrality in unweighted graphs"
///
/// `indices` holds the distinct successors of every vertex.
fn betweenness_for_node(index: usize, indices: &[Vec<usize>], betweenness_count: &mut [f64]) {
    let num_nodes = indices.len();

    let mut sigma: Vec<f64> = vec![0.0; num_nodes];
    let mut distance: Vec<usize> = vec![num_nodes + 1; num_nodes];
    let mut totals: Vec<Vec<usize>> = vec![Vec::<usize>::new(); num_nodes];
    let mut delta: Vec<f64> = vec![0.0; num_nodes];
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut stack: Vec<usize> = Vec::new();

    sigma[index] = 1.0;
    distance[index] = 0;
    queue.push_back(index);

    while let Some(v) = queue.pop_front() {
        stack.push(v);

        for &w in &indices[v] {
            if distance[w] == num_nodes + 1 {
                distance[w] = distance[v] + 1;
                queue.push_back(w);
            }
            if distance[w] == distance[v] + 1 {
                sigma[w] += sigma[v];
                totals[w].push(v);
            }
        }
    }

    while let Some(w) = stack.pop() {
        for &v in &totals[w] {
            delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
        }
        if w != index {
            betweenness_count[w] += delta[w];
        }
    }
}

/// Computes the betweenness of every vertex, normalised by `(n - 1)(n - 2)` when there are
/// more than two vertices. Pairs that aren't connected simply contribute nothing.
///
/// It is public for the metrics engine, but is not exposed in the public library interface.
pub fn compute_betweenness(indices: &[Vec<usize>], num_threads: usize) -> Vec<f64> {
    let num_nodes = indices.len();

    let betweenness_count = sum_over_sources(num_nodes, num_threads, |index, count| {
        betweenness_for_node(index, indices, count)
    });

    // With two vertices or fewer no vertex can sit between two others, the raw counts are
    // returned as is.
    if num_nodes <= 2 {
        return betweenness_count;
    }

    let divisor = ((num_nodes - 1) * (num_nodes - 2)) as f64;
    betweenness_count
        .into_iter()
        .map(|count| count / divisor)
        .collect()
}
