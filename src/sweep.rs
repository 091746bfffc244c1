//! A module for spreading per-source graph searches over worker threads.

use std::thread;

pub const MIN_NUM_THREADS: usize = 1;
pub const MAX_NUM_THREADS: usize = 128;

/// Runs `task` once for every source vertex in `0..num_nodes` and sums what the calls write.
///
/// Each worker thread keeps its own accumulator of `num_nodes` values, the accumulators are
/// added together once every worker is done. Sources are dealt to workers by stride and the
/// partial results are summed in worker order, so a given thread count always produces the
/// same floating point result.
pub fn sum_over_sources<F>(num_nodes: usize, num_threads: usize, task: F) -> Vec<f64>
where
    F: Fn(usize, &mut [f64]) + Sync,
{
    let num_threads = num_threads
        .clamp(MIN_NUM_THREADS, MAX_NUM_THREADS)
        .min(num_nodes.max(1));

    if num_threads == 1 {
        let mut totals = vec![0.0; num_nodes];
        for index in 0..num_nodes {
            task(index, &mut totals);
        }
        return totals;
    }

    let task = &task;
    thread::scope(|scope| {
        let handles: Vec<_> = (0..num_threads)
            .map(|worker| {
                scope.spawn(move || {
                    let mut partial = vec![0.0; num_nodes];
                    for index in (worker..num_nodes).step_by(num_threads) {
                        task(index, &mut partial);
                    }
                    partial
                })
            })
            .collect();

        let mut totals = vec![0.0; num_nodes];
        for handle in handles {
            let partial = handle
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic));

            for (total, value) in totals.iter_mut().zip(partial) {
                *total += value;
            }
        }

        totals
    })
}
