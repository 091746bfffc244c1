//! A module for eigenvector centrality by power iteration.

use nalgebra::{DMatrix, DVector};

use crate::{
    config::EigenvectorConfig,
    error::{Error, Result},
};

/// Computes the dominant eigenvector of a symmetric 0/1 adjacency matrix.
///
/// Iterates on `A + I` from a uniform start summing to 1, normalising each step to unit
/// length. The shift keeps bipartite graphs from oscillating, it doesn't change the
/// eigenvectors. Convergence is reached once the summed absolute change of the vector drops
/// below `n * tolerance`.
pub fn compute_eigenvector(
    adjacency: DMatrix<f64>,
    config: EigenvectorConfig,
) -> Result<DVector<f64>> {
    let n = adjacency.nrows();

    // The rest of the computation requires a matrix with at least a dim of 1x1.
    if n == 0 {
        return Err(Error::InvalidGraph(
            "eigenvector centrality of an empty graph is undefined".to_owned(),
        ));
    }

    let shifted = adjacency + DMatrix::<f64>::identity(n, n);
    let mut x = DVector::<f64>::from_element(n, 1.0 / n as f64);

    for iteration in 1..=config.max_iterations {
        let last = x;
        x = &shifted * &last;

        let norm = x.norm();
        if norm > 0.0 {
            x.unscale_mut(norm);
        }

        let change = (&x - &last).abs().sum();
        if change < n as f64 * config.tolerance {
            tracing::debug!("eigenvector centrality converged after {iteration} iterations");
            return Ok(x);
        }
    }

    Err(Error::Convergence {
        metric: "eigenvector centrality",
        iterations: config.max_iterations,
        tolerance: config.tolerance,
    })
}
