//! A module for degree statistics: the degree histogram and degree assortativity.

use serde::Serialize;

use crate::error::{Error, Result};

/// A histogram bin covering degrees `lower..upper`. The last bin also includes `upper`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DegreeBucket {
    pub lower: usize,
    pub upper: usize,
    pub count: usize,
}

/// Bins the degrees on integer edges from the lowest to the highest degree.
///
/// There are `max - min` bins, so a graph where every vertex has the same degree has no bin
/// at all and is rejected, as is a graph without vertices.
pub fn histogram(degrees: &[usize]) -> Result<Vec<DegreeBucket>> {
    let (Some(&min), Some(&max)) = (degrees.iter().min(), degrees.iter().max()) else {
        return Err(Error::InvalidGraph(
            "degree distribution of an empty graph is undefined".to_owned(),
        ));
    };

    if min == max {
        return Err(Error::InvalidGraph(format!(
            "every vertex has degree {min}, the degree histogram has an empty bin range"
        )));
    }

    let mut buckets: Vec<DegreeBucket> = (min..max)
        .map(|lower| DegreeBucket {
            lower,
            upper: lower + 1,
            count: 0,
        })
        .collect();

    for &degree in degrees {
        // The highest degree falls in the last, closed, bin.
        let bin = (degree - min).min(buckets.len() - 1);
        buckets[bin].count += 1;
    }

    Ok(buckets)
}

/// Pearson correlation of the `(x, y)` degree pairs found at the two ends of every edge.
///
/// Returns NaN when either side has no variance.
pub fn assortativity(pairs: &[(usize, usize)]) -> Result<f64> {
    if pairs.is_empty() {
        return Err(Error::InvalidGraph(
            "degree assortativity requires at least one edge".to_owned(),
        ));
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|&(x, _)| x as f64).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|&(_, y)| y as f64).sum::<f64>() / n;

    let (mut covariance, mut variance_x, mut variance_y) = (0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        let dx = x as f64 - mean_x;
        let dy = y as f64 - mean_y;

        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    // 0 / 0 is NaN, which is the answer for a degenerate distribution.
    Ok(covariance / (variance_x * variance_y).sqrt())
}
