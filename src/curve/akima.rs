//! Akima spline tangents.

/// Tangents for `ds.len() + 1` points from the secant slopes alone. Needs at
/// least two intervals.
///
/// The slope series is padded with two extrapolated slopes on each side so the
/// end points use the same weighting as interior ones.
pub fn tangents(ds: &[f64]) -> Vec<f64> {
    let n = ds.len() + 1;
    let m = n + 3;
    let mut slopes = vec![0.0; m];
    slopes[2..m - 2].copy_from_slice(ds);
    slopes[1] = 2.0 * slopes[2] - slopes[3];
    slopes[0] = 3.0 * slopes[2] - 2.0 * slopes[3];
    slopes[m - 2] = 2.0 * slopes[m - 3] - slopes[m - 4];
    slopes[m - 1] = 3.0 * slopes[m - 3] - 2.0 * slopes[m - 4];

    (0..n)
        .map(|i| {
            let w_left = (slopes[i + 3] - slopes[i + 2]).abs();
            let w_right = (slopes[i + 1] - slopes[i]).abs();
            weighted_average(slopes[i + 1], slopes[i + 2], w_left, w_right)
        })
        .collect()
}

fn weighted_average(v1: f64, v2: f64, w1: f64, w2: f64) -> f64 {
    let w = w1 + w2;
    if w > 0.0 {
        (v1 * w1 + v2 * w2) / w
    } else {
        0.5 * v1 + 0.5 * v2
    }
}
