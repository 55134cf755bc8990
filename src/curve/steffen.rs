//! Steffen's monotone tangents, bounded by twice the smaller neighbouring
//! secant.

/// Tangents for `ds.len() + 1` points. Needs at least two intervals.
pub fn tangents(hs: &[f64], ds: &[f64]) -> Vec<f64> {
    let m = ds.len();
    let mut ms = vec![0.0; m + 1];

    for i in 1..m {
        let (d0, d1) = (ds[i - 1], ds[i]);
        let (h0, h1) = (hs[i - 1], hs[i]);
        let p = (h1 * d0 + h0 * d1) / (h0 + h1);
        let t = (sign(d0) + sign(d1)) * d0.abs().min(d1.abs()).min(0.5 * p.abs());
        ms[i] = if t.is_finite() { t } else { 0.0 };
    }

    ms[0] = ds[0];
    ms[m] = ds[m - 1];
    ms
}

fn sign(d: f64) -> f64 {
    if d < 0.0 {
        -1.0
    } else if d > 0.0 {
        1.0
    } else {
        0.0
    }
}
