//! Fritsch-Carlson monotone tangents.
//!
//! See <http://math.stackexchange.com/questions/45218/implementation-of-monotone-cubic-interpolation>

/// Tangents for `ds.len() + 1` points given interval widths `hs` and secant
/// slopes `ds`. Needs at least two intervals.
pub fn tangents(hs: &[f64], ds: &[f64]) -> Vec<f64> {
    let m = ds.len();
    let mut ms = vec![0.0; m + 1];

    for i in 1..m {
        let (d0, d1) = (ds[i - 1], ds[i]);
        // Local extremum or plateau: flat tangent
        if d0 == 0.0 || d1 == 0.0 || (d0 > 0.0) != (d1 > 0.0) {
            continue;
        }
        let (h0, h1) = (hs[i - 1], hs[i]);
        let t = 3.0 * (h0 + h1) / ((2.0 * h1 + h0) / d0 + (h1 + 2.0 * h0) / d1);
        ms[i] = if t.is_finite() { t } else { 0.0 };
    }

    ms[0] = edge(hs[0], hs[1], ds[0], ds[1]);
    ms[m] = edge(hs[m - 1], hs[m - 2], ds[m - 1], ds[m - 2]);
    ms
}

/// One-sided three-point estimate at an end point, from the outer interval
/// (`h_e`, `d_e`) and its inner neighbour (`h_i`, `d_i`).
fn edge(h_e: f64, h_i: f64, d_e: f64, d_i: f64) -> f64 {
    let g = ((2.0 * h_e + h_i) * d_e - h_e * d_i) / (h_e + h_i);
    if !g.is_finite() || g * d_e <= 0.0 {
        return 0.0;
    }
    if d_e * d_i <= 0.0 && g.abs() > 3.0 * d_e.abs() {
        return 3.0 * d_e;
    }
    g
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn extrema_get_flat_tangents() {
        // up, down, flat, up
        let ms = tangents(&[1.0; 4], &[1.0, -1.0, 0.0, 2.0]);
        assert_eq!(ms[1], 0.0);
        assert_eq!(ms[2], 0.0);
        assert_eq!(ms[3], 0.0);
    }

    #[test]
    fn equal_secants_keep_their_slope() {
        let ms = tangents(&[1.0, 1.0, 1.0], &[2.0, 2.0, 2.0]);
        for m in ms {
            assert_abs_diff_eq!(m, 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn interior_is_harmonic_blend() {
        // uniform spacing reduces to the harmonic mean of the secants
        let ms = tangents(&[1.0, 1.0], &[1.0, 3.0]);
        assert_abs_diff_eq!(ms[1], 1.5, epsilon = 1e-12);
    }

    #[test]
    fn edge_against_the_secant_is_zeroed() {
        // g = (3 * 1 - 5) / 2 < 0 while the edge secant is positive
        assert_eq!(edge(1.0, 1.0, 1.0, 5.0), 0.0);
    }

    #[test]
    fn edge_is_capped_at_three_secants() {
        // g = (3 * 1 - (-10)) / 2 = 6.5 > 3
        assert_eq!(edge(1.0, 1.0, 1.0, -10.0), 3.0);
        // below the cap it is left alone: g = (3 * 1 - (-1)) / 2 = 2
        assert_eq!(edge(1.0, 1.0, 1.0, -1.0), 2.0);
    }

    #[test]
    fn right_edge_mirrors_left() {
        let left = tangents(&[1.0, 2.0, 1.0], &[0.5, 1.0, 4.0]);
        let right = tangents(&[1.0, 2.0, 1.0], &[4.0, 1.0, 0.5]);
        assert_abs_diff_eq!(left[0], right[3], epsilon = 1e-12);
        assert_abs_diff_eq!(left[3], right[0], epsilon = 1e-12);
    }
}
