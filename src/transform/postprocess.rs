use std::f64::consts::PI;

use super::{Clamp, TransformConfig, Window};

/// Runs normalization (if enabled), clamping and windowing, in that order.
pub fn apply(blocks: &mut [f64], config: &TransformConfig) {
    if config.normalize {
        normalize(blocks);
    }
    clamp(blocks, config.clamp);
    apply_window(blocks, config.window);
}

/// Feature scaling to [0, 1]. A flat sequence has no range to scale and
/// becomes all zeros.
pub fn normalize(blocks: &mut [f64]) {
    let lo = blocks.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = blocks.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = hi - lo;
    if !(range > 0.0 && range.is_finite()) {
        if !blocks.is_empty() {
            log::debug!("Flat block sequence (range {}), normalizing to zero", range);
        }
        blocks.fill(0.0);
        return;
    }
    for b in blocks.iter_mut() {
        *b = (*b - lo) / range;
    }
}

pub fn clamp(blocks: &mut [f64], bounds: Clamp) {
    for b in blocks.iter_mut() {
        *b = b.clamp(bounds.min, bounds.max);
    }
}

pub fn apply_window(blocks: &mut [f64], window: Window) {
    if window == Window::Rectangular {
        return;
    }
    let coefficients = window.coefficients(blocks.len());
    for (b, w) in blocks.iter_mut().zip(coefficients) {
        *b *= w;
    }
}

impl Window {
    /// Coefficients for a sequence of length `size`. Every window is symmetric,
    /// so only the left half is computed and mirrored.
    pub fn coefficients(&self, size: usize) -> Vec<f64> {
        if size < 2 {
            return vec![1.0; size];
        }
        let last = (size - 1) as f64;
        let left = |n: usize| -> f64 {
            let n = n as f64;
            match *self {
                Window::Rectangular => 1.0,
                Window::Hann => hann(n, last),
                Window::Tukey(alpha) => tukey(n, last, alpha.clamp(0.0, 1.0)),
                Window::PlanckTaper(eps) => planck_taper(n, last, eps.clamp(0.0, 0.5)),
            }
        };
        (0..size).map(|n| left(n.min(size - 1 - n))).collect()
    }
}

fn hann(n: f64, last: f64) -> f64 {
    0.5 * (1.0 - (2.0 * PI * n / last).cos())
}

fn tukey(n: f64, last: f64, alpha: f64) -> f64 {
    let taper = alpha * last / 2.0;
    if n < taper {
        0.5 * (1.0 - (2.0 * PI * n / (alpha * last)).cos())
    } else {
        1.0
    }
}

fn planck_taper(n: f64, last: f64, eps: f64) -> f64 {
    let taper = eps * last;
    if n == 0.0 && taper > 0.0 {
        return 0.0;
    }
    if n < taper {
        let z = taper / n - taper / (taper - n);
        1.0 / (1.0 + z.exp())
    } else {
        1.0
    }
}
