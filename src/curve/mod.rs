//! Curve fitting through block levels.
//!
//! Tangents are chosen per point by one of the monotone strategies and every
//! pair of neighbouring points becomes one cubic Bézier segment via the usual
//! Hermite-to-Bézier conversion (control points a third of the way in).

pub mod akima;
pub mod fritsch_carlson;
pub mod steffen;

use std::fmt::{self, Write};
use std::str::FromStr;

use crate::error::{Error, Result};

/// A point on the drawing plane, `[x, y]`.
pub type Point = [f64; 2];

/// Resets curvature inside a path without moving the pen.
pub const ZERO_SEGMENT: &str = "c 0 0, 0 0, 0 0 ";

/// End point and control points of one cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicCurvePoint {
    pub root: Point,
    pub c1: Point,
    pub c2: Point,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    Line(Point),
    Cubic(CubicCurvePoint),
}

impl Segment {
    /// Appends the absolute SVG path command for this segment.
    pub fn write_path(&self, out: &mut String) {
        // Writing into a String cannot fail
        let _ = match self {
            Segment::Line([x, y]) => write!(out, "L {} {} ", x, y),
            Segment::Cubic(c) => write!(
                out,
                "C {} {}, {} {}, {} {} ",
                c.c1[0], c.c1[1], c.c2[0], c.c2[1], c.root[0], c.root[1]
            ),
        };
    }
}

/// Renders `M start` followed by every segment.
pub fn to_path(start: Point, segments: &[Segment]) -> String {
    let mut out = format!("M {} {} ", start[0], start[1]);
    for segment in segments {
        segment.write_path(&mut out);
    }
    out
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Straight lines between points.
    None,
    #[default]
    FritschCarlson,
    Steffen,
    Akima,
}

impl FromStr for Interpolation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Interpolation::None),
            "fritsch-carlson" => Ok(Interpolation::FritschCarlson),
            "steffen" => Ok(Interpolation::Steffen),
            "akima" => Ok(Interpolation::Akima),
            other => Err(Error::UnknownInterpolation(other.to_string())),
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Interpolation::None => "none",
            Interpolation::FritschCarlson => "fritsch-carlson",
            Interpolation::Steffen => "steffen",
            Interpolation::Akima => "akima",
        };
        f.write_str(name)
    }
}

/// Interval widths and secant slopes between consecutive points.
pub(crate) fn secants(samples: &[Point]) -> (Vec<f64>, Vec<f64>) {
    samples
        .windows(2)
        .map(|w| {
            let h = w[1][0] - w[0][0];
            (h, (w[1][1] - w[0][1]) / h)
        })
        .unzip()
}

/// Per-point tangents for a cubic strategy, or `None` in linear mode, which
/// has no tangents to compute.
pub fn tangents(samples: &[Point], interpolation: Interpolation) -> Option<Vec<f64>> {
    let strategy: fn(&[f64], &[f64]) -> Vec<f64> = match interpolation {
        Interpolation::None => return None,
        Interpolation::FritschCarlson => fritsch_carlson::tangents,
        Interpolation::Steffen => steffen::tangents,
        Interpolation::Akima => |_, ds| akima::tangents(ds),
    };
    let (hs, ds) = secants(samples);
    let ms = match ds.len() {
        0 => Vec::new(),
        1 => vec![ds[0], ds[0]],
        _ => strategy(&hs, &ds),
    };
    Some(ms)
}

/// Fits `samples` (strictly increasing x) and returns one segment per
/// neighbouring pair. Fewer than two samples yield no segments.
pub fn fit(samples: &[Point], interpolation: Interpolation) -> Vec<Segment> {
    if samples.len() < 2 {
        return Vec::new();
    }
    let Some(ms) = tangents(samples, interpolation) else {
        return samples[1..].iter().map(|&p| Segment::Line(p)).collect();
    };

    samples
        .windows(2)
        .zip(ms.windows(2))
        .map(|(p, m)| {
            let third = (p[1][0] - p[0][0]) / 3.0;
            Segment::Cubic(CubicCurvePoint {
                root: p[1],
                c1: [p[0][0] + third, p[0][1] + m[0] * third],
                c2: [p[1][0] - third, p[1][1] - m[1] * third],
            })
        })
        .collect()
}

/// Holds the segments of the most recently fitted sequence.
#[derive(Clone, Debug, Default)]
pub struct Interpolator {
    interpolation: Interpolation,
    segments: Vec<Segment>,
}

impl Interpolator {
    pub fn new(interpolation: Interpolation) -> Self {
        Self {
            interpolation,
            segments: Vec::new(),
        }
    }

    /// Fits `samples`, replacing whatever was fitted before.
    pub fn interpolate(&mut self, samples: &[Point]) -> &[Segment] {
        self.segments = fit(samples, self.interpolation);
        &self.segments
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn to_path(&self, start: Point) -> String {
        to_path(start, &self.segments)
    }
}
