//! SVG painters for block sequences.
//!
//! Every painter expects levels in [0, 1] and scales them by its own height or
//! amplitude, so the canvas size does not depend on the audio.

pub mod boxes;
pub mod line;
pub mod svg;
pub mod sweep;
pub mod wave;

use crate::curve::Point;
use crate::error::{Error, Result};

pub const DEFAULT_HEIGHT: f64 = 200.0;
pub const DEFAULT_SPREAD: f64 = 10.0;

/// Checks a painter dimension such as a spread, amplitude or box size.
/// Must be finite and greater than zero.
pub fn positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidScale { name, value })
    }
}

pub trait Painter {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    /// SVG elements making up the drawing.
    fn draw(&self) -> Vec<String>;
    fn viewbox(&self) -> String;

    fn render(&self) -> String {
        svg::document(&self.draw(), true, &self.viewbox())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Any CSS color.
    pub color: String,
    pub width: f64,
}

/// Horizontal extent of a curve with one point per block plus a start and an
/// end point on the axis.
pub(crate) fn curve_width(blocks: usize, spread: f64) -> f64 {
    (blocks.max(1) - 1) as f64 * spread + 2.0 * spread
}

pub(crate) fn path_element(path: &str, fill: &str, stroke: &Stroke) -> String {
    format!(
        r#"<g style="transform-origin: center center;"><path d="{}" fill="{}" stroke="{}" stroke-width="{}" /></g>"#,
        path.trim_end(),
        fill,
        stroke.color,
        stroke.width
    )
}

/// Viewbox padded by the stroke width so the outline is not clipped.
pub(crate) fn padded_viewbox(width: f64, height: f64, stroke: f64) -> String {
    let origin = 0.0 - stroke;
    format!(
        "{} {} {} {}",
        origin,
        origin,
        width + 2.0 * stroke,
        height + 2.0 * stroke
    )
}

pub(crate) fn mirror(p: Point, axis: f64) -> Point {
    [p[0], 2.0 * axis - p[1]]
}
