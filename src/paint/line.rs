use super::{curve_width, padded_viewbox, path_element, Painter, Stroke, DEFAULT_HEIGHT, DEFAULT_SPREAD};
use crate::curve::{Interpolation, Interpolator, Point};

#[derive(Clone, Debug, PartialEq)]
pub struct LineOptions {
    pub interpolation: Interpolation,
    pub fill: String,
    pub stroke: Stroke,
    /// Close the path back to its start.
    pub closed: bool,
    /// Horizontal distance between blocks.
    pub spread: f64,
    /// Vertical scale; also the canvas height.
    pub amplitude: f64,
    /// Grow downwards from the top edge instead of upwards from the bottom.
    pub inverted: bool,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::default(),
            fill: "rgba(0 0 0 / 0.5)".into(),
            stroke: Stroke {
                color: "none".into(),
                width: 0.0,
            },
            closed: false,
            spread: DEFAULT_SPREAD,
            amplitude: DEFAULT_HEIGHT,
            inverted: false,
        }
    }
}

/// A single curve through all blocks, anchored on the bottom edge.
pub struct LinePainter {
    data: Vec<f64>,
    options: LineOptions,
}

impl LinePainter {
    pub fn new(data: Vec<f64>, options: LineOptions) -> Self {
        Self { data, options }
    }

    /// Anchor, one point per block, anchor.
    pub fn samples(&self) -> Vec<Point> {
        let o = &self.options;
        let (direction, offset) = if o.inverted { (1.0, 0.0) } else { (-1.0, o.amplitude) };

        let mut samples = Vec::with_capacity(self.data.len() + 2);
        samples.push([0.0, offset]);
        for (i, &level) in self.data.iter().enumerate() {
            samples.push([(i + 1) as f64 * o.spread, offset + direction * o.amplitude * level]);
        }
        samples.push([self.width(), offset]);
        samples
    }
}

impl Painter for LinePainter {
    fn width(&self) -> f64 {
        curve_width(self.data.len(), self.options.spread)
    }

    fn height(&self) -> f64 {
        self.options.amplitude
    }

    fn draw(&self) -> Vec<String> {
        let samples = self.samples();
        let mut interpolator = Interpolator::new(self.options.interpolation);
        interpolator.interpolate(&samples);

        let mut path = interpolator.to_path(samples[0]);
        if self.options.closed {
            path.push('Z');
        }
        vec![path_element(&path, &self.options.fill, &self.options.stroke)]
    }

    fn viewbox(&self) -> String {
        padded_viewbox(self.width(), self.height(), self.options.stroke.width)
    }
}
