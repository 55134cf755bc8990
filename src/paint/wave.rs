use super::{curve_width, padded_viewbox, path_element, Painter, Stroke, DEFAULT_HEIGHT, DEFAULT_SPREAD};
use crate::curve::{Interpolation, Interpolator, Point};

#[derive(Clone, Debug, PartialEq)]
pub struct WaveOptions {
    pub interpolation: Interpolation,
    pub fill: String,
    pub stroke: Stroke,
    pub spread: f64,
    /// Peak-to-peak height of a full-scale block; also the canvas height.
    pub amplitude: f64,
}

impl Default for WaveOptions {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::default(),
            fill: "transparent".into(),
            stroke: Stroke {
                color: "black".into(),
                width: 2.0,
            },
            spread: DEFAULT_SPREAD,
            amplitude: DEFAULT_HEIGHT,
        }
    }
}

/// An oscillating curve: every block swings once above and once below the
/// horizontal axis.
pub struct WavePainter {
    data: Vec<f64>,
    options: WaveOptions,
}

impl WavePainter {
    pub fn new(data: Vec<f64>, options: WaveOptions) -> Self {
        Self { data, options }
    }

    fn axis(&self) -> f64 {
        0.5 * self.options.amplitude
    }

    pub fn samples(&self) -> Vec<Point> {
        let o = &self.options;
        let axis = self.axis();
        let half = 0.5 * o.amplitude;

        let mut samples = Vec::with_capacity(2 * self.data.len() + 2);
        samples.push([0.0, axis]);
        for (i, &level) in self.data.iter().enumerate() {
            let x = i as f64 * o.spread;
            samples.push([x + 1.25 * o.spread, axis - half * level]);
            samples.push([x + 1.75 * o.spread, axis + half * level]);
        }
        samples.push([self.width(), axis]);
        samples
    }
}

impl Painter for WavePainter {
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
        let path = interpolator.to_path(samples[0]);
        vec![path_element(&path, &self.options.fill, &self.options.stroke)]
    }

    fn viewbox(&self) -> String {
        padded_viewbox(self.width(), self.height(), self.options.stroke.width)
    }
}
