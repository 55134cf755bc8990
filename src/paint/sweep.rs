use super::{curve_width, mirror, padded_viewbox, path_element, Painter, Stroke, DEFAULT_HEIGHT, DEFAULT_SPREAD};
use crate::curve::{CubicCurvePoint, Interpolation, Interpolator, Point, Segment, ZERO_SEGMENT};

#[derive(Clone, Debug, PartialEq)]
pub struct SweepOptions {
    pub interpolation: Interpolation,
    pub fill: String,
    pub stroke: Stroke,
    pub spread: f64,
    /// Full height of the shape; also the canvas height.
    pub amplitude: f64,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::default(),
            fill: "rgba(0 0 0 / 0.5)".into(),
            stroke: Stroke {
                color: "none".into(),
                width: 0.0,
            },
            spread: DEFAULT_SPREAD,
            amplitude: DEFAULT_HEIGHT,
        }
    }
}

/// A closed shape symmetric about the horizontal axis.
pub struct SweepPainter {
    data: Vec<f64>,
    options: SweepOptions,
}

impl SweepPainter {
    pub fn new(data: Vec<f64>, options: SweepOptions) -> Self {
        Self { data, options }
    }

    fn axis(&self) -> f64 {
        0.5 * self.options.amplitude
    }

    /// Upper half: anchor, one point per block, anchor.
    pub fn samples(&self) -> Vec<Point> {
        let o = &self.options;
        let axis = self.axis();

        let mut samples = Vec::with_capacity(self.data.len() + 2);
        samples.push([0.0, axis]);
        for (i, &level) in self.data.iter().enumerate() {
            samples.push([(i + 1) as f64 * o.spread, axis - 0.5 * o.amplitude * level]);
        }
        samples.push([self.width(), axis]);
        samples
    }
}

/// Walks `segments` backwards on the other side of `axis`. Segment `k` joins
/// `samples[k]` to `samples[k + 1]`, so its mirror ends at `samples[k]`.
fn mirror_backwards(samples: &[Point], segments: &[Segment], axis: f64) -> Vec<Segment> {
    segments
        .iter()
        .enumerate()
        .rev()
        .map(|(k, segment)| {
            let root = mirror(samples[k], axis);
            match segment {
                Segment::Line(_) => Segment::Line(root),
                Segment::Cubic(c) => Segment::Cubic(CubicCurvePoint {
                    root,
                    c1: mirror(c.c2, axis),
                    c2: mirror(c.c1, axis),
                }),
            }
        })
        .collect()
}

impl Painter for SweepPainter {
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
        path.push_str(ZERO_SEGMENT);
        for segment in mirror_backwards(&samples, interpolator.segments(), self.axis()) {
            segment.write_path(&mut path);
        }
        path.push('Z');
        vec![path_element(&path, &self.options.fill, &self.options.stroke)]
    }

    fn viewbox(&self) -> String {
        padded_viewbox(self.width(), self.height(), self.options.stroke.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve;

    fn lower_path(painter: &SweepPainter) -> String {
        let samples = painter.samples();
        let segments = curve::fit(&samples, painter.options.interpolation);
        let start = mirror(samples[samples.len() - 1], painter.axis());
        curve::to_path(start, &mirror_backwards(&samples, &segments, painter.axis()))
    }

    #[test]
    fn upper_half_stays_above_the_axis() {
        let p = SweepPainter::new(vec![1.0, 0.5], SweepOptions::default());
        assert_eq!(p.samples(), vec![[0.0, 100.0], [10.0, 0.0], [20.0, 50.0], [30.0, 100.0]]);
    }

    #[test]
    fn linear_mirror_retraces_points_backwards() {
        let p = SweepPainter::new(
            vec![1.0, 0.5],
            SweepOptions {
                interpolation: Interpolation::None,
                ..SweepOptions::default()
            },
        );
        assert_eq!(lower_path(&p), "M 30 100 L 20 150 L 10 200 L 0 100 ");
    }

    #[test]
    fn cubic_mirror_swaps_control_points() {
        let p = SweepPainter::new(vec![0.4, 0.8, 0.2], SweepOptions::default());
        let samples = p.samples();
        let upper = curve::fit(&samples, Interpolation::FritschCarlson);
        let lower = mirror_backwards(&samples, &upper, 100.0);
        assert_eq!(lower.len(), upper.len());

        let (Segment::Cubic(first_up), Segment::Cubic(last_down)) = (upper[0], lower[lower.len() - 1]) else {
            panic!("expected cubic segments");
        };
        assert_eq!(last_down.root, [0.0, 100.0]);
        assert_eq!(last_down.c1, mirror(first_up.c2, 100.0));
        assert_eq!(last_down.c2, mirror(first_up.c1, 100.0));
    }

    #[test]
    fn draws_a_closed_shape() {
        let p = SweepPainter::new(vec![0.4, 0.8, 0.2], SweepOptions::default());
        let elements = p.draw();
        assert_eq!(elements.len(), 1);
        let el = &elements[0];
        assert!(el.contains("d=\"M 0 100 C "));
        assert!(el.contains(ZERO_SEGMENT));
        assert!(el.contains("Z\""));
        assert_eq!(el.matches("C ").count(), 8);
    }

    #[test]
    fn viewbox_without_stroke_is_the_canvas() {
        let p = SweepPainter::new(vec![0.5; 4], SweepOptions::default());
        assert_eq!(p.viewbox(), "0 0 50 200");
    }
}
