use super::Aggregator;
use crate::audio::decode::StereoFrame;
use crate::error::{Error, Result};

/// Folds stereo frames into a visual mono level, the way a peak meter would.
///
/// Channels are summed before taking the absolute value, so content with
/// inverted polarity cancels out.
pub fn to_mono(frames: &[StereoFrame]) -> Vec<f64> {
    frames.iter().map(|[l, r]| (l + r).abs() / 2.0).collect()
}

impl Aggregator {
    pub fn aggregate(&self, frames: &[StereoFrame]) -> Result<f64> {
        if frames.is_empty() {
            return Err(Error::EmptyFrames);
        }
        let mono = to_mono(frames);
        let level = match *self {
            Aggregator::Max => mono.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Aggregator::Average => mean(&mono),
            Aggregator::RoundedAverage(digits) => {
                let scale = 10f64.powi(digits as i32);
                (mean(&mono) * scale).round() / scale
            }
            Aggregator::MeanSquare => mean_square(&mono),
            Aggregator::RootMeanSquare => mean_square(&mono).sqrt(),
        };
        Ok(level)
    }
}

fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

fn mean_square(samples: &[f64]) -> f64 {
    samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64
}
