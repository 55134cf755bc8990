//! Audio-to-blocks transformation.
//!
//! A source is split into `chunks` equal byte windows. Each window is sampled
//! (see [`sampler`]), reduced to one level (see [`aggregate`]) and the resulting
//! sequence is normalized, clamped and windowed (see [`postprocess`]).

pub mod aggregate;
pub mod postprocess;
pub mod sampler;

use std::fmt;
use std::str::FromStr;

use crate::audio::decode::FrameSource;
use crate::error::{Error, Result};

use sampler::ChunkSampler;

pub const DEFAULT_CHUNKS: usize = 64;
pub const DEFAULT_ROUNDING_DIGITS: u32 = 3;

/// Inverse subsampling ratio: only `1/ratio` of every chunk is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Precision(u32);

impl Precision {
    pub const FULL: Precision = Precision(1);
    pub const SUPPORTED: [u32; 8] = [1, 2, 4, 8, 16, 32, 64, 128];

    pub fn new(ratio: u32) -> Result<Self> {
        if Self::SUPPORTED.contains(&ratio) {
            Ok(Precision(ratio))
        } else {
            Err(Error::UnsupportedPrecision(ratio))
        }
    }

    pub fn ratio(self) -> u32 {
        self.0
    }
}

impl Default for Precision {
    fn default() -> Self {
        Precision::FULL
    }
}

/// Where inside a chunk the sub-window is read from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Downsampling {
    /// Sequential reads from the current cursor, no seeking.
    None,
    Head,
    #[default]
    Center,
    Tail,
}

impl FromStr for Downsampling {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Downsampling::None),
            "head" => Ok(Downsampling::Head),
            "center" => Ok(Downsampling::Center),
            "tail" => Ok(Downsampling::Tail),
            other => Err(Error::UnknownDownsampling(other.to_string())),
        }
    }
}

impl fmt::Display for Downsampling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Downsampling::None => "none",
            Downsampling::Head => "head",
            Downsampling::Center => "center",
            Downsampling::Tail => "tail",
        };
        f.write_str(name)
    }
}

/// Reduction of a chunk's mono signal to a single level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Aggregator {
    Average,
    /// Mean rounded to the given number of decimal digits.
    RoundedAverage(u32),
    Max,
    MeanSquare,
    #[default]
    RootMeanSquare,
}

impl Aggregator {
    /// Parses an aggregator name; `digits` only matters for `rounded-avg`.
    pub fn parse(name: &str, digits: u32) -> Result<Self> {
        match name {
            "avg" | "average" => Ok(Aggregator::Average),
            "rounded-avg" | "rounded-average" => Ok(Aggregator::RoundedAverage(digits)),
            "max" => Ok(Aggregator::Max),
            "mean-square" => Ok(Aggregator::MeanSquare),
            "rms" | "root-mean-square" => Ok(Aggregator::RootMeanSquare),
            other => Err(Error::UnknownAggregator(other.to_string())),
        }
    }
}

impl FromStr for Aggregator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Aggregator::parse(s, DEFAULT_ROUNDING_DIGITS)
    }
}

/// Window applied across the whole block sequence.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Window {
    #[default]
    Rectangular,
    Hann,
    /// Taper ratio alpha, clamped to [0, 1].
    Tukey(f64),
    /// Taper width epsilon, clamped to [0, 0.5].
    PlanckTaper(f64),
}

impl Window {
    /// Parses a window name; `parameter` is ignored by rectangular and Hann.
    pub fn parse(name: &str, parameter: f64) -> Result<Self> {
        match name {
            "rectangular" | "none" => Ok(Window::Rectangular),
            "hann" => Ok(Window::Hann),
            "tukey" => Ok(Window::Tukey(parameter)),
            "planck-taper" => Ok(Window::PlanckTaper(parameter)),
            other => Err(Error::UnknownWindow(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clamp {
    pub min: f64,
    pub max: f64,
}

impl Clamp {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if min > max || min.is_nan() || max.is_nan() {
            return Err(Error::InvalidClamp { min, max });
        }
        Ok(Self { min, max })
    }
}

impl Default for Clamp {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

/// Immutable settings for one transformation run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformConfig {
    pub chunks: usize,
    pub aggregator: Aggregator,
    pub precision: Precision,
    pub downsampling: Downsampling,
    pub normalize: bool,
    pub clamp: Clamp,
    pub window: Window,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            chunks: DEFAULT_CHUNKS,
            aggregator: Aggregator::default(),
            precision: Precision::default(),
            downsampling: Downsampling::default(),
            normalize: true,
            clamp: Clamp::default(),
            window: Window::default(),
        }
    }
}

impl TransformConfig {
    pub fn validate(&self) -> Result<()> {
        if self.chunks == 0 {
            return Err(Error::InvalidChunks(self.chunks));
        }
        Clamp::new(self.clamp.min, self.clamp.max)?;
        Ok(())
    }
}

/// Reduces `source` to exactly `config.chunks` post-processed levels.
pub fn transform<S: FrameSource>(config: &TransformConfig, source: &mut S) -> Result<Vec<f64>> {
    config.validate()?;

    let mut sampler = ChunkSampler::new(source, config.chunks, config.precision, config.downsampling);
    log::debug!(
        "Sampling {} chunks of {} bytes, {} frames each ({})",
        config.chunks,
        sampler.chunk_size(),
        sampler.sub_window(),
        config.downsampling
    );

    let mut blocks = Vec::with_capacity(config.chunks);
    for index in 0..config.chunks {
        let frames = sampler.sample(index)?;
        if frames.is_empty() {
            return Err(Error::EmptyChunk { index });
        }
        blocks.push(config.aggregator.aggregate(frames)?);
    }

    postprocess::apply(&mut blocks, config);
    Ok(blocks)
}
