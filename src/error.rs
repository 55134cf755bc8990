use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("chunk count must be strictly positive, got {0}")]
    InvalidChunks(usize),

    #[error("precision {0} is not supported, expected one of 1, 2, 4, 8, 16, 32, 64, 128")]
    UnsupportedPrecision(u32),

    #[error("aggregator '{0}' is not supported, expected one of avg, rounded-avg, max, mean-square, rms")]
    UnknownAggregator(String),

    #[error("downsampling mode '{0}' is not supported, expected one of none, head, center, tail")]
    UnknownDownsampling(String),

    #[error("window '{0}' is not supported, expected one of rectangular, hann, tukey, planck-taper")]
    UnknownWindow(String),

    #[error("interpolation '{0}' is not supported, expected one of none, fritsch-carlson, steffen, akima")]
    UnknownInterpolation(String),

    #[error("alignment '{0}' is not supported, expected one of top, center, bottom")]
    UnknownAlignment(String),

    #[error("clamp bounds are inverted: min {min} > max {max}")]
    InvalidClamp { min: f64, max: f64 },

    #[error("{name} must be a positive finite number, got {value}")]
    InvalidScale { name: &'static str, value: f64 },

    #[error("box gap {gap} must be at least 0 and smaller than the box width {width}")]
    InvalidBoxGap { gap: f64, width: f64 },

    #[error("chunk {index} contains no frames to aggregate")]
    EmptyChunk { index: usize },

    #[error("cannot aggregate an empty frame set")]
    EmptyFrames,

    #[error("decode: {0}")]
    Decode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<symphonia::core::errors::Error> for Error {
    fn from(err: symphonia::core::errors::Error) -> Self {
        match err {
            symphonia::core::errors::Error::IoError(e) => Error::Io(e),
            other => Error::Decode(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
