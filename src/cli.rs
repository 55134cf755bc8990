use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "waveman", version, about = "Render audio files as SVG waveforms")]
pub struct Cli {
    /// Configuration file (defaults to ./waveman.toml or the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// One rounded box per block
    Box(BoxArgs),
    /// A single curve through all blocks
    Line(LineArgs),
    /// A curve swinging above and below a center axis
    Wave(WaveArgs),
    /// A closed shape mirrored about a center axis
    Sweep(SweepArgs),
    /// Print the block levels as JSON
    Blocks(BlocksArgs),
}

impl Command {
    pub fn input(&self) -> &InputArgs {
        match self {
            Command::Box(a) => &a.input,
            Command::Line(a) => &a.input,
            Command::Wave(a) => &a.input,
            Command::Sweep(a) => &a.input,
            Command::Blocks(a) => &a.input,
        }
    }

    pub fn transform(&self) -> &TransformArgs {
        match self {
            Command::Box(a) => &a.transform,
            Command::Line(a) => &a.transform,
            Command::Wave(a) => &a.transform,
            Command::Sweep(a) => &a.transform,
            Command::Blocks(a) => &a.transform,
        }
    }
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Audio files or directories
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Print output to stdout instead of writing files next to the inputs
    #[arg(long)]
    pub stdout: bool,
}

/// Options unset on the command line fall back to the config file, then to
/// built-in defaults.
#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Number of blocks to produce
    #[arg(short = 'n', long)]
    pub chunks: Option<usize>,

    /// Reduction per chunk: avg, rounded-avg, max, mean-square, rms
    #[arg(short, long)]
    pub aggregator: Option<String>,

    /// Decimal digits kept by rounded-avg
    #[arg(long)]
    pub rounding_digits: Option<u32>,

    /// Which part of each chunk is read: none, head, center, tail
    #[arg(long)]
    pub downsampling_mode: Option<String>,

    /// Read only 1/N of each chunk (1, 2, 4, ..., 128)
    #[arg(short = 'p', long)]
    pub downsampling_factor: Option<u32>,

    /// Keep raw levels instead of scaling them to [0, 1]
    #[arg(long)]
    pub no_normalize: bool,

    #[arg(long)]
    pub clamp_min: Option<f64>,

    #[arg(long)]
    pub clamp_max: Option<f64>,

    /// Window across the block sequence: rectangular, hann, tukey, planck-taper
    #[arg(short, long)]
    pub window: Option<String>,

    /// Taper parameter for tukey and planck-taper
    #[arg(long)]
    pub window_parameter: Option<f64>,
}

#[derive(Args, Debug)]
pub struct BoxArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub transform: TransformArgs,

    /// Box fill color
    #[arg(long)]
    pub color: Option<String>,

    /// Vertical alignment: top, center, bottom
    #[arg(long)]
    pub alignment: Option<String>,

    /// Canvas height, also the height of a full-scale box
    #[arg(long)]
    pub height: Option<f64>,

    /// Width of each box including the gap
    #[arg(long)]
    pub width: Option<f64>,

    #[arg(long)]
    pub gap: Option<f64>,

    /// Corner radius
    #[arg(long)]
    pub rounded: Option<f64>,
}

/// Options shared by the curve painters.
#[derive(Args, Debug)]
pub struct CurveArgs {
    /// Curve fitting: none, fritsch-carlson, steffen, akima
    #[arg(short, long)]
    pub interpolation: Option<String>,

    #[arg(long)]
    pub fill: Option<String>,

    #[arg(long)]
    pub stroke_color: Option<String>,

    #[arg(long)]
    pub stroke_width: Option<f64>,

    /// Horizontal distance between blocks
    #[arg(long)]
    pub spread: Option<f64>,

    /// Vertical scale, also the canvas height
    #[arg(long)]
    pub amplitude: Option<f64>,
}

#[derive(Args, Debug)]
pub struct LineArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub transform: TransformArgs,
    #[command(flatten)]
    pub curve: CurveArgs,

    /// Close the path
    #[arg(long)]
    pub closed: bool,

    /// Hang the curve from the top edge
    #[arg(long)]
    pub inverted: bool,
}

#[derive(Args, Debug)]
pub struct WaveArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub transform: TransformArgs,
    #[command(flatten)]
    pub curve: CurveArgs,
}

#[derive(Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub transform: TransformArgs,
    #[command(flatten)]
    pub curve: CurveArgs,
}

#[derive(Args, Debug)]
pub struct BlocksArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub transform: TransformArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_painter_and_shared_options() {
        let cli = Cli::try_parse_from([
            "waveman", "line", "-n", "32", "--aggregator", "max", "-i", "steffen", "--closed", "a.mp3", "b.mp3",
        ])
        .unwrap();
        let Command::Line(args) = &cli.command else {
            panic!("expected the line subcommand");
        };
        assert_eq!(args.transform.chunks, Some(32));
        assert_eq!(args.transform.aggregator.as_deref(), Some("max"));
        assert_eq!(args.curve.interpolation.as_deref(), Some("steffen"));
        assert!(args.closed);
        assert!(!args.inverted);
        assert_eq!(cli.command.input().inputs.len(), 2);
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["waveman", "blocks", "x.wav", "--config", "w.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("w.toml")));
        assert!(cli.command.transform().chunks.is_none());
    }

    #[test]
    fn inputs_are_required() {
        assert!(Cli::try_parse_from(["waveman", "box"]).is_err());
    }
}
