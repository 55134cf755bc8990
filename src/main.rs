mod audio;
mod cli;
mod config;
mod curve;
mod error;
mod paint;
mod run;
mod transform;
mod visit;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::io::Write;

use cli::{BoxArgs, Cli, Command, CurveArgs, TransformArgs};
use config::{BoxSection, Config, CurveSection, TransformSection};
use curve::Interpolation;
use paint::boxes::{Alignment, BoxOptions};
use paint::line::LineOptions;
use paint::sweep::SweepOptions;
use paint::wave::WaveOptions;
use paint::{positive, Stroke};
use run::Render;
use transform::{Aggregator, Clamp, Downsampling, Precision, TransformConfig, Window};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    // Load config: explicit --config path, or auto-detect waveman.toml / global config
    let config_path = cli.config.clone().or_else(|| {
        let local = std::path::PathBuf::from("waveman.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(home) = dirs::home_dir() {
            let xdg = home.join(".config").join("waveman").join("config.toml");
            if xdg.exists() {
                return Some(xdg);
            }
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("waveman").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    });
    let cfg = match config_path {
        Some(ref path) => match config::load_config(path) {
            Some(cfg) => {
                log::info!("Loaded config from {}", path.display());
                cfg
            }
            None => {
                log::warn!("Failed to load config from {}", path.display());
                Config::default()
            }
        },
        None => Config::default(),
    };

    let transform = transform_config(cli.command.transform(), &cfg.transform).context("Invalid transform options")?;
    let render = render_for(&cli.command, &cfg).context("Invalid painter options")?;

    // 1. Expand inputs
    let input = cli.command.input();
    let expansion = visit::expand(&input.inputs, input.recursive, render.extension());
    for err in &expansion.errors {
        log::error!("{:#}", err);
    }
    if expansion.jobs.is_empty() {
        anyhow::bail!("No input files to process");
    }

    log::info!(
        "Rendering {} file(s) as {} ({} blocks)",
        expansion.jobs.len(),
        render.name(),
        transform.chunks
    );

    // 2. Process files in parallel, keeping input order for the results
    let pb = ProgressBar::new(expansion.jobs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files ({eta} remaining)")
            .context("Invalid progress bar template")?
            .progress_chars("=>-"),
    );

    let results: Vec<Result<String>> = expansion
        .jobs
        .par_iter()
        .map(|job| {
            let result = run::process_file(&job.input, &transform, &render);
            pb.inc(1);
            result
        })
        .collect();
    pb.finish_and_clear();

    // 3. Write outputs
    let mut failed = expansion.errors.len();
    let stdout = std::io::stdout();
    for (job, result) in expansion.jobs.iter().zip(results) {
        let written = result.and_then(|document| {
            if input.stdout {
                let mut out = stdout.lock();
                out.write_all(document.as_bytes()).context("Failed to write to stdout")?;
                out.flush().context("Failed to write to stdout")?;
            } else {
                std::fs::write(&job.output, document)
                    .with_context(|| format!("Failed to write {}", job.output.display()))?;
                log::info!("{} -> {}", job.input.display(), job.output.display());
            }
            Ok(())
        });
        if let Err(err) = written {
            log::error!("{}: {:#}", job.input.display(), err);
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{} input(s) failed", failed);
    }
    log::info!("Done!");
    Ok(())
}

/// Command-line values win over the config file, which already carries the
/// built-in defaults for anything it leaves out.
fn transform_config(args: &TransformArgs, cfg: &TransformSection) -> Result<TransformConfig> {
    let digits = args.rounding_digits.unwrap_or(cfg.rounding_digits);
    let aggregator = Aggregator::parse(args.aggregator.as_deref().unwrap_or(&cfg.aggregator), digits)?;
    let precision = Precision::new(args.downsampling_factor.unwrap_or(cfg.precision))?;
    let downsampling: Downsampling = args
        .downsampling_mode
        .as_deref()
        .unwrap_or(&cfg.downsampling)
        .parse()?;
    let clamp = Clamp::new(
        args.clamp_min.unwrap_or(cfg.clamp_min),
        args.clamp_max.unwrap_or(cfg.clamp_max),
    )?;
    let window = Window::parse(
        args.window.as_deref().unwrap_or(&cfg.window),
        args.window_parameter.unwrap_or(cfg.window_parameter),
    )?;

    let config = TransformConfig {
        chunks: args.chunks.unwrap_or(cfg.chunks),
        aggregator,
        precision,
        downsampling,
        normalize: cfg.normalize && !args.no_normalize,
        clamp,
        window,
    };
    config.validate()?;
    Ok(config)
}

fn render_for(command: &Command, cfg: &Config) -> Result<Render> {
    let render = match command {
        Command::Box(args) => Render::Box(box_options(args, &cfg.boxes)?),
        Command::Line(args) => {
            let d = LineOptions::default();
            let style = merge_curve(&args.curve, &cfg.line.curve, CurveStyle::new(d.interpolation, d.fill, d.stroke, d.spread, d.amplitude))?;
            Render::Line(LineOptions {
                interpolation: style.interpolation,
                fill: style.fill,
                stroke: style.stroke,
                spread: style.spread,
                amplitude: style.amplitude,
                closed: args.closed || cfg.line.closed,
                inverted: args.inverted || cfg.line.inverted,
            })
        }
        Command::Wave(args) => {
            let d = WaveOptions::default();
            let style = merge_curve(&args.curve, &cfg.wave, CurveStyle::new(d.interpolation, d.fill, d.stroke, d.spread, d.amplitude))?;
            Render::Wave(WaveOptions {
                interpolation: style.interpolation,
                fill: style.fill,
                stroke: style.stroke,
                spread: style.spread,
                amplitude: style.amplitude,
            })
        }
        Command::Sweep(args) => {
            let d = SweepOptions::default();
            let style = merge_curve(&args.curve, &cfg.sweep, CurveStyle::new(d.interpolation, d.fill, d.stroke, d.spread, d.amplitude))?;
            Render::Sweep(SweepOptions {
                interpolation: style.interpolation,
                fill: style.fill,
                stroke: style.stroke,
                spread: style.spread,
                amplitude: style.amplitude,
            })
        }
        Command::Blocks(_) => Render::Blocks,
    };
    Ok(render)
}

fn box_options(args: &BoxArgs, cfg: &BoxSection) -> Result<BoxOptions> {
    let alignment: Alignment = args.alignment.as_deref().unwrap_or(&cfg.alignment).parse()?;
    let options = BoxOptions {
        color: args.color.clone().unwrap_or_else(|| cfg.color.clone()),
        alignment,
        height: args.height.unwrap_or(cfg.height),
        width: args.width.unwrap_or(cfg.width),
        gap: args.gap.unwrap_or(cfg.gap),
        rounded: args.rounded.unwrap_or(cfg.rounded),
    };
    Ok(options.validate()?)
}

/// The options line, wave and sweep have in common.
#[derive(Debug, PartialEq)]
struct CurveStyle {
    interpolation: Interpolation,
    fill: String,
    stroke: Stroke,
    spread: f64,
    amplitude: f64,
}

impl CurveStyle {
    fn new(interpolation: Interpolation, fill: String, stroke: Stroke, spread: f64, amplitude: f64) -> Self {
        Self {
            interpolation,
            fill,
            stroke,
            spread,
            amplitude,
        }
    }
}

fn merge_curve(args: &CurveArgs, cfg: &CurveSection, defaults: CurveStyle) -> Result<CurveStyle> {
    let interpolation = match args.interpolation.as_ref().or(cfg.interpolation.as_ref()) {
        Some(name) => name.parse::<Interpolation>()?,
        None => defaults.interpolation,
    };
    let pick_string = |arg: &Option<String>, section: &Option<String>, default: String| {
        arg.clone().or_else(|| section.clone()).unwrap_or(default)
    };
    let pick = |arg: Option<f64>, section: Option<f64>, default: f64| arg.or(section).unwrap_or(default);

    Ok(CurveStyle {
        interpolation,
        fill: pick_string(&args.fill, &cfg.fill, defaults.fill),
        stroke: Stroke {
            color: pick_string(&args.stroke_color, &cfg.stroke_color, defaults.stroke.color),
            width: pick(args.stroke_width, cfg.stroke_width, defaults.stroke.width),
        },
        spread: positive("spread", pick(args.spread, cfg.spread, defaults.spread))?,
        amplitude: positive("amplitude", pick(args.amplitude, cfg.amplitude, defaults.amplitude))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn config(toml: &str) -> Config {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn defaults_without_flags_or_config() {
        let cli = parse(&["waveman", "blocks", "a.mp3"]);
        let t = transform_config(cli.command.transform(), &TransformSection::default()).unwrap();
        assert_eq!(t, TransformConfig::default());
    }

    #[test]
    fn flags_override_config_which_overrides_defaults() {
        let cfg = config("[transform]\nchunks = 16\naggregator = \"max\"\nwindow = \"hann\"\n");
        let cli = parse(&["waveman", "blocks", "-n", "8", "a.mp3"]);
        let t = transform_config(cli.command.transform(), &cfg.transform).unwrap();
        assert_eq!(t.chunks, 8);
        assert_eq!(t.aggregator, Aggregator::Max);
        assert_eq!(t.window, Window::Hann);
        assert_eq!(t.downsampling, Downsampling::Center);
    }

    #[test]
    fn rounding_digits_reach_the_aggregator() {
        let cli = parse(&["waveman", "blocks", "--aggregator", "rounded-avg", "--rounding-digits", "1", "a.mp3"]);
        let t = transform_config(cli.command.transform(), &TransformSection::default()).unwrap();
        assert_eq!(t.aggregator, Aggregator::RoundedAverage(1));
    }

    #[test]
    fn invalid_transform_options_are_rejected() {
        for args in [
            vec!["waveman", "blocks", "-n", "0", "a.mp3"],
            vec!["waveman", "blocks", "-p", "3", "a.mp3"],
            vec!["waveman", "blocks", "--clamp-min", "0.8", "--clamp-max", "0.2", "a.mp3"],
            vec!["waveman", "blocks", "--window", "blackman", "a.mp3"],
        ] {
            let cli = parse(&args);
            assert!(transform_config(cli.command.transform(), &TransformSection::default()).is_err());
        }
    }

    #[test]
    fn no_normalize_wins_over_config() {
        let cli = parse(&["waveman", "blocks", "--no-normalize", "a.mp3"]);
        let t = transform_config(cli.command.transform(), &TransformSection::default()).unwrap();
        assert!(!t.normalize);
    }

    #[test]
    fn curve_painters_keep_their_own_defaults() {
        let cfg = Config::default();
        let Render::Wave(wave) = render_for(&parse(&["waveman", "wave", "a.mp3"]).command, &cfg).unwrap() else {
            panic!("expected a wave render");
        };
        assert_eq!(wave, WaveOptions::default());

        let Render::Line(line) =
            render_for(&parse(&["waveman", "line", "--stroke-width", "3", "a.mp3"]).command, &cfg).unwrap()
        else {
            panic!("expected a line render");
        };
        assert_eq!(line.stroke.width, 3.0);
        assert_eq!(line.fill, LineOptions::default().fill);
    }

    #[test]
    fn painter_sections_apply() {
        let cfg = config("[sweep]\ninterpolation = \"akima\"\nspread = 4.0\n\n[box]\nalignment = \"bottom\"\n");
        let Render::Sweep(sweep) = render_for(&parse(&["waveman", "sweep", "a.mp3"]).command, &cfg).unwrap() else {
            panic!("expected a sweep render");
        };
        assert_eq!(sweep.interpolation, Interpolation::Akima);
        assert_eq!(sweep.spread, 4.0);

        let Render::Box(boxes) = render_for(&parse(&["waveman", "box", "a.mp3"]).command, &cfg).unwrap() else {
            panic!("expected a box render");
        };
        assert_eq!(boxes.alignment, Alignment::Bottom);
    }

    #[test]
    fn unknown_painter_values_are_rejected() {
        let cfg = Config::default();
        assert!(render_for(&parse(&["waveman", "line", "-i", "cubic", "a.mp3"]).command, &cfg).is_err());
        assert!(render_for(&parse(&["waveman", "box", "--alignment", "left", "a.mp3"]).command, &cfg).is_err());
    }

    #[test]
    fn zero_or_negative_curve_scales_are_rejected() {
        let cfg = Config::default();
        for painter in ["line", "wave", "sweep"] {
            for args in [
                vec!["waveman", painter, "--spread", "0", "a.mp3"],
                vec!["waveman", painter, "--amplitude", "0", "a.mp3"],
                vec!["waveman", painter, "--amplitude=-5", "a.mp3"],
            ] {
                assert!(render_for(&parse(&args).command, &cfg).is_err(), "{:?} was accepted", args);
            }
        }
        let from_file = config("[wave]\nspread = 0.0\n");
        assert!(render_for(&parse(&["waveman", "wave", "a.mp3"]).command, &from_file).is_err());
    }

    #[test]
    fn box_gap_wider_than_the_box_is_rejected() {
        let cfg = Config::default();
        assert!(render_for(&parse(&["waveman", "box", "--gap", "30", "a.mp3"]).command, &cfg).is_err());
        assert!(render_for(&parse(&["waveman", "box", "--width", "0", "a.mp3"]).command, &cfg).is_err());
        let Render::Box(boxes) =
            render_for(&parse(&["waveman", "box", "--gap", "0", "a.mp3"]).command, &cfg).unwrap()
        else {
            panic!("expected a box render");
        };
        assert_eq!(boxes.gap, 0.0);
    }
}
