use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::audio::decode::{self, PcmSource};
use crate::paint::boxes::{BoxOptions, BoxPainter};
use crate::paint::line::{LineOptions, LinePainter};
use crate::paint::sweep::{SweepOptions, SweepPainter};
use crate::paint::wave::{WaveOptions, WavePainter};
use crate::paint::Painter;
use crate::transform::{self, TransformConfig};

/// What to produce from a file's block sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum Render {
    Box(BoxOptions),
    Line(LineOptions),
    Wave(WaveOptions),
    Sweep(SweepOptions),
    /// The raw levels as JSON.
    Blocks,
}

impl Render {
    pub fn extension(&self) -> &'static str {
        match self {
            Render::Blocks => "json",
            _ => "svg",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Render::Box(_) => "box",
            Render::Line(_) => "line",
            Render::Wave(_) => "wave",
            Render::Sweep(_) => "sweep",
            Render::Blocks => "blocks",
        }
    }
}

#[derive(Debug, Serialize)]
struct BlocksOutput<'a> {
    source: &'a str,
    sample_rate: u32,
    duration: f64,
    blocks: &'a [f64],
}

/// Decodes `path` and renders it; returns the document to write.
pub fn process_file(path: &Path, config: &TransformConfig, render: &Render) -> Result<String> {
    let mut source = decode::decode_audio(path).with_context(|| format!("Failed to decode {}", path.display()))?;
    render_source(&path.display().to_string(), &mut source, config, render)
}

pub fn render_source(name: &str, source: &mut PcmSource, config: &TransformConfig, render: &Render) -> Result<String> {
    let blocks = transform::transform(config, source).with_context(|| format!("Failed to transform {}", name))?;

    let document = match render {
        Render::Box(options) => BoxPainter::new(blocks, options.clone()).render(),
        Render::Line(options) => LinePainter::new(blocks, options.clone()).render(),
        Render::Wave(options) => WavePainter::new(blocks, options.clone()).render(),
        Render::Sweep(options) => SweepPainter::new(blocks, options.clone()).render(),
        Render::Blocks => {
            let output = BlocksOutput {
                source: name,
                sample_rate: source.sample_rate(),
                duration: source.duration(),
                blocks: &blocks,
            };
            serde_json::to_string_pretty(&output)?
        }
    };
    Ok(document)
}
