use serde::Deserialize;
use std::path::PathBuf;

use crate::paint::DEFAULT_HEIGHT;
use crate::transform::{DEFAULT_CHUNKS, DEFAULT_ROUNDING_DIGITS};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub transform: TransformSection,
    #[serde(default, rename = "box")]
    pub boxes: BoxSection,
    #[serde(default)]
    pub line: LineSection,
    #[serde(default)]
    pub wave: CurveSection,
    #[serde(default)]
    pub sweep: CurveSection,
}

#[derive(Debug, Deserialize)]
pub struct TransformSection {
    #[serde(default = "default_chunks")]
    pub chunks: usize,
    #[serde(default = "default_aggregator")]
    pub aggregator: String,
    #[serde(default = "default_rounding_digits")]
    pub rounding_digits: u32,
    #[serde(default = "default_precision")]
    pub precision: u32,
    #[serde(default = "default_downsampling")]
    pub downsampling: String,
    #[serde(default = "default_normalize")]
    pub normalize: bool,
    #[serde(default = "default_clamp_min")]
    pub clamp_min: f64,
    #[serde(default = "default_clamp_max")]
    pub clamp_max: f64,
    #[serde(default = "default_window")]
    pub window: String,
    #[serde(default = "default_window_parameter")]
    pub window_parameter: f64,
}

#[derive(Debug, Deserialize)]
pub struct BoxSection {
    #[serde(default = "default_box_color")]
    pub color: String,
    #[serde(default = "default_alignment")]
    pub alignment: String,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_box_width")]
    pub width: f64,
    #[serde(default = "default_box_gap")]
    pub gap: f64,
    #[serde(default = "default_box_rounded")]
    pub rounded: f64,
}

/// Settings shared by the curve painters. Unset keys keep the painter's own
/// default, which differs between line, wave and sweep.
#[derive(Debug, Default, Deserialize)]
pub struct CurveSection {
    pub interpolation: Option<String>,
    pub fill: Option<String>,
    pub stroke_color: Option<String>,
    pub stroke_width: Option<f64>,
    pub spread: Option<f64>,
    pub amplitude: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LineSection {
    #[serde(flatten)]
    pub curve: CurveSection,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub inverted: bool,
}

impl Default for TransformSection {
    fn default() -> Self {
        Self {
            chunks: default_chunks(),
            aggregator: default_aggregator(),
            rounding_digits: default_rounding_digits(),
            precision: default_precision(),
            downsampling: default_downsampling(),
            normalize: default_normalize(),
            clamp_min: default_clamp_min(),
            clamp_max: default_clamp_max(),
            window: default_window(),
            window_parameter: default_window_parameter(),
        }
    }
}

impl Default for BoxSection {
    fn default() -> Self {
        Self {
            color: default_box_color(),
            alignment: default_alignment(),
            height: default_height(),
            width: default_box_width(),
            gap: default_box_gap(),
            rounded: default_box_rounded(),
        }
    }
}

fn default_chunks() -> usize { DEFAULT_CHUNKS }
fn default_aggregator() -> String { "rms".into() }
fn default_rounding_digits() -> u32 { DEFAULT_ROUNDING_DIGITS }
fn default_precision() -> u32 { 1 }
fn default_downsampling() -> String { "center".into() }
fn default_normalize() -> bool { true }
fn default_clamp_min() -> f64 { 0.0 }
fn default_clamp_max() -> f64 { 1.0 }
fn default_window() -> String { "rectangular".into() }
fn default_window_parameter() -> f64 { 0.5 }
fn default_box_color() -> String { "black".into() }
fn default_alignment() -> String { "center".into() }
fn default_height() -> f64 { DEFAULT_HEIGHT }
fn default_box_width() -> f64 { 20.0 }
fn default_box_gap() -> f64 { 5.0 }
fn default_box_rounded() -> f64 { 10.0 }

pub fn load_config(path: &PathBuf) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(err) => {
            log::warn!("{}: {}", path.display(), err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.transform.chunks, 64);
        assert_eq!(config.transform.aggregator, "rms");
        assert_eq!(config.transform.downsampling, "center");
        assert!(config.transform.normalize);
        assert_eq!(config.boxes.alignment, "center");
        assert!(config.wave.interpolation.is_none());
        assert!(!config.line.closed);
    }

    #[test]
    fn sections_override_selected_keys() {
        let config: Config = toml::from_str(
            r#"
            [transform]
            chunks = 128
            window = "tukey"

            [box]
            gap = 2.5

            [line]
            interpolation = "steffen"
            closed = true

            [sweep]
            amplitude = 300.0
            "#,
        )
        .unwrap();
        assert_eq!(config.transform.chunks, 128);
        assert_eq!(config.transform.window, "tukey");
        assert_eq!(config.transform.aggregator, "rms");
        assert_eq!(config.boxes.gap, 2.5);
        assert_eq!(config.boxes.width, 20.0);
        assert_eq!(config.line.curve.interpolation.as_deref(), Some("steffen"));
        assert!(config.line.closed);
        assert_eq!(config.sweep.amplitude, Some(300.0));
    }

    #[test]
    fn load_config_reads_files() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[transform]\naggregator = \"max\"").unwrap();
        let config = load_config(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.transform.aggregator, "max");
    }

    #[test]
    fn invalid_files_are_ignored() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[transform]\nchunks = \"many\"").unwrap();
        assert!(load_config(&file.path().to_path_buf()).is_none());
        assert!(load_config(&PathBuf::from("/nonexistent/waveman.toml")).is_none());
    }
}
