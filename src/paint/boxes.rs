use std::str::FromStr;

use super::{positive, Painter, DEFAULT_HEIGHT};
use crate::error::{Error, Result};

/// Vertical placement of boxes inside the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    Top,
    #[default]
    Center,
    Bottom,
}

impl FromStr for Alignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "top" => Ok(Alignment::Top),
            "center" => Ok(Alignment::Center),
            "bottom" => Ok(Alignment::Bottom),
            other => Err(Error::UnknownAlignment(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoxOptions {
    pub color: String,
    pub alignment: Alignment,
    /// Scale applied to every level; also the canvas height.
    pub height: f64,
    /// Width of each box's bounding cell, gap included.
    pub width: f64,
    pub gap: f64,
    /// Corner radius, used for both axes.
    pub rounded: f64,
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self {
            color: "black".into(),
            alignment: Alignment::default(),
            height: DEFAULT_HEIGHT,
            width: 20.0,
            gap: 5.0,
            rounded: 10.0,
        }
    }
}

impl BoxOptions {
    /// Rejects sizes that would give empty or negative rectangles.
    pub fn validate(self) -> Result<Self> {
        positive("box height", self.height)?;
        positive("box width", self.width)?;
        if !(self.gap >= 0.0 && self.gap < self.width) {
            return Err(Error::InvalidBoxGap {
                gap: self.gap,
                width: self.width,
            });
        }
        Ok(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One rounded rectangle per block.
pub struct BoxPainter {
    data: Vec<f64>,
    options: BoxOptions,
}

impl BoxPainter {
    pub fn new(data: Vec<f64>, options: BoxOptions) -> Self {
        Self { data, options }
    }

    pub fn rectangle(&self, index: usize, level: f64) -> Rectangle {
        let o = &self.options;
        let inner = o.width - o.gap;
        // Keep silent blocks visible as at least a square
        let height = if level * o.height < o.width {
            inner
        } else {
            level * o.height
        };
        let y = match o.alignment {
            Alignment::Top => 0.0,
            Alignment::Center => 0.5 * (o.height - height),
            Alignment::Bottom => o.height - height,
        };
        Rectangle {
            x: index as f64 * o.width + 0.5 * o.gap,
            y,
            width: inner,
            height,
        }
    }
}

impl Painter for BoxPainter {
    fn width(&self) -> f64 {
        self.options.width * self.data.len() as f64
    }

    fn height(&self) -> f64 {
        self.options.height
    }

    fn draw(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.data.len() + 2);
        out.push("<g>".to_string());
        for (i, &level) in self.data.iter().enumerate() {
            let r = self.rectangle(i, level);
            out.push(format!(
                r#"<rect width="{}" height="{}" x="{}" y="{}" rx="{}" ry="{}" fill="{}" />"#,
                r.width, r.height, r.x, r.y, self.options.rounded, self.options.rounded, self.options.color
            ));
        }
        out.push("</g>".to_string());
        out
    }

    fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.width(), self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painter(alignment: Alignment) -> BoxPainter {
        BoxPainter::new(
            vec![0.0, 0.5, 1.0],
            BoxOptions {
                alignment,
                ..BoxOptions::default()
            },
        )
    }

    #[test]
    fn one_rect_per_block() {
        let p = painter(Alignment::Center);
        let elements = p.draw();
        assert_eq!(elements.len(), 5);
        assert_eq!(elements.iter().filter(|e| e.starts_with("<rect")).count(), 3);
        assert_eq!(p.viewbox(), "0 0 60 200");
    }

    #[test]
    fn alignment_moves_boxes_vertically() {
        let top = painter(Alignment::Top).rectangle(1, 0.5);
        let center = painter(Alignment::Center).rectangle(1, 0.5);
        let bottom = painter(Alignment::Bottom).rectangle(1, 0.5);
        assert_eq!(top.y, 0.0);
        assert_eq!(center.y, 50.0);
        assert_eq!(bottom.y, 100.0);
        for r in [top, center, bottom] {
            assert_eq!(r.x, 22.5);
            assert_eq!(r.width, 15.0);
            assert_eq!(r.height, 100.0);
        }
    }

    #[test]
    fn silent_blocks_stay_visible() {
        let r = painter(Alignment::Bottom).rectangle(0, 0.0);
        assert_eq!(r.height, 15.0);
        assert_eq!(r.y, 185.0);
    }

    #[test]
    fn gap_must_leave_room_for_the_box() {
        assert!(BoxOptions::default().validate().is_ok());
        for gap in [20.0, 30.0, -1.0, f64::NAN] {
            let options = BoxOptions {
                gap,
                ..BoxOptions::default()
            };
            assert!(matches!(options.validate(), Err(Error::InvalidBoxGap { .. })));
        }
        let flat = BoxOptions {
            height: 0.0,
            ..BoxOptions::default()
        };
        assert!(matches!(flat.validate(), Err(Error::InvalidScale { .. })));
    }

    #[test]
    fn parses_alignment() {
        assert_eq!("bottom".parse::<Alignment>().unwrap(), Alignment::Bottom);
        assert!("left".parse::<Alignment>().is_err());
    }

    #[test]
    fn renders_document() {
        let svg = painter(Alignment::Top).render();
        assert!(svg.contains("<rect width=\"15\" height=\"200\" x=\"42.5\" y=\"0\""));
    }
}
