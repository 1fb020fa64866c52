//! The drawing surface every variant paints onto.
//!
//! In the browser this is a `CanvasRenderingContext2d`; on the host the
//! [`Recorder`] captures the calls so render passes can be inspected.

use crate::color::Color;
use crate::geometry::{DVec2, Rect};

/// How a stroke is coloured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Two-stop linear gradient running from `start` to `end`.
    Gradient {
        start: DVec2,
        end: DVec2,
        from: Color,
        to: Color,
    },
}

/// Immediate-mode 2-D drawing operations.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color);

    fn stroke_line(&mut self, from: DVec2, to: DVec2, paint: &Paint, width: f64);

    /// Strokes the closed outline through `points`.
    fn stroke_polygon(&mut self, points: &[DVec2], color: Color, width: f64);

    fn fill_text(&mut self, text: &str, at: DVec2, color: Color, font: &str);
}

/// One captured drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    FillCircle {
        center: DVec2,
        radius: f64,
        color: Color,
    },
    StrokeLine {
        from: DVec2,
        to: DVec2,
        paint: Paint,
        width: f64,
    },
    StrokePolygon {
        points: Vec<DVec2>,
        color: Color,
        width: f64,
    },
    FillText {
        text: String,
        at: DVec2,
        color: Color,
    },
}

/// Surface that records instead of drawing.
#[derive(Debug, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeLine { .. }))
    }

    pub fn polygons(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokePolygon { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for Recorder {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, paint: &Paint, width: f64) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            paint: *paint,
            width,
        });
    }

    fn stroke_polygon(&mut self, points: &[DVec2], color: Color, width: f64) {
        self.commands.push(DrawCommand::StrokePolygon {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn fill_text(&mut self, text: &str, at: DVec2, color: Color, _font: &str) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_owned(),
            at,
            color,
        });
    }
}
