use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::color::Color;
use crate::geometry::{DVec2, Rect};
use crate::surface::{Paint, Surface};

/// [`Surface`] over a browser 2-D context.
pub struct Canvas2d {
    ctx: CanvasRenderingContext2d,
}

impl Canvas2d {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn apply_stroke(&self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_stroke_style_str(&color.to_css()),
            Paint::Gradient {
                start,
                end,
                from,
                to,
            } => {
                let gradient = self.ctx.create_linear_gradient(start.x, start.y, end.x, end.y);
                let stops = gradient
                    .add_color_stop(0.0, &from.to_css())
                    .and_then(|_| gradient.add_color_stop(1.0, &to.to_css()));
                if let Err(err) = stops {
                    warn_draw("gradient stop", &err);
                }
                self.ctx.set_stroke_style_canvas_gradient(&gradient);
            }
        }
    }
}

fn warn_draw(what: &str, err: &JsValue) {
    log::warn!("canvas {what} failed: {err:?}");
}

impl Surface for Canvas2d {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color) {
        self.ctx.begin_path();
        if let Err(err) = self.ctx.arc(center.x, center.y, radius, 0.0, TAU) {
            warn_draw("arc", &err);
            return;
        }
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, paint: &Paint, width: f64) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.apply_stroke(paint);
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }

    fn stroke_polygon(&mut self, points: &[DVec2], color: Color, width: f64) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for point in rest {
            self.ctx.line_to(point.x, point.y);
        }
        self.ctx.close_path();
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, at: DVec2, color: Color, font: &str) {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(&color.to_css());
        if let Err(err) = self.ctx.fill_text(text, at.x, at.y) {
            warn_draw("fill_text", &err);
        }
    }
}
