//! Fractal morph: a polygon that morphs through a cycle of keyframe shapes
//! while nested, rotated copies of itself are drawn at every vertex.

use std::f64::consts::{PI, TAU};

use rand::RngCore;

use crate::color::Rgb;
use crate::config::FractalConfig;
use crate::geometry::{lerp, rotate_points, DVec2, Rect};
use crate::scene::{FrameInput, Scene};
use crate::surface::Surface;

/// A named keyframe polygon, in a ±60 unit design space.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub name: &'static str,
    pub points: Vec<DVec2>,
}

impl Shape {
    pub fn new(name: &'static str, points: Vec<DVec2>) -> Self {
        Self { name, points }
    }

    /// Flattened hexagon.
    pub fn brain() -> Self {
        Self::new(
            "brain",
            vec![
                DVec2::new(-50.0, -30.0),
                DVec2::new(50.0, -30.0),
                DVec2::new(60.0, 0.0),
                DVec2::new(50.0, 30.0),
                DVec2::new(-50.0, 30.0),
                DVec2::new(-60.0, 0.0),
            ],
        )
    }

    /// Twelve points alternating between an outer and inner radius.
    pub fn gear() -> Self {
        let points = (0..12)
            .map(|i| {
                let angle = f64::from(i) * TAU / 12.0;
                let radius = if i % 2 == 0 { 60.0 } else { 40.0 };
                DVec2::from_angle(angle) * radius
            })
            .collect();
        Self::new("gear", points)
    }

    /// Square whose last vertex repeats the first.
    pub fn circuit() -> Self {
        Self::new(
            "circuit",
            vec![
                DVec2::new(-50.0, -50.0),
                DVec2::new(50.0, -50.0),
                DVec2::new(50.0, 50.0),
                DVec2::new(-50.0, 50.0),
                DVec2::new(-50.0, -50.0),
            ],
        )
    }

    /// The default morph cycle.
    pub fn cycle() -> Vec<Shape> {
        vec![Self::brain(), Self::gear(), Self::circuit()]
    }
}

/// Stretches or shrinks a point list to `target` entries by nearest-index
/// lookup (`floor(i * len / target)`).
pub fn resample(points: &[DVec2], target: usize) -> Vec<DVec2> {
    if points.len() == target {
        return points.to_vec();
    }
    if points.is_empty() {
        return vec![DVec2::ZERO; target];
    }
    (0..target).map(|i| points[i * points.len() / target]).collect()
}

/// Interpolates between two shapes after resampling both to the longer
/// point count.
pub fn morph(a: &Shape, b: &Shape, t: f64) -> Vec<DVec2> {
    let count = a.points.len().max(b.points.len());
    let from = resample(&a.points, count);
    let to = resample(&b.points, count);
    from.iter()
        .zip(&to)
        .map(|(p, q)| DVec2::new(lerp(p.x, q.x, t), lerp(p.y, q.y, t)))
        .collect()
}

/// Cross-fade between two palette entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBlend {
    pub from: Rgb,
    pub to: Rgb,
    pub progress: f64,
}

impl ColorBlend {
    pub fn rgb(&self) -> Rgb {
        self.from.lerp(self.to, self.progress)
    }
}

/// Draws `points` around `center` and recurses into every vertex.
///
/// Level `depth` is the outermost; each level below it is half the size,
/// rotated by `level * π/8`, thinner and more opaque. Nothing is drawn at
/// depth 0.
pub fn draw_fractal(
    surface: &mut dyn Surface,
    center: DVec2,
    size: f64,
    points: &[DVec2],
    blend: ColorBlend,
    depth: u32,
) {
    let rgb = blend.rgb();
    draw_level(surface, center, size, points, rgb, depth, depth);
}

fn draw_level(
    surface: &mut dyn Surface,
    center: DVec2,
    size: f64,
    points: &[DVec2],
    rgb: Rgb,
    level: u32,
    depth: u32,
) {
    if level == 0 {
        return;
    }

    let outline: Vec<DVec2> = points.iter().map(|p| center + *p * (size / 100.0)).collect();
    let alpha = (f64::from(depth + 1 - level) * 0.15).min(1.0);
    surface.stroke_polygon(&outline, rgb.with_alpha(alpha), f64::from(level));

    let child_points = rotate_points(points, f64::from(level) * PI / 8.0);
    for point in points {
        let child_center = center + *point * (size / 150.0);
        draw_level(surface, child_center, size * 0.5, &child_points, rgb, level - 1, depth);
    }
}

/// Number of outlines [`draw_fractal`] strokes for `vertices` and `depth`.
pub fn outline_count(vertices: usize, depth: u32) -> usize {
    (0..depth).map(|level| vertices.pow(level)).sum()
}

/// Morph state and the fractal renderer as a [`Scene`].
#[derive(Debug, Clone)]
pub struct FractalMorph {
    config: FractalConfig,
    palette: Vec<Rgb>,
    shapes: Vec<Shape>,
    current: usize,
    next: usize,
    morph_progress: f64,
    color_index: f64,
    width: f64,
    height: f64,
}

impl FractalMorph {
    pub fn new(config: FractalConfig, width: f64, height: f64) -> Self {
        Self::with_shapes(config, Shape::cycle(), width, height)
    }

    /// Morphs through `shapes` instead of the default cycle. An empty list
    /// falls back to the default.
    pub fn with_shapes(config: FractalConfig, shapes: Vec<Shape>, width: f64, height: f64) -> Self {
        let shapes = if shapes.is_empty() { Shape::cycle() } else { shapes };
        let mut palette: Vec<Rgb> = config.palette.iter().map(|c| Rgb::parse_css(c)).collect();
        if palette.is_empty() {
            palette.push(Rgb::BLACK);
        }
        let next = 1 % shapes.len();
        Self {
            config,
            palette,
            shapes,
            current: 0,
            next,
            morph_progress: 0.0,
            color_index: 0.0,
            width,
            height,
        }
    }

    pub fn current_shape(&self) -> &Shape {
        &self.shapes[self.current]
    }

    pub fn next_shape(&self) -> &Shape {
        &self.shapes[self.next]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn morph_progress(&self) -> f64 {
        self.morph_progress
    }

    /// Advances colour and morph progress. Returns `true` when the morph
    /// completed and the shape pair moved one step along the cycle.
    pub fn step(&mut self) -> bool {
        self.color_index = (self.color_index + self.config.color_speed) % self.palette.len() as f64;

        self.morph_progress += self.config.morph_speed;
        if self.morph_progress < 1.0 {
            return false;
        }
        self.morph_progress = 0.0;
        self.current = self.next;
        self.next = (self.next + 1) % self.shapes.len();
        log::debug!(
            "fractal morph now {} -> {}",
            self.current_shape().name,
            self.next_shape().name
        );
        true
    }

    pub fn color_blend(&self) -> ColorBlend {
        let len = self.palette.len();
        let base = self.color_index.floor() as usize % len;
        ColorBlend {
            from: self.palette[base],
            to: self.palette[(base + 1) % len],
            progress: self.color_index.fract(),
        }
    }

    pub fn morphed_points(&self) -> Vec<DVec2> {
        morph(self.current_shape(), self.next_shape(), self.morph_progress)
    }
}

impl Scene for FractalMorph {
    fn name(&self) -> &'static str {
        "fractal"
    }

    fn resize(&mut self, width: f64, height: f64, _rng: &mut dyn RngCore) {
        self.width = width;
        self.height = height;
        self.current = 0;
        self.next = 1 % self.shapes.len();
    }

    fn frame(&mut self, _input: &FrameInput, _rng: &mut dyn RngCore) {
        self.step();
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill_rect(
            Rect::viewport(self.width, self.height),
            Rgb::BLACK.with_alpha(self.config.fade_alpha),
        );
        let center = DVec2::new(self.width / 2.0, self.height / 2.0);
        let size = self.width.min(self.height) * self.config.size_ratio;
        draw_fractal(
            surface,
            center,
            size,
            &self.morphed_points(),
            self.color_blend(),
            self.config.depth,
        );
    }
}
