//! Circuit board: pulses travelling between points of a sparse lattice.

use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};

use crate::color::{Color, Rgb};
use crate::config::CircuitConfig;
use crate::geometry::{DVec2, Rect};
use crate::scene::{FrameInput, Scene};
use crate::schedule::Schedule;
use crate::surface::{Paint, Surface};

const TRACE_BLUE: Rgb = Rgb::new(66, 153, 225);
const HEAD_BLUE: Rgb = Rgb::new(147, 197, 253);
const BOARD: Rgb = Rgb::new(17, 24, 39);

#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    pub start: DVec2,
    pub end: DVec2,
    /// Fraction of the path drawn so far, in `[0, 1]`.
    pub progress: f64,
    pub color: Color,
    pub speed: f64,
    pub active: bool,
}

impl Circuit {
    /// The drawing head: `start` interpolated toward `end` by `progress`.
    pub fn head(&self) -> DVec2 {
        self.start.lerp(self.end, self.progress)
    }
}

#[derive(Debug, Clone)]
pub struct CircuitBoard {
    config: CircuitConfig,
    width: f64,
    height: f64,
    nodes: Vec<DVec2>,
    circuits: Vec<Circuit>,
    sparks: Vec<usize>,
    respawns: Schedule<usize>,
}

/// Lattice points strictly inside the viewport, each kept with
/// `node_probability`.
pub fn generate_nodes<R>(config: &CircuitConfig, width: f64, height: f64, rng: &mut R) -> Vec<DVec2>
where
    R: Rng + ?Sized,
{
    let spacing = config.grid_spacing;
    let mut nodes = Vec::new();
    let mut x = spacing;
    while x < width {
        let mut y = spacing;
        while y < height {
            if rng.random_bool(config.node_probability) {
                nodes.push(DVec2::new(x, y));
            }
            y += spacing;
        }
        x += spacing;
    }
    nodes
}

/// Starts a circuit from each node with `circuit_probability`, ending at a
/// random node.
pub fn generate_circuits<R>(config: &CircuitConfig, nodes: &[DVec2], rng: &mut R) -> Vec<Circuit>
where
    R: Rng + ?Sized,
{
    let mut circuits = Vec::new();
    for &start in nodes {
        if !rng.random_bool(config.circuit_probability) {
            continue;
        }
        let Some(&end) = nodes.choose(rng) else {
            continue;
        };
        circuits.push(Circuit {
            start,
            end,
            progress: 0.0,
            color: TRACE_BLUE.with_alpha(rng.random::<f64>() * 0.5 + 0.5),
            speed: rng.random::<f64>() * config.speed_span + config.speed_min,
            active: true,
        });
    }
    circuits
}

impl CircuitBoard {
    pub fn new(config: CircuitConfig, width: f64, height: f64, rng: &mut dyn RngCore) -> Self {
        let nodes = generate_nodes(&config, width, height, rng);
        let circuits = generate_circuits(&config, &nodes, rng);
        log::debug!("circuit board with {} nodes, {} circuits", nodes.len(), circuits.len());
        Self {
            config,
            width,
            height,
            nodes,
            circuits,
            sparks: Vec::new(),
            respawns: Schedule::new(),
        }
    }

    pub fn nodes(&self) -> &[DVec2] {
        &self.nodes
    }

    pub fn circuits(&self) -> &[Circuit] {
        &self.circuits
    }

    pub fn pending_respawns(&self) -> usize {
        self.respawns.len()
    }

    /// Restarts circuits whose respawn is due, then moves every active head
    /// forward. A head reaching the end deactivates its circuit and books a
    /// respawn after a random delay.
    pub fn step(&mut self, now_ms: f64, rng: &mut dyn RngCore) {
        for index in self.respawns.drain_due(now_ms) {
            let Some(circuit) = self.circuits.get_mut(index) else {
                continue;
            };
            circuit.progress = 0.0;
            circuit.active = true;
            if let Some(&end) = self.nodes.choose(rng) {
                circuit.end = end;
            }
        }

        for (index, circuit) in self.circuits.iter_mut().enumerate() {
            if !circuit.active {
                continue;
            }
            circuit.progress = (circuit.progress + circuit.speed).min(1.0);
            if circuit.progress >= 1.0 {
                circuit.active = false;
                let delay = self.config.respawn_min_ms + rng.random::<f64>() * self.config.respawn_span_ms;
                self.respawns.after(now_ms, delay, index);
            }
        }

        let chance = self.config.spark_probability;
        self.sparks = (0..self.nodes.len()).filter(|_| rng.random_bool(chance)).collect();
    }
}

impl Scene for CircuitBoard {
    fn name(&self) -> &'static str {
        "circuit"
    }

    fn resize(&mut self, width: f64, height: f64, rng: &mut dyn RngCore) {
        self.width = width;
        self.height = height;
        self.nodes = generate_nodes(&self.config, width, height, rng);
        self.circuits = generate_circuits(&self.config, &self.nodes, rng);
        self.sparks.clear();
        self.respawns.clear();
    }

    fn frame(&mut self, input: &FrameInput, rng: &mut dyn RngCore) {
        self.step(input.now_ms, rng);
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill_rect(
            Rect::viewport(self.width, self.height),
            BOARD.with_alpha(self.config.fade_alpha),
        );

        for circuit in self.circuits.iter().filter(|c| c.active) {
            let head = circuit.head();
            surface.stroke_line(circuit.start, head, &Paint::Solid(circuit.color), 2.0);
            surface.fill_circle(head, 3.0, HEAD_BLUE.with_alpha(0.8));
        }

        for node in &self.nodes {
            surface.fill_circle(*node, 2.0, TRACE_BLUE.with_alpha(0.5));
        }
        for &index in &self.sparks {
            if let Some(node) = self.nodes.get(index) {
                surface.fill_circle(*node, 4.0, HEAD_BLUE.with_alpha(0.8));
            }
        }
    }
}
