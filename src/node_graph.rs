//! Node-graph network: drifting point masses joined by proximity edges.
//!
//! Each frame runs [`step`], then [`compute_connections`], then [`render`].
//! The stepper and the connection pass are pure: they take the previous
//! [`NetworkState`] and hand back the next one.

use rand::{Rng, RngCore};

use crate::color::{Color, Rgb};
use crate::config::NodeGraphConfig;
use crate::geometry::{DVec2, Rect};
use crate::scene::{FrameInput, Scene};
use crate::surface::{Paint, Surface};

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    /// Indices of every other node within the connection distance, ascending.
    pub connections: Vec<usize>,
    pub hue: f64,
    /// Signed; flips at the edges of the hue band.
    pub hue_speed: f64,
}

/// Everything needed to draw one frame of the network.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkState {
    pub width: f64,
    pub height: f64,
    /// Global drift clock.
    pub time: f64,
    pub nodes: Vec<Node>,
}

impl NetworkState {
    pub fn connection_count(&self) -> usize {
        self.nodes.iter().map(|n| n.connections.len()).sum()
    }
}

/// Scatters `config.node_count` nodes over the viewport.
pub fn initialize<R>(config: &NodeGraphConfig, width: f64, height: f64, rng: &mut R) -> NetworkState
where
    R: Rng + ?Sized,
{
    let nodes = (0..config.node_count)
        .map(|_| Node {
            position: DVec2::new(rng.random::<f64>() * width, rng.random::<f64>() * height),
            velocity: DVec2::new(
                (rng.random::<f64>() - 0.5) * config.initial_speed,
                (rng.random::<f64>() - 0.5) * config.initial_speed,
            ),
            radius: rng.random::<f64>() * config.radius_span + config.radius_min,
            connections: Vec::new(),
            hue: config.hue_min + rng.random::<f64>() * (config.hue_max - config.hue_min),
            hue_speed: (rng.random::<f64>() - 0.5) * config.hue_speed,
        })
        .collect();

    NetworkState {
        width,
        height,
        time: 0.0,
        nodes,
    }
}

/// Advances every node by one frame.
///
/// Per node, in order: organic drift, pointer repulsion, integration, wall
/// bounce, friction, speed clamp. Hue cycling happens last.
pub fn step(state: &NetworkState, config: &NodeGraphConfig, pointer: Option<DVec2>) -> NetworkState {
    let time = state.time + config.time_step;
    let (width, height) = (state.width, state.height);

    let nodes = state
        .nodes
        .iter()
        .map(|node| {
            let mut position = node.position;
            let mut velocity = node.velocity;

            velocity.x += (time + position.x * config.drift_frequency).sin() * config.drift_strength;
            velocity.y += (time + position.y * config.drift_frequency).cos() * config.drift_strength;

            if let Some(pointer) = pointer {
                let delta = pointer - position;
                let distance = delta.length();
                if distance > 0.0 && distance < config.pointer_radius {
                    let force = (config.pointer_radius - distance) / config.pointer_radius;
                    velocity -= delta / distance * force * config.pointer_force;
                }
            }

            position += velocity;

            if position.x < 0.0 {
                position.x = 0.0;
                velocity.x = velocity.x.abs() * config.wall_damping;
            }
            if position.x > width {
                position.x = width;
                velocity.x = -velocity.x.abs() * config.wall_damping;
            }
            if position.y < 0.0 {
                position.y = 0.0;
                velocity.y = velocity.y.abs() * config.wall_damping;
            }
            if position.y > height {
                position.y = height;
                velocity.y = -velocity.y.abs() * config.wall_damping;
            }

            velocity *= config.friction;
            let speed = velocity.length();
            if speed > config.max_speed {
                velocity = velocity / speed * config.max_speed;
            }

            let (hue, hue_speed) = cycle_hue(node.hue, node.hue_speed, config);

            Node {
                position,
                velocity,
                radius: node.radius,
                connections: node.connections.clone(),
                hue,
                hue_speed,
            }
        })
        .collect();

    NetworkState {
        width,
        height,
        time,
        nodes,
    }
}

fn cycle_hue(hue: f64, speed: f64, config: &NodeGraphConfig) -> (f64, f64) {
    let hue = hue + speed;
    if hue > config.hue_max {
        (config.hue_max, -speed.abs())
    } else if hue < config.hue_min {
        (config.hue_min, speed.abs())
    } else {
        (hue, speed)
    }
}

/// Rebuilds every node's connection list from scratch.
///
/// Checks all ordered pairs, so this is O(n²) per frame; node counts stay in
/// the tens.
pub fn compute_connections(mut state: NetworkState, distance: f64) -> NetworkState {
    let positions: Vec<DVec2> = state.nodes.iter().map(|n| n.position).collect();
    for (i, node) in state.nodes.iter_mut().enumerate() {
        let here = node.position;
        node.connections = positions
            .iter()
            .enumerate()
            .filter(|&(j, other)| j != i && here.distance(*other) < distance)
            .map(|(j, _)| j)
            .collect();
    }
    state
}

/// Fade overlay, then node dots, then one gradient line per connection.
pub fn render(state: &NetworkState, config: &NodeGraphConfig, surface: &mut dyn Surface) {
    surface.fill_rect(
        Rect::viewport(state.width, state.height),
        Rgb::BLACK.with_alpha(config.fade_alpha),
    );

    for node in &state.nodes {
        surface.fill_circle(node.position, node.radius, Color::hue(node.hue, config.node_alpha));
    }

    for node in &state.nodes {
        for &index in &node.connections {
            let Some(other) = state.nodes.get(index) else {
                continue;
            };
            let opacity = 1.0 - node.position.distance(other.position) / config.connection_distance;
            let alpha = opacity.max(0.0) * config.edge_alpha;
            let paint = Paint::Gradient {
                start: node.position,
                end: other.position,
                from: Color::hue(node.hue, alpha),
                to: Color::hue(other.hue, alpha),
            };
            surface.stroke_line(node.position, other.position, &paint, 1.0);
        }
    }
}

/// The network as a [`Scene`].
#[derive(Debug, Clone)]
pub struct NodeGraph {
    config: NodeGraphConfig,
    state: NetworkState,
}

impl NodeGraph {
    pub fn initialize<R>(config: NodeGraphConfig, width: f64, height: f64, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let state = initialize(&config, width, height, rng);
        log::debug!("node graph initialised with {} nodes at {width}x{height}", state.nodes.len());
        Self { config, state }
    }

    pub fn state(&self) -> &NetworkState {
        &self.state
    }

    /// One full simulation tick: step, then connections.
    pub fn advance(&mut self, pointer: Option<DVec2>) {
        let next = step(&self.state, &self.config, pointer);
        self.state = compute_connections(next, self.config.connection_distance);
    }
}

impl Scene for NodeGraph {
    fn name(&self) -> &'static str {
        "node-graph"
    }

    fn resize(&mut self, width: f64, height: f64, rng: &mut dyn RngCore) {
        self.state = initialize(&self.config, width, height, rng);
        log::debug!("node graph reset for {width}x{height}");
    }

    fn frame(&mut self, input: &FrameInput, _rng: &mut dyn RngCore) {
        self.advance(input.pointer);
    }

    fn render(&self, surface: &mut dyn Surface) {
        render(&self.state, &self.config, surface);
    }
}
