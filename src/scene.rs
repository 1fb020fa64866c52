//! The interface shared by every backdrop variant.

use std::fmt;
use std::str::FromStr;

use rand::RngCore;

use crate::circuit::CircuitBoard;
use crate::config::BackdropConfig;
use crate::error::ConfigError;
use crate::fractal::FractalMorph;
use crate::geometry::DVec2;
use crate::hologram::Hologram;
use crate::node_graph::NodeGraph;
use crate::surface::Surface;

/// Everything the driver samples before advancing a frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Frame timestamp in milliseconds, monotonic.
    pub now_ms: f64,
    /// Pointer in surface-local coordinates, once it has moved over the surface.
    pub pointer: Option<DVec2>,
}

impl FrameInput {
    pub fn at(now_ms: f64) -> Self {
        Self {
            now_ms,
            pointer: None,
        }
    }
}

/// A self-contained animated backdrop.
///
/// The driver calls [`Scene::frame`] and then [`Scene::render`] once per
/// display frame, in that order.
pub trait Scene {
    fn name(&self) -> &'static str;

    /// Discards the current state and rebuilds it for a new viewport.
    fn resize(&mut self, width: f64, height: f64, rng: &mut dyn RngCore);

    /// Advances the simulation by one frame.
    fn frame(&mut self, input: &FrameInput, rng: &mut dyn RngCore);

    fn render(&self, surface: &mut dyn Surface);

    /// A click anywhere on the page. Most variants ignore it.
    fn click(&mut self, _now_ms: f64) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    NodeGraph,
    Fractal,
    Hologram,
    Circuit,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::NodeGraph,
        Variant::Fractal,
        Variant::Hologram,
        Variant::Circuit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::NodeGraph => "node-graph",
            Variant::Fractal => "fractal",
            Variant::Hologram => "hologram",
            Variant::Circuit => "circuit",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "node-graph" | "network" | "system" => Ok(Variant::NodeGraph),
            "fractal" => Ok(Variant::Fractal),
            "hologram" | "holographic" => Ok(Variant::Hologram),
            "circuit" | "circuit-board" => Ok(Variant::Circuit),
            _ => Err(ConfigError::UnknownVariant(s.to_owned())),
        }
    }
}

/// Builds the scene for `variant` at the given viewport size.
///
/// The config is validated first; scene constructors assume in-range
/// probabilities and positive sizes.
pub fn build_scene(
    variant: Variant,
    config: &BackdropConfig,
    width: f64,
    height: f64,
    rng: &mut dyn RngCore,
) -> Result<Box<dyn Scene>, ConfigError> {
    config.validate()?;
    let scene: Box<dyn Scene> = match variant {
        Variant::NodeGraph => Box::new(NodeGraph::initialize(
            config.node_graph.clone(),
            width,
            height,
            rng,
        )),
        Variant::Fractal => Box::new(FractalMorph::new(config.fractal.clone(), width, height)),
        Variant::Hologram => Box::new(Hologram::new(config.hologram.clone(), width, height, rng)),
        Variant::Circuit => Box::new(CircuitBoard::new(config.circuit.clone(), width, height, rng)),
    };
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn variant_names_round_trip() {
        for variant in Variant::ALL {
            assert_eq!(variant.as_str().parse::<Variant>().unwrap(), variant);
        }
        assert_eq!(" Holographic ".parse::<Variant>().unwrap(), Variant::Hologram);
    }

    #[test]
    fn unknown_variant_is_an_error() {
        let err = "plasma".parse::<Variant>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownVariant(name) if name == "plasma"));
    }

    #[test]
    fn out_of_range_config_is_rejected_before_building() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(0);

        let mut config = BackdropConfig::default();
        config.hologram.glyph_probability = 1.5;
        let err = build_scene(Variant::Hologram, &config, 400.0, 300.0, &mut rng).err();
        assert!(matches!(err, Some(ConfigError::Invalid { field: "hologram.glyph_probability", .. })));

        let mut config = BackdropConfig::default();
        config.circuit.node_probability = -0.1;
        assert!(build_scene(Variant::Circuit, &config, 400.0, 300.0, &mut rng).is_err());
    }
}
