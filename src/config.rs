//! Tunable constants for every backdrop variant.
//!
//! A [`BackdropConfig`] is built once per mount (usually from the JSON handed
//! over by the page) and passed down to the scene; nothing here is read from
//! the viewport at load time. Every field has a default so partial JSON such
//! as `{"node_graph": {"node_count": 80}}` is accepted.

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackdropConfig {
    /// `log` level filter name, e.g. `"info"` or `"debug"`.
    pub log_level: String,
    /// Fixed RNG seed; `None` seeds from the host's random source.
    pub seed: Option<u64>,
    pub node_graph: NodeGraphConfig,
    pub fractal: FractalConfig,
    pub hologram: HologramConfig,
    pub circuit: CircuitConfig,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            seed: None,
            node_graph: NodeGraphConfig::default(),
            fractal: FractalConfig::default(),
            hologram: HologramConfig::default(),
            circuit: CircuitConfig::default(),
        }
    }
}

impl BackdropConfig {
    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BackdropConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn level_filter(&self) -> Result<log::LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::invalid("log_level", format!("`{}` is not a log level", self.log_level)))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.level_filter()?;
        self.node_graph.validate()?;
        self.fractal.validate()?;
        self.hologram.validate()?;
        self.circuit.validate()
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must not be negative, got {value}")))
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must lie in [0, 1], got {value}")))
    }
}

/// Node-graph network constants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeGraphConfig {
    pub node_count: usize,
    /// Nodes closer than this are connected.
    pub connection_distance: f64,
    /// Pointer repulsion reach in pixels.
    pub pointer_radius: f64,
    pub pointer_force: f64,
    /// Advance of the global drift clock per frame.
    pub time_step: f64,
    pub drift_strength: f64,
    pub drift_frequency: f64,
    /// Fraction of speed kept after bouncing off a wall.
    pub wall_damping: f64,
    pub friction: f64,
    pub max_speed: f64,
    /// Initial velocity components are drawn from `±initial_speed / 2`.
    pub initial_speed: f64,
    pub radius_min: f64,
    pub radius_span: f64,
    pub hue_min: f64,
    pub hue_max: f64,
    /// Hue speeds are drawn from `±hue_speed / 2`.
    pub hue_speed: f64,
    pub fade_alpha: f64,
    pub node_alpha: f64,
    pub edge_alpha: f64,
}

impl Default for NodeGraphConfig {
    fn default() -> Self {
        Self {
            node_count: 50,
            connection_distance: 150.0,
            pointer_radius: 100.0,
            pointer_force: 0.2,
            time_step: 0.001,
            drift_strength: 0.005,
            drift_frequency: 0.005,
            wall_damping: 0.5,
            friction: 0.95,
            max_speed: 1.0,
            initial_speed: 0.2,
            radius_min: 1.0,
            radius_span: 1.5,
            hue_min: 20.0,
            hue_max: 80.0,
            hue_speed: 0.05,
            fade_alpha: 0.05,
            node_alpha: 0.3,
            edge_alpha: 0.15,
        }
    }
}

impl NodeGraphConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("node_graph.connection_distance", self.connection_distance)?;
        non_negative("node_graph.pointer_radius", self.pointer_radius)?;
        positive("node_graph.max_speed", self.max_speed)?;
        probability("node_graph.wall_damping", self.wall_damping)?;
        probability("node_graph.friction", self.friction)?;
        positive("node_graph.radius_min", self.radius_min)?;
        non_negative("node_graph.radius_span", self.radius_span)?;
        if self.hue_min >= self.hue_max {
            return Err(ConfigError::invalid(
                "node_graph.hue_min",
                format!("hue band [{}, {}] is empty", self.hue_min, self.hue_max),
            ));
        }
        probability("node_graph.fade_alpha", self.fade_alpha)?;
        probability("node_graph.node_alpha", self.node_alpha)?;
        probability("node_graph.edge_alpha", self.edge_alpha)
    }
}

/// Deepest fractal recursion accepted. A 12-point shape strokes
/// `outline_count(12, 6)` (about 270k) outlines per frame at this depth.
pub const MAX_FRACTAL_DEPTH: u32 = 6;

/// Fractal morph constants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FractalConfig {
    pub depth: u32,
    /// Morph progress added per frame.
    pub morph_speed: f64,
    /// Palette index advance per frame.
    pub color_speed: f64,
    /// Outer polygon size relative to the shorter viewport side.
    pub size_ratio: f64,
    pub fade_alpha: f64,
    /// CSS colours; only the RGB part is used.
    pub palette: Vec<String>,
}

impl Default for FractalConfig {
    fn default() -> Self {
        Self {
            depth: 5,
            morph_speed: 0.002,
            color_speed: 0.001,
            size_ratio: 0.4,
            fade_alpha: 0.1,
            palette: vec![
                "rgba(66, 153, 225, 0.8)".to_owned(),
                "rgba(72, 187, 120, 0.8)".to_owned(),
                "rgba(159, 122, 234, 0.8)".to_owned(),
            ],
        }
    }
}

impl FractalConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth > MAX_FRACTAL_DEPTH {
            return Err(ConfigError::invalid(
                "fractal.depth",
                format!("at most {MAX_FRACTAL_DEPTH} levels are drawn, got {}", self.depth),
            ));
        }
        positive("fractal.morph_speed", self.morph_speed)?;
        non_negative("fractal.color_speed", self.color_speed)?;
        positive("fractal.size_ratio", self.size_ratio)?;
        probability("fractal.fade_alpha", self.fade_alpha)?;
        if self.palette.is_empty() {
            return Err(ConfigError::invalid("fractal.palette", "needs at least one colour"));
        }
        Ok(())
    }
}

/// Character-grid hologram constants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HologramConfig {
    /// Cell size in pixels; grid dimensions are the viewport divided by this.
    pub cell_pitch: f64,
    pub refresh_ms: f64,
    pub flash_ms: f64,
    pub alert_interval_ms: f64,
    pub alert_capacity: usize,
    pub greeting_delay_ms: f64,
    pub glyph_probability: f64,
    pub opacity_reroll_probability: f64,
    pub flash_probability: f64,
    /// Unfreeze this long after a click. `None` keeps the grid frozen until
    /// the backdrop is remounted.
    pub freeze_release_ms: Option<f64>,
}

impl Default for HologramConfig {
    fn default() -> Self {
        Self {
            cell_pitch: 20.0,
            refresh_ms: 500.0,
            flash_ms: 200.0,
            alert_interval_ms: 8000.0,
            alert_capacity: 4,
            greeting_delay_ms: 1000.0,
            glyph_probability: 0.1,
            opacity_reroll_probability: 0.05,
            flash_probability: 0.01,
            freeze_release_ms: None,
        }
    }
}

impl HologramConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("hologram.cell_pitch", self.cell_pitch)?;
        positive("hologram.refresh_ms", self.refresh_ms)?;
        non_negative("hologram.flash_ms", self.flash_ms)?;
        positive("hologram.alert_interval_ms", self.alert_interval_ms)?;
        if self.alert_capacity == 0 {
            return Err(ConfigError::invalid("hologram.alert_capacity", "must be at least 1"));
        }
        non_negative("hologram.greeting_delay_ms", self.greeting_delay_ms)?;
        probability("hologram.glyph_probability", self.glyph_probability)?;
        probability("hologram.opacity_reroll_probability", self.opacity_reroll_probability)?;
        probability("hologram.flash_probability", self.flash_probability)?;
        if let Some(release) = self.freeze_release_ms {
            non_negative("hologram.freeze_release_ms", release)?;
        }
        Ok(())
    }

    /// Grid rows and columns for a viewport.
    pub fn grid_dimensions(&self, width: f64, height: f64) -> (usize, usize) {
        let rows = (height / self.cell_pitch).floor().max(0.0) as usize;
        let cols = (width / self.cell_pitch).floor().max(0.0) as usize;
        (rows, cols)
    }
}

/// Circuit-board constants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CircuitConfig {
    pub grid_spacing: f64,
    pub node_probability: f64,
    pub circuit_probability: f64,
    pub speed_min: f64,
    pub speed_span: f64,
    pub respawn_min_ms: f64,
    pub respawn_span_ms: f64,
    pub spark_probability: f64,
    pub fade_alpha: f64,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            grid_spacing: 50.0,
            node_probability: 0.3,
            circuit_probability: 0.3,
            speed_min: 0.01,
            speed_span: 0.02,
            respawn_min_ms: 1000.0,
            respawn_span_ms: 2000.0,
            spark_probability: 0.005,
            fade_alpha: 0.1,
        }
    }
}

impl CircuitConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("circuit.grid_spacing", self.grid_spacing)?;
        probability("circuit.node_probability", self.node_probability)?;
        probability("circuit.circuit_probability", self.circuit_probability)?;
        positive("circuit.speed_min", self.speed_min)?;
        non_negative("circuit.speed_span", self.speed_span)?;
        non_negative("circuit.respawn_min_ms", self.respawn_min_ms)?;
        non_negative("circuit.respawn_span_ms", self.respawn_span_ms)?;
        probability("circuit.spark_probability", self.spark_probability)?;
        probability("circuit.fade_alpha", self.fade_alpha)
    }
}
