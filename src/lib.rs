#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Animated page backdrops drawn on a 2-D canvas: a drifting node network,
//! a morphing fractal, a glyph-grid hologram and a circuit board.
//!
//! The simulations are plain Rust and run anywhere; only the `wasm` module
//! touches the browser.

pub mod circuit;
pub mod color;
pub mod config;
pub mod error;
pub mod fractal;
pub mod geometry;
pub mod hologram;
pub mod node_graph;
pub mod scene;
pub mod schedule;
pub mod surface;

pub use config::BackdropConfig;
pub use error::ConfigError;
pub use geometry::DVec2;
pub use scene::{build_scene, FrameInput, Scene, Variant};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::{BackdropConfig, Variant};

    mod canvas;
    mod render;

    pub use render::Backdrop;

    const AUTO_CANVAS_ID: &str = "c";

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Trace).ok();
        // Mounts narrow this to the configured level.
        log::set_max_level(log::LevelFilter::Info);

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let Some(element) = document.get_element_by_id(AUTO_CANVAS_ID) else {
            return Ok(());
        };
        let canvas = element.dyn_into::<web_sys::HtmlCanvasElement>()?;

        let variant: Variant = canvas
            .get_attribute("data-variant")
            .as_deref()
            .unwrap_or("node-graph")
            .parse()?;
        let config = match canvas.get_attribute("data-config") {
            Some(json) => BackdropConfig::from_json(&json)?,
            None => BackdropConfig::default(),
        };

        // The auto-mounted backdrop lives as long as the page.
        std::mem::forget(render::mount(canvas, variant, config)?);
        Ok(())
    }

    /// Mounts `variant` on the canvas with id `canvas_id`. Dropping or
    /// calling `stop()` on the returned handle tears it down.
    #[wasm_bindgen(js_name = mountBackdrop)]
    pub fn mount_backdrop(
        canvas_id: &str,
        variant: &str,
        config_json: Option<String>,
    ) -> Result<Backdrop, JsValue> {
        let variant: Variant = variant.parse()?;
        let config = match config_json {
            Some(json) => BackdropConfig::from_json(&json)?,
            None => BackdropConfig::default(),
        };

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;

        render::mount(canvas, variant, config)
    }
}
