#![cfg(target_arch = "wasm32")]

use backdrop_wasm::wasm::mount_backdrop;
use backdrop_wasm::Variant;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn add_canvas(id: &str) -> web_sys::HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    canvas.set_id(id);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn every_variant_mounts_and_stops() {
    for variant in Variant::ALL {
        let id = format!("backdrop-{variant}");
        let canvas = add_canvas(&id);

        let mut backdrop = mount_backdrop(&id, variant.as_str(), None).expect("mount");
        assert!(backdrop.running());
        assert!(canvas.width() > 0 && canvas.height() > 0);

        backdrop.stop();
        assert!(!backdrop.running());
        // stopping twice is harmless
        backdrop.stop();
    }
}

#[wasm_bindgen_test]
fn config_json_is_validated() {
    add_canvas("backdrop-config");
    assert!(mount_backdrop("backdrop-config", "hologram", Some(r#"{"hologram": {"cell_pitch": 0}}"#.into())).is_err());
    assert!(mount_backdrop("backdrop-config", "plasma", None).is_err());
    assert!(mount_backdrop("missing-canvas", "fractal", None).is_err());
}

#[wasm_bindgen_test(async)]
async fn mounted_canvas_has_a_size() {
    let canvas = add_canvas("backdrop-size");
    let backdrop = mount_backdrop("backdrop-size", "node-graph", Some(r#"{"seed": 1}"#.into())).unwrap();

    let rect = canvas
        .dyn_ref::<web_sys::Element>()
        .unwrap()
        .get_bounding_client_rect();

    assert!(rect.width() > 0.0 && rect.height() > 0.0);
    assert!(backdrop.running());
}

#[wasm_bindgen_test]
fn canvas_without_2d_context_gives_an_inert_handle() {
    let canvas = add_canvas("backdrop-webgl");
    // Once a canvas has a WebGL context, asking for "2d" yields null.
    if !matches!(canvas.get_context("webgl"), Ok(Some(_))) {
        return; // no WebGL in this browser
    }

    let backdrop = mount_backdrop("backdrop-webgl", "fractal", None).expect("inert mount");
    assert!(!backdrop.running());
}

#[wasm_bindgen_test]
fn mount_applies_the_configured_log_level() {
    add_canvas("backdrop-log");
    let mut backdrop =
        mount_backdrop("backdrop-log", "circuit", Some(r#"{"log_level": "debug"}"#.into())).unwrap();
    assert_eq!(log::max_level(), log::LevelFilter::Debug);
    backdrop.stop();
}
