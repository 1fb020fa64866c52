#![cfg(not(target_arch = "wasm32"))]

use backdrop_wasm::surface::{DrawCommand, Recorder};
use backdrop_wasm::{build_scene, BackdropConfig, DVec2, FrameInput, Variant};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn run(variant: Variant, frames: u32) -> Recorder {
    let config = BackdropConfig::default();
    let mut rng = StdRng::seed_from_u64(5);
    let mut scene = build_scene(variant, &config, 320.0, 240.0, &mut rng).unwrap();
    assert_eq!(scene.name(), variant.as_str());

    let mut recorder = Recorder::new();
    for i in 0..frames {
        let input = FrameInput {
            now_ms: f64::from(i) * 16.0,
            pointer: Some(DVec2::new(160.0, 120.0)),
        };
        scene.frame(&input, &mut rng);
        recorder.clear();
        scene.render(&mut recorder);
    }
    recorder
}

#[test]
fn every_variant_paints_over_the_previous_frame_first() {
    for variant in Variant::ALL {
        let recorder = run(variant, 10);
        match recorder.commands.first() {
            Some(DrawCommand::FillRect { rect, .. }) => {
                assert_eq!((rect.width, rect.height), (320.0, 240.0), "{variant}");
            }
            other => panic!("{variant}: expected a background fill, got {other:?}"),
        }
    }
}

#[test]
fn resize_rebuilds_for_the_new_viewport() {
    let config = BackdropConfig::default();
    let mut rng = StdRng::seed_from_u64(8);
    for variant in Variant::ALL {
        let mut scene = build_scene(variant, &config, 320.0, 240.0, &mut rng).unwrap();
        scene.frame(&FrameInput::at(0.0), &mut rng);
        scene.resize(1024.0, 768.0, &mut rng);
        scene.frame(&FrameInput::at(16.0), &mut rng);

        let mut recorder = Recorder::new();
        scene.render(&mut recorder);
        match recorder.commands.first() {
            Some(DrawCommand::FillRect { rect, .. }) => {
                assert_eq!((rect.width, rect.height), (1024.0, 768.0), "{variant}");
            }
            other => panic!("{variant}: expected a background fill, got {other:?}"),
        }
    }
}

#[test]
fn clicks_are_ignored_outside_the_hologram() {
    let config = BackdropConfig::default();
    let mut rng = StdRng::seed_from_u64(1);
    let mut scene = build_scene(Variant::NodeGraph, &config, 200.0, 200.0, &mut rng).unwrap();
    scene.click(0.0);
    scene.frame(&FrameInput::at(16.0), &mut rng);
    let mut recorder = Recorder::new();
    scene.render(&mut recorder);
    assert_eq!(recorder.circles().count(), config.node_graph.node_count);
}

#[test]
fn config_json_drives_the_scene() {
    let config = BackdropConfig::from_json(r#"{"seed": 3, "node_graph": {"node_count": 12}}"#).unwrap();
    let mut rng = StdRng::seed_from_u64(config.seed.unwrap());
    let scene = build_scene(Variant::NodeGraph, &config, 300.0, 300.0, &mut rng).unwrap();
    let mut recorder = Recorder::new();
    scene.render(&mut recorder);
    assert_eq!(recorder.circles().count(), 12);
}

#[test]
fn variant_names_from_markup() {
    assert_eq!("node-graph".parse::<Variant>().unwrap(), Variant::NodeGraph);
    assert_eq!("circuit-board".parse::<Variant>().unwrap(), Variant::Circuit);
    assert!("".parse::<Variant>().is_err());
}
