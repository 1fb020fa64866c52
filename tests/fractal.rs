#![cfg(not(target_arch = "wasm32"))]

use backdrop_wasm::config::FractalConfig;
use backdrop_wasm::fractal::{morph, outline_count, resample, FractalMorph, Shape};
use backdrop_wasm::scene::{FrameInput, Scene};
use backdrop_wasm::surface::{DrawCommand, Recorder};
use backdrop_wasm::DVec2;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn shape_pairs() -> Vec<(Shape, Shape)> {
    let cycle = Shape::cycle();
    let mut pairs = Vec::new();
    for a in &cycle {
        for b in &cycle {
            pairs.push((a.clone(), b.clone()));
        }
    }
    pairs
}

#[test]
fn morph_endpoints_match_resampled_shapes() {
    for (a, b) in shape_pairs() {
        let count = a.points.len().max(b.points.len());
        assert_eq!(morph(&a, &b, 0.0), resample(&a.points, count), "{} -> {}", a.name, b.name);
        assert_eq!(morph(&a, &b, 1.0), resample(&b.points, count), "{} -> {}", a.name, b.name);
    }
}

proptest! {
    #[test]
    fn morph_length_is_the_longer_shape(t in 0.0..=1.0f64, pair in 0usize..9) {
        let (a, b) = &shape_pairs()[pair];
        let points = morph(a, b, t);
        prop_assert_eq!(points.len(), a.points.len().max(b.points.len()));
    }

    #[test]
    fn morph_of_arbitrary_polygons(
        a in prop::collection::vec((-100.0..100.0f64, -100.0..100.0f64), 1..20),
        b in prop::collection::vec((-100.0..100.0f64, -100.0..100.0f64), 1..20),
        t in 0.0..=1.0f64,
    ) {
        let to_shape = |pts: &[(f64, f64)]| Shape::new("arb", pts.iter().map(|&(x, y)| DVec2::new(x, y)).collect());
        let (sa, sb) = (to_shape(&a), to_shape(&b));
        let count = a.len().max(b.len());
        let points = morph(&sa, &sb, t);
        prop_assert_eq!(points.len(), count);

        let from = resample(&sa.points, count);
        let to = resample(&sb.points, count);
        for ((p, f), g) in points.iter().zip(&from).zip(&to) {
            let lo = f.min(*g) - DVec2::splat(1e-9);
            let hi = f.max(*g) + DVec2::splat(1e-9);
            prop_assert!(p.cmpge(lo).all() && p.cmple(hi).all());
        }
    }
}

#[test]
fn one_full_cycle_returns_to_the_first_shape() {
    let mut fractal = FractalMorph::new(FractalConfig::default(), 800.0, 600.0);
    assert_eq!(fractal.current_shape().name, "brain");
    assert_eq!(fractal.next_shape().name, "gear");

    let mut visited = vec![fractal.current_shape().name];
    let mut frames = 0;
    while visited.len() < 4 {
        frames += 1;
        assert!(frames < 2000, "morph never completed");
        if fractal.step() {
            visited.push(fractal.current_shape().name);
        }
    }

    assert_eq!(visited, vec!["brain", "gear", "circuit", "brain"]);
    assert_eq!(fractal.current_index(), 0);
    assert_eq!(fractal.next_shape().name, "gear");
}

#[test]
fn render_fades_then_draws_nested_outlines() {
    let config = FractalConfig {
        depth: 3,
        ..FractalConfig::default()
    };
    let mut fractal = FractalMorph::new(config, 400.0, 300.0);
    let mut rng = SmallRng::seed_from_u64(0);
    fractal.frame(&FrameInput::at(16.0), &mut rng);

    let mut recorder = Recorder::new();
    fractal.render(&mut recorder);

    match &recorder.commands[0] {
        DrawCommand::FillRect { color, .. } => assert!((color.alpha() - 0.1).abs() < 1e-12),
        other => panic!("expected fade first, got {other:?}"),
    }
    // brain (6) and gear (12) morph at 12 points
    assert_eq!(recorder.polygons().count(), outline_count(12, 3));
}

#[test]
fn malformed_palette_entries_render_black() {
    let config = FractalConfig {
        palette: vec!["not-a-colour".to_owned(), "rgba(10, 20, 30, 1)".to_owned()],
        ..FractalConfig::default()
    };
    let fractal = FractalMorph::new(config, 100.0, 100.0);
    let blend = fractal.color_blend();
    assert_eq!(blend.from, backdrop_wasm::color::Rgb::BLACK);
    assert_eq!(blend.to, backdrop_wasm::color::Rgb::new(10, 20, 30));
}
