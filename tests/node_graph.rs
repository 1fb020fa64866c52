#![cfg(not(target_arch = "wasm32"))]

//! Invariants of the node-graph network simulator.
//!
//! 1. Speed never exceeds `max_speed` after a step.
//! 2. Every node stays inside the viewport after a step.
//! 3. Connections are symmetric and match the distance threshold exactly.
//! 4. 800x600 with 50 nodes survives 100 pointer-free steps.

use backdrop_wasm::config::NodeGraphConfig;
use backdrop_wasm::node_graph::{compute_connections, initialize, step, NetworkState, NodeGraph};
use backdrop_wasm::DVec2;
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

const EPS: f64 = 1e-9;

fn assert_symmetric(state: &NetworkState, threshold: f64) {
    for (i, a) in state.nodes.iter().enumerate() {
        for (j, b) in state.nodes.iter().enumerate() {
            if i == j {
                assert!(!a.connections.contains(&j), "node {i} connected to itself");
                continue;
            }
            let close = a.position.distance(b.position) < threshold;
            assert_eq!(a.connections.contains(&j), close, "pair ({i}, {j})");
            assert_eq!(a.connections.contains(&j), b.connections.contains(&i));
        }
    }
}

fn arb_pointer() -> impl Strategy<Value = Option<(f64, f64)>> {
    prop_oneof![Just(None), (-50.0..850.0f64, -50.0..650.0f64).prop_map(Some)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn speed_and_bounds_hold_every_step(
        seed in any::<u64>(),
        width in 50.0..1600.0f64,
        height in 50.0..1200.0f64,
        pointers in prop::collection::vec(arb_pointer(), 1..60),
    ) {
        let config = NodeGraphConfig::default();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut state = initialize(&config, width, height, &mut rng);

        for pointer in pointers {
            let pointer = pointer.map(|(x, y)| DVec2::new(x, y));
            state = compute_connections(step(&state, &config, pointer), config.connection_distance);
            for node in &state.nodes {
                prop_assert!(node.velocity.length() <= config.max_speed + EPS);
                prop_assert!(node.position.x >= 0.0 && node.position.x <= width);
                prop_assert!(node.position.y >= 0.0 && node.position.y <= height);
                prop_assert!(node.hue >= config.hue_min && node.hue <= config.hue_max);
            }
        }
    }

    #[test]
    fn large_velocities_are_clamped(vx in -50.0..50.0f64, vy in -50.0..50.0f64) {
        let config = NodeGraphConfig::default();
        let mut rng = SmallRng::seed_from_u64(0);
        let mut state = initialize(&config, 400.0, 400.0, &mut rng);
        for node in &mut state.nodes {
            node.velocity = DVec2::new(vx, vy);
        }
        let next = step(&state, &config, None);
        for node in &next.nodes {
            prop_assert!(node.velocity.length() <= config.max_speed + EPS);
        }
    }
}

#[test]
fn connections_are_symmetric() {
    let config = NodeGraphConfig::default();
    let mut rng = SmallRng::seed_from_u64(42);
    let state = compute_connections(initialize(&config, 500.0, 400.0, &mut rng), 150.0);
    assert_symmetric(&state, 150.0);
    assert!(state.connection_count() > 0);
}

#[test]
fn eight_hundred_by_six_hundred_for_a_hundred_steps() {
    let config = NodeGraphConfig::default();
    let mut rng = SmallRng::seed_from_u64(2024);
    let mut graph = NodeGraph::initialize(config.clone(), 800.0, 600.0, &mut rng);

    for _ in 0..100 {
        graph.advance(None);
    }

    let state = graph.state();
    assert_eq!(state.nodes.len(), 50);
    for node in &state.nodes {
        assert!((0.0..=800.0).contains(&node.position.x));
        assert!((0.0..=600.0).contains(&node.position.y));
    }
    assert_eq!(state.connection_count() % 2, 0);
    assert_symmetric(state, config.connection_distance);
    assert!((state.time - 0.1).abs() < 1e-9);
}

#[test]
fn same_seed_replays_identically() {
    let config = NodeGraphConfig::default();
    let run = |seed| {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut graph = NodeGraph::initialize(config.clone(), 640.0, 480.0, &mut rng);
        for i in 0..30 {
            graph.advance(Some(DVec2::new(f64::from(i) * 10.0, 240.0)));
        }
        graph.state().clone()
    };
    assert_eq!(run(9), run(9));
    assert_ne!(run(9), run(10));
}

#[test]
fn zero_nodes_is_a_valid_scene() {
    let config = NodeGraphConfig {
        node_count: 0,
        ..NodeGraphConfig::default()
    };
    let mut rng = SmallRng::seed_from_u64(1);
    let mut graph = NodeGraph::initialize(config, 300.0, 300.0, &mut rng);
    graph.advance(Some(DVec2::new(10.0, 10.0)));
    assert!(graph.state().nodes.is_empty());
    assert_eq!(graph.state().connection_count(), 0);
}
