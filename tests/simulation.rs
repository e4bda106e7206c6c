//! Integration tests for the layered simulation loop and its lifecycle.

mod common;

use common::BlockRasterizer;
use sparkfield::{
    Canvas, EffectState, Fireworks, FireworksConfig, InputEvent, ListenerKind, ParticleText,
    Simulation, TextConfig, Vec2, Viewport,
};

fn layered(viewport: Viewport, seed: u64) -> Simulation {
    let fireworks = FireworksConfig::default().with_first_launch(5);
    let opacity = fireworks.opacity;
    Simulation::new(viewport)
        .with_seed(seed)
        .with_layer(Fireworks::new(fireworks), opacity)
        .with_layer(
            ParticleText::new(BlockRasterizer, TextConfig::default().with_text("OK")),
            1.0,
        )
}

#[test]
fn test_start_registers_and_stop_releases_listeners() {
    let mut sim = layered(Viewport::new(320, 240), 1);
    assert!(sim.listeners().is_empty());

    assert!(sim.start());
    for kind in [ListenerKind::Resize, ListenerKind::PointerMove, ListenerKind::TouchMove] {
        assert!(sim.listeners().is_registered(kind));
    }
    assert!(sim.particle_count() > 0);

    sim.stop();
    assert!(sim.listeners().is_empty());
    assert!(!sim.is_running());
    // Idempotent
    sim.stop();
    assert!(!sim.tick());
}

#[test]
fn test_zero_viewport_disables_every_layer() {
    let mut sim = layered(Viewport::new(0, 240), 1);
    assert!(!sim.start());
    assert!(!sim.is_running());
    assert!(matches!(sim.layer_state(0), Some(EffectState::Disabled(_))));
    assert!(matches!(sim.layer_state(1), Some(EffectState::Disabled(_))));
    assert!(!sim.tick());
    assert!(!sim.handle_event(InputEvent::Resized(Viewport::new(320, 240))));
}

#[test]
fn test_resize_reseeds_text_and_suspends_on_empty() {
    let mut sim = layered(Viewport::new(800, 600), 2);
    sim.start();
    let big = sim.layers()[1].effect().particle_count();

    assert!(sim.handle_event(InputEvent::Resized(Viewport::new(400, 300))));
    let small = sim.layers()[1].effect().particle_count();
    assert!(small < big);

    sim.handle_event(InputEvent::Resized(Viewport::new(400, 0)));
    assert!(sim.is_running());
    assert!(!sim.tick());

    sim.handle_event(InputEvent::Resized(Viewport::new(800, 600)));
    assert!(sim.tick());
    assert_eq!(sim.layers()[1].effect().particle_count(), big);
}

#[test]
fn test_pointer_events_need_listeners() {
    let mut sim = layered(Viewport::new(320, 240), 3);
    assert!(!sim.handle_event(InputEvent::TouchMoved(Vec2::new(10.0, 10.0))));
    assert!(!sim.pointer().is_present());

    sim.start();
    assert!(sim.handle_event(InputEvent::TouchMoved(Vec2::new(10.0, 10.0))));
    assert_eq!(sim.pointer().position(), Vec2::new(10.0, 10.0));
    assert!(sim.handle_event(InputEvent::PointerLeft));
    assert!(!sim.pointer().is_present());

    sim.stop();
    assert!(!sim.handle_event(InputEvent::PointerMoved(Vec2::new(1.0, 1.0))));
    assert!(!sim.pointer().is_present());
}

#[test]
fn test_set_text_forwards_to_text_layer() {
    let mut sim = layered(Viewport::new(800, 600), 4);
    sim.start();
    let two = sim.layers()[1].effect().particle_count();
    sim.set_text("O");
    assert_eq!(sim.layers()[1].effect().particle_count() * 2, two);
}

#[test]
fn test_layers_composite_into_frame() {
    let viewport = Viewport::new(320, 240);
    let mut sim = layered(viewport, 5);
    sim.start();
    for _ in 0..120 {
        assert!(sim.tick());
    }
    assert_eq!(sim.ticks(), 120);

    let mut frame = Canvas::new(viewport).unwrap();
    sim.composite(&mut frame).unwrap();
    assert!(frame.total_alpha() > 0.0);

    let wrong = Canvas::new(Viewport::new(10, 10));
    assert!(sim.composite(&mut wrong.unwrap()).is_err());
}

#[test]
fn test_seeded_runs_replay_identically() {
    let render = |seed| {
        let viewport = Viewport::new(200, 150);
        let mut sim = layered(viewport, seed);
        sim.start();
        sim.handle_event(InputEvent::PointerMoved(Vec2::new(100.0, 75.0)));
        for _ in 0..90 {
            sim.tick();
        }
        let mut frame = Canvas::new(viewport).unwrap();
        sim.composite(&mut frame).unwrap();
        frame.to_rgba8()
    };
    assert_eq!(render(11), render(11));
}

#[test]
fn test_snapshot_png() {
    let dir = tempfile::tempdir().unwrap();
    let viewport = Viewport::new(160, 120);
    let mut sim = layered(viewport, 6);
    sim.start();
    for _ in 0..60 {
        sim.tick();
    }
    let mut frame = Canvas::new(viewport).unwrap();
    sim.composite(&mut frame).unwrap();

    let path = dir.path().join("frame.png");
    frame.save_png(&path).unwrap();
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}
