//! # Fireworks
//!
//! Shells launch from the bottom edge and burst into fading sparks.
//!
//! Run with: `cargo run --example fireworks --release [scene.json]`
//! Set `RUST_LOG=debug` to see launches and frame rate.

use sparkfield::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    let viewport = Viewport::new(config.window.width, config.window.height);

    let mut simulation = Simulation::new(viewport)
        .with_layer(Fireworks::new(config.fireworks.clone()), 1.0);
    if let Some(seed) = config.window.seed {
        simulation = simulation.with_seed(seed);
    }

    sparkfield::window::run(simulation, &config.window)?;
    Ok(())
}
