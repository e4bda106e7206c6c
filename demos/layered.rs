//! # Layered
//!
//! Fireworks at 80% opacity underneath a particle text message, the way the
//! two effects are stacked on a page.
//!
//! Run with: `cargo run --example layered --release -- <font.ttf> [scene.json]`

use sparkfield::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(font) = args.next() else {
        eprintln!("usage: layered <font.ttf> [scene.json]");
        std::process::exit(2);
    };
    let mut config = match args.next() {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    config.text = config.text.with_font_path(font);

    let viewport = Viewport::new(config.window.width, config.window.height);
    let mut simulation = Simulation::new(viewport)
        .with_layer(Fireworks::new(config.fireworks.clone()), config.fireworks.opacity)
        .with_layer(ParticleText::from_config(config.text.clone())?, config.text.opacity);
    if let Some(seed) = config.window.seed {
        simulation = simulation.with_seed(seed);
    }

    sparkfield::window::run(simulation, &config.window)?;
    Ok(())
}
