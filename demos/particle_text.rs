//! # Particle Text
//!
//! A message drawn as particles that scatter away from the cursor and drift
//! back home.
//!
//! Run with: `cargo run --example particle_text --release -- <font.ttf> [text]`
//!
//! Any bold TrueType/OpenType font works.

use sparkfield::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(font) = args.next() else {
        eprintln!("usage: particle_text <font.ttf> [text]");
        std::process::exit(2);
    };

    let mut config = SceneConfig::default();
    config.text = config.text.with_font_path(font);
    if let Some(text) = args.next() {
        config.text = config.text.with_text(text);
    }
    config.window.title = format!("Sparkfield - {}", config.text.text);

    let viewport = Viewport::new(config.window.width, config.window.height);
    let text = ParticleText::from_config(config.text.clone())?;
    let simulation = Simulation::new(viewport).with_layer(text, config.text.opacity);

    sparkfield::window::run(simulation, &config.window)?;
    Ok(())
}
