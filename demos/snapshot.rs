//! # Snapshot
//!
//! Headless run: simulates a number of ticks and writes the composited frame
//! to a PNG. No window or GPU needed.
//!
//! Run with: `cargo run --example snapshot -- out.png [ticks] [font.ttf]`

use sparkfield::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let out = args.next().unwrap_or_else(|| "snapshot.png".to_string());
    let ticks: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(240);
    let font = args.next();

    let config = SceneConfig::default();
    let viewport = Viewport::new(config.window.width, config.window.height);
    let mut simulation = Simulation::new(viewport)
        .with_seed(config.window.seed.unwrap_or(2024))
        .with_layer(Fireworks::new(config.fireworks.clone()), config.fireworks.opacity);
    if let Some(font) = font {
        let text = ParticleText::from_config(config.text.clone().with_font_path(font))?;
        simulation = simulation.with_layer(text, config.text.opacity);
    }

    if !simulation.start() {
        return Err("simulation failed to start".into());
    }
    for _ in 0..ticks {
        simulation.tick();
    }

    let mut frame = Canvas::new(viewport)?;
    simulation.composite(&mut frame)?;
    frame.save_png(&out)?;

    println!(
        "wrote {} after {} ticks ({} live particles)",
        out,
        ticks,
        simulation.particle_count()
    );
    Ok(())
}
