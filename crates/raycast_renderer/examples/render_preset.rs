//! Render a built-in scene and save it as PNG.
//!
//! Usage: `cargo run --example render_preset -- [preset] [output.png]`

use raycast_core::Preset;
use raycast_renderer::{CancelToken, Frame, RenderConfig, RenderProgress, Renderer};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "default".to_string());
    let output = args.next().unwrap_or_else(|| format!("{}.png", name));
    let preset = Preset::from_name(&name).ok_or_else(|| format!("unknown preset '{}'", name))?;

    let (width, height) = (400, 225);
    let config = RenderConfig {
        samples: 16,
        max_bounces: 8,
        ..RenderConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(7);

    let start = std::time::Instant::now();
    let mut renderer = Renderer::new();
    renderer.set_aspect(width, height);
    renderer.load_scene(&preset.description(), &config, &mut rng);
    println!("Scene built in {:?}", start.elapsed());

    println!("Rendering {}x{} @ {} spp...", width, height, config.samples);
    let mut rows = 0;
    let mut count_rows = |progress: &RenderProgress, _frame: &Frame| rows = progress.rows_done;
    let result = renderer.render(
        width,
        height,
        &config,
        &CancelToken::new(),
        &mut count_rows,
        &mut rng,
    )?;
    println!("Rendered {} rows in {:?}", rows, result.elapsed);

    let image = result.frame.into_image().ok_or("frame size mismatch")?;
    image.save(&output)?;
    println!("Saved to {}", output);
    Ok(())
}
