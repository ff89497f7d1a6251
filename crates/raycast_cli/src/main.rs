mod cli;
mod logger;

use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use raycast_core::Preset;
use raycast_renderer::{CancelToken, Frame, RenderConfig, RenderProgress, Renderer};

use cli::Args;

/// Settings file (if any) with command line overrides applied.
fn render_config(args: &Args) -> Result<RenderConfig> {
    let mut config = match &args.settings {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse settings {}", path.display()))?
        }
        None => RenderConfig::default(),
    };

    if let Some(samples) = args.samples {
        config.samples = samples;
    }
    if let Some(bounces) = args.bounces {
        config.max_bounces = bounces;
    }
    if let Some(tone_mapping) = args.tone_mapping {
        config.tone_mapping = tone_mapping;
    }
    if let Some(anti_aliasing) = args.anti_aliasing {
        config.anti_aliasing = anti_aliasing;
    }
    if let Some(texture) = args.texture {
        config.enable_textures = true;
        config.texture_type = texture;
    }
    if args.denoise {
        config.denoising = true;
    }

    config.validate()?;
    Ok(config)
}

fn list_presets() {
    for preset in Preset::ALL {
        let scene = preset.description();
        println!(
            "{:<10} {} objects, {} triangles, {} lights",
            preset.name(),
            scene.objects.len(),
            scene.triangle_count(),
            scene.lights.len()
        );
    }
}

fn save_png(frame: Frame, path: &Path) -> Result<()> {
    let (width, height) = (frame.width(), frame.height());
    let image = frame
        .into_image()
        .ok_or_else(|| anyhow!("Frame buffer does not match {}x{}", width, height))?;
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_logger(args.log_level.clone().into());

    if args.list_presets {
        list_presets();
        return Ok(());
    }

    let config = render_config(&args)?;
    let mut rng = StdRng::seed_from_u64(args.seed);

    let mut renderer = Renderer::new();
    renderer.set_aspect(args.width, args.height);

    match &args.scene {
        Some(path) => renderer
            .load_scene_file(path, &config, &mut rng)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            let preset = Preset::from_name(&args.preset).ok_or_else(|| {
                let names: Vec<_> = Preset::ALL.iter().map(Preset::name).collect();
                anyhow!(
                    "Unknown preset '{}' (expected one of: {})",
                    args.preset,
                    names.join(", ")
                )
            })?;
            renderer.load_scene(&preset.description(), &config, &mut rng);
        }
    }

    if args.camera_report {
        if let Some(report) = renderer.camera_report() {
            print!("{}", report);
        }
    }

    let cancel = CancelToken::new();
    if let Some(ms) = args.time_limit_ms {
        let token = cancel.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(ms));
            token.cancel();
        });
    }

    let mut last_tenth = 0;
    let mut log_progress = |progress: &RenderProgress, _frame: &Frame| {
        let tenth = (progress.fraction() * 10.0) as u32;
        if tenth > last_tenth && !progress.finished {
            last_tenth = tenth;
            log::info!(
                "{:>3}% ({} of {} pixels)",
                tenth * 10,
                progress.pixels_done,
                progress.total_pixels
            );
        }
    };

    let output = renderer.render(
        args.width,
        args.height,
        &config,
        &cancel,
        &mut log_progress,
        &mut rng,
    )?;

    if !output.is_complete() {
        log::warn!(
            "Time limit reached, saving partial image ({} pixels)",
            output.pixels_done
        );
    }

    save_png(output.frame, &args.output)?;
    log::info!(
        "Saved {} in {:.2?}",
        args.output.display(),
        output.elapsed
    );

    Ok(())
}
