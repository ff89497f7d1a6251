use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use raycast_renderer::{AntiAliasing, TextureKind, ToneMapping};

/// Log levels selectable on the command line
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "raycast")]
#[command(about = "Render a raycast scene to a PNG image")]
pub struct Args {
    /// Scene document exported as JSON (overrides --preset)
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Built-in scene to render when no --scene is given
    #[arg(short, long, default_value = "default")]
    pub preset: String,

    /// List the built-in scenes and exit
    #[arg(long)]
    pub list_presets: bool,

    /// Render settings as camelCase JSON; flags below override it
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long, default_value = "600")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "400")]
    pub height: u32,

    /// Samples per pixel
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Maximum ray bounces
    #[arg(short, long)]
    pub bounces: Option<u32>,

    /// Tone mapping operator (reinhard, aces, linear)
    #[arg(long)]
    pub tone_mapping: Option<ToneMapping>,

    /// Anti-aliasing mode (supersampling, stochastic, none)
    #[arg(long)]
    pub anti_aliasing: Option<AntiAliasing>,

    /// Procedural albedo for diffuse surfaces (checker, noise, marble, wood)
    #[arg(long)]
    pub texture: Option<TextureKind>,

    /// Blur the finished image with a 3x3 Gaussian
    #[arg(long)]
    pub denoise: bool,

    /// Seed for every random choice in the render
    #[arg(long, default_value = "1")]
    pub seed: u64,

    /// Stop rendering after this many milliseconds and save what is done
    #[arg(long)]
    pub time_limit_ms: Option<u64>,

    /// Print the camera basis and corner rays before rendering
    #[arg(long)]
    pub camera_report: bool,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["raycast"]);
        assert_eq!(args.preset, "default");
        assert_eq!((args.width, args.height), (600, 400));
        assert!(args.scene.is_none());
        assert!(args.samples.is_none());
    }

    #[test]
    fn test_render_overrides() {
        let args = Args::parse_from([
            "raycast",
            "--preset",
            "cornell",
            "-s",
            "16",
            "--tone-mapping",
            "aces",
            "--anti-aliasing",
            "none",
            "--texture",
            "wood",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.samples, Some(16));
        assert_eq!(args.tone_mapping, Some(ToneMapping::Aces));
        assert_eq!(args.anti_aliasing, Some(AntiAliasing::Off));
        assert_eq!(args.texture, Some(TextureKind::Wood));
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_unknown_option_value() {
        assert!(Args::try_parse_from(["raycast", "--texture", "plaid"]).is_err());
    }
}
