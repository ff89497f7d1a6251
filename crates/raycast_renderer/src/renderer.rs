//! Core ray tracing renderer.
//!
//! Implements Monte Carlo ray tracing with:
//! - Recursive ray tracing bounded by the bounce budget
//! - Per-pixel anti-aliasing (uniform or polar jitter)
//! - Tone mapping, gamma correction and an optional denoise pass
//! - Cooperative yielding, cancellation and per-row progress

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crate::hittable::Hittable;
use crate::post::{denoise, finish_color};
use crate::scene::{build_camera, build_world, TextureSettings};
use crate::{
    AntiAliasing, CameraReport, CancelToken, Camera, Frame, ProgressSink, RenderConfig,
    RenderError, RenderProgress, World,
};
use raycast_core::{load_scene_file, load_scene_from_str, CameraDesc, LoadResult, SceneDescription};
use raycast_math::{gen_f32, random_in_polar_disk, Color, Interval, Ray};
use rand::RngCore;

/// Closest distance along a ray that counts as a hit; avoids self-intersection.
const T_MIN: f32 = 0.001;

/// Compute the color seen by a ray.
///
/// Traces the ray through the world, bouncing off surfaces until it escapes
/// to the background, is absorbed, or runs out of `depth`.
pub fn ray_color(ray: &Ray, world: &World, depth: u32, rng: &mut dyn RngCore) -> Color {
    // Bounce budget exhausted: no light
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return world.background_color(ray);
    };

    let emission = rec.material.emitted(rec.u, rec.v, rec.p);

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            let scattered_color = ray_color(&result.scattered, world, depth - 1, rng);
            emission + result.attenuation * scattered_color
        }
        None => emission,
    }
}

/// Sample position inside a pixel, in pixel units from its top-left corner.
fn sample_offset(mode: AntiAliasing, rng: &mut dyn RngCore) -> (f32, f32) {
    match mode {
        AntiAliasing::Off => (0.5, 0.5),
        AntiAliasing::Supersampling => (gen_f32(rng), gen_f32(rng)),
        AntiAliasing::Stochastic => {
            let d = random_in_polar_disk(rng) * 0.5;
            (0.5 + d.x, 0.5 + d.y)
        }
    }
}

/// Average radiance for one pixel, before tone mapping.
///
/// `y` counts down from the top row of the image.
#[allow(clippy::too_many_arguments)]
pub fn render_pixel(
    camera: &Camera,
    world: &World,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let samples = config.effective_samples();
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        let (ox, oy) = sample_offset(config.anti_aliasing, rng);
        let s = (x as f32 + ox) / width as f32;
        // Camera t runs bottom to top
        let t = 1.0 - (y as f32 + oy) / height as f32;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, world, config.max_bounces, rng);
    }

    pixel_color / samples as f32
}

/// How a render pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    Completed,
    /// Stopped by the cancel token; the frame is partially filled
    Cancelled,
}

/// Result of a render pass.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub frame: Frame,
    pub status: RenderStatus,
    pub pixels_done: u64,
    pub elapsed: Duration,
}

impl RenderOutput {
    pub fn is_complete(&self) -> bool {
        self.status == RenderStatus::Completed
    }
}

/// Render a whole frame, top row first.
///
/// Checks `cancel` between pixels; on cancellation the pixels written so far
/// are kept and the pass still returns normally. Yields the thread at the end
/// of every row and whenever a row overruns the configured time budget.
#[allow(clippy::too_many_arguments)]
pub fn render_frame(
    camera: &Camera,
    world: &World,
    width: u32,
    height: u32,
    config: &RenderConfig,
    cancel: &CancelToken,
    progress: &mut dyn ProgressSink,
    rng: &mut dyn RngCore,
) -> RenderOutput {
    let start = Instant::now();
    let budget = config.row_time_budget();
    let total_pixels = width as u64 * height as u64;
    let mut frame = Frame::new(width, height);
    let mut pixels_done = 0u64;
    let mut rows_done = 0u32;
    let mut status = RenderStatus::Completed;

    'rows: for y in 0..height {
        let mut slice_start = Instant::now();

        for x in 0..width {
            if cancel.is_cancelled() {
                status = RenderStatus::Cancelled;
                break 'rows;
            }

            let color = render_pixel(camera, world, x, y, width, height, config, rng);
            frame.set(x, y, finish_color(color, config));
            pixels_done += 1;

            if slice_start.elapsed() > budget {
                thread::yield_now();
                slice_start = Instant::now();
            }
        }

        rows_done += 1;
        log::trace!("Row {} done after {:?}", y, start.elapsed());
        progress.report(
            &RenderProgress {
                rows_done,
                pixels_done,
                total_pixels,
                finished: false,
                cancelled: false,
            },
            &frame,
        );
        thread::yield_now();
    }

    if status == RenderStatus::Completed && config.denoising {
        let smoothed = denoise(frame.pixels(), width, height, config.denoise_strength);
        frame.replace_pixels(smoothed);
    }

    progress.report(
        &RenderProgress {
            rows_done,
            pixels_done,
            total_pixels,
            finished: true,
            cancelled: status == RenderStatus::Cancelled,
        },
        &frame,
    );

    RenderOutput {
        frame,
        status,
        pixels_done,
        elapsed: start.elapsed(),
    }
}

/// Holds the active scene and renders it on request.
///
/// Scene loading swaps world and camera together; a failed load leaves the
/// previous scene in place.
pub struct Renderer {
    world: Option<World>,
    camera: Option<Camera>,
    camera_desc: CameraDesc,
    scene_name: String,
    aspect: Option<f32>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a renderer with no scene.
    pub fn new() -> Self {
        Self {
            world: None,
            camera: None,
            camera_desc: CameraDesc::default(),
            scene_name: String::new(),
            aspect: None,
        }
    }

    /// Replace the active scene.
    ///
    /// Texture settings in `config` are baked into the materials, so changing
    /// them requires reloading.
    pub fn load_scene(
        &mut self,
        desc: &SceneDescription,
        config: &RenderConfig,
        rng: &mut dyn RngCore,
    ) {
        let world = build_world(desc, &TextureSettings::from(config), rng);
        let aspect = self.aspect.unwrap_or(desc.camera.aspect);
        let camera = build_camera(&desc.camera, aspect);
        log::debug!("Scene '{}' {}", desc.name, camera.report());

        self.world = Some(world);
        self.camera = Some(camera);
        self.camera_desc = desc.camera.clone();
        self.scene_name = desc.name.clone();
    }

    /// Parse an interchange document and make it the active scene.
    pub fn load_scene_json(
        &mut self,
        text: &str,
        config: &RenderConfig,
        rng: &mut dyn RngCore,
    ) -> LoadResult<()> {
        let desc = load_scene_from_str(text)?;
        self.load_scene(&desc, config, rng);
        Ok(())
    }

    /// Load an interchange document from disk and make it the active scene.
    pub fn load_scene_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        config: &RenderConfig,
        rng: &mut dyn RngCore,
    ) -> LoadResult<()> {
        let desc = load_scene_file(path)?;
        self.load_scene(&desc, config, rng);
        Ok(())
    }

    /// Set the output size; rebuilds the camera for the new aspect ratio.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Ignoring empty output size {}x{}", width, height);
            return;
        }
        let aspect = width as f32 / height as f32;
        self.aspect = Some(aspect);
        if self.camera.is_some() {
            self.camera = Some(build_camera(&self.camera_desc, aspect));
        }
    }

    pub fn has_scene(&self) -> bool {
        self.world.is_some()
    }

    pub fn scene_name(&self) -> &str {
        &self.scene_name
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    /// Diagnostic view of the active camera.
    pub fn camera_report(&self) -> Option<CameraReport> {
        self.camera.as_ref().map(Camera::report)
    }

    /// Render the active scene at `width x height`.
    ///
    /// If the output aspect differs from the active camera's, a camera for
    /// this size is built for the pass only.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &self,
        width: u32,
        height: u32,
        config: &RenderConfig,
        cancel: &CancelToken,
        progress: &mut dyn ProgressSink,
        rng: &mut dyn RngCore,
    ) -> Result<RenderOutput, RenderError> {
        config.validate()?;
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyFrame { width, height });
        }
        let (world, camera) = match (&self.world, &self.camera) {
            (Some(world), Some(camera)) => (world, camera),
            _ => return Err(RenderError::NoScene),
        };

        let aspect = width as f32 / height as f32;
        let resized;
        let camera = if (camera.settings().aspect_ratio - aspect).abs() > 1e-6 {
            resized = build_camera(&self.camera_desc, aspect);
            &resized
        } else {
            camera
        };

        log::info!(
            "Rendering '{}' at {}x{} ({} spp, {} bounces)",
            self.scene_name,
            width,
            height,
            config.effective_samples(),
            config.max_bounces
        );

        let output = render_frame(camera, world, width, height, config, cancel, progress, rng);

        match output.status {
            RenderStatus::Completed => log::info!("Render finished in {:.2?}", output.elapsed),
            RenderStatus::Cancelled => log::info!(
                "Render cancelled after {} of {} pixels ({:.2?})",
                output.pixels_done,
                width as u64 * height as u64,
                output.elapsed
            ),
        }

        Ok(output)
    }
}
