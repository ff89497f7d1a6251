//! Raycast Renderer - CPU ray tracing
//!
//! A Monte Carlo ray tracer for scenes described by `raycast_core`.
//!
//! Rendering is single-threaded and cooperative: a pass yields between rows,
//! polls a `CancelToken` between pixels and reports progress after every row,
//! so a host event loop stays responsive.
//!
//! # Example
//!
//! ```ignore
//! use raycast_core::Preset;
//! use raycast_renderer::{CancelToken, NoProgress, RenderConfig, Renderer};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let config = RenderConfig::default();
//! let mut renderer = Renderer::new();
//! renderer.load_scene(&Preset::Default.description(), &config, &mut rng);
//! let output = renderer.render(320, 200, &config, &CancelToken::new(), &mut NoProgress, &mut rng)?;
//! ```

mod background;
mod camera;
mod config;
mod cuboid;
mod error;
mod frame;
mod hittable;
mod light;
mod material;
mod perlin;
mod plane;
pub mod post;
mod progress;
mod renderer;
pub mod scene;
mod sphere;
pub mod texture;
mod triangle;
mod triangle_mesh;
mod world;

pub use background::Background;
pub use camera::{Camera, CameraReport, CameraSettings};
pub use config::{AntiAliasing, RenderConfig, TextureKind, ToneMapping, UnknownOption};
pub use cuboid::Cuboid;
pub use error::{RenderError, RenderResult};
pub use frame::Frame;
pub use hittable::{HitRecord, Hittable};
pub use light::Light;
pub use material::{Dielectric, Emissive, Lambertian, Material, Metal, ScatterResult};
pub use perlin::Perlin;
pub use plane::Plane;
pub use progress::{CancelToken, NoProgress, ProgressSink, RenderProgress};
pub use renderer::{
    ray_color, render_frame, render_pixel, RenderOutput, RenderStatus, Renderer,
};
pub use scene::{build_camera, build_world, TextureSettings};
pub use sphere::Sphere;
pub use triangle::Triangle;
pub use triangle_mesh::TriangleMesh;
pub use world::World;

/// Re-export common math types from raycast_math
pub use raycast_math::{Color, Interval, Ray, Vec3};
