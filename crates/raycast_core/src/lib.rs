//! Raycast Core - scene description and interchange loading.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `ObjectDesc`, `MaterialDesc`,
//!   `LightDesc`, `CameraDesc`, `BackgroundDesc`
//! - **Interchange loading**: JSON scene documents as written by the exporter
//! - **Presets**: built-in scenes used when no document is supplied
//!
//! # Example
//!
//! ```ignore
//! use raycast_core::load_scene_file;
//!
//! let scene = load_scene_file("scene_raycast.json")?;
//! println!("Loaded {} objects, {} lights", scene.objects.len(), scene.lights.len());
//! ```

pub mod description;
pub mod loader;
pub mod presets;

pub use description::{
    BackgroundDesc, BackgroundKind, CameraDesc, LightDesc, MaterialDesc, ObjectDesc, Projection,
    SceneDescription, ShapeDesc,
};
pub use loader::{load_scene_file, load_scene_from_str, LoadError, LoadResult};
pub use presets::Preset;
