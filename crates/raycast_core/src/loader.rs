//! JSON interchange loading.
//!
//! The document must parse as a JSON object; that is the only hard failure.
//! Individual objects, lights, the camera and the background are decoded one
//! at a time, and any entry that cannot be decoded (unknown `"type"` tag,
//! wrong field types) is skipped with a warning so the rest of the scene
//! still loads.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::description::{BackgroundDesc, CameraDesc, LightDesc, ObjectDesc, SceneDescription};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene document: {0}")]
    InvalidScene(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Top-level document shape before per-entry decoding.
#[derive(Deserialize)]
struct RawScene {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    objects: Vec<Value>,
    #[serde(default)]
    lights: Vec<Value>,
    #[serde(default)]
    camera: Option<Value>,
    #[serde(default)]
    background: Option<Value>,
}

/// Load a scene description from a JSON file.
pub fn load_scene_file<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let mut scene = load_scene_from_str(&text)?;

    if scene.name.is_empty() {
        scene.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed")
            .to_string();
    }

    Ok(scene)
}

/// Load a scene description from JSON text.
pub fn load_scene_from_str(text: &str) -> LoadResult<SceneDescription> {
    let root: Value = serde_json::from_str(text)?;
    if !root.is_object() {
        return Err(LoadError::InvalidScene(format!(
            "expected a JSON object at the top level, found {}",
            json_kind(&root)
        )));
    }
    let raw: RawScene = serde_json::from_value(root)?;

    let objects: Vec<ObjectDesc> = raw
        .objects
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| decode_entry(v, "object", i))
        .collect();

    let lights: Vec<LightDesc> = raw
        .lights
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| decode_entry(v, "light", i))
        .collect();

    let camera = raw
        .camera
        .and_then(|v| decode_entry::<CameraDesc>(v, "camera", 0))
        .unwrap_or_default();

    let background = raw
        .background
        .and_then(|v| decode_entry::<BackgroundDesc>(v, "background", 0))
        .unwrap_or_default();

    let scene = SceneDescription {
        name: raw.name.unwrap_or_default(),
        objects,
        lights,
        camera,
        background,
    };

    log::info!(
        "Loaded scene '{}': {} objects, {} lights, {} triangles",
        scene.name,
        scene.objects.len(),
        scene.lights.len(),
        scene.triangle_count()
    );

    Ok(scene)
}

/// Decode one entry, logging and returning `None` when it cannot be used.
fn decode_entry<T: DeserializeOwned>(value: Value, what: &str, index: usize) -> Option<T> {
    let tag = value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("<untagged>")
        .to_string();

    match serde_json::from_value::<T>(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            log::warn!("Skipping {} #{} (type '{}'): {}", what, index, tag, e);
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
