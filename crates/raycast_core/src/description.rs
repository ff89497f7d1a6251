//! Normalized in-memory scene description.
//!
//! These types are what the renderer consumes. They are produced either by
//! the JSON loader or directly in code (see `presets`). Field names and type
//! tags follow the exporter's interchange format.

use raycast_math::Vec3;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A complete scene: objects, lights, camera and background.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneDescription {
    /// Scene name (from the document, or the preset name)
    pub name: String,

    /// Renderable objects in document order
    pub objects: Vec<ObjectDesc>,

    /// Light sources; carried through to the world but not used for shading
    pub lights: Vec<LightDesc>,

    pub camera: CameraDesc,

    pub background: BackgroundDesc,
}

impl SceneDescription {
    /// Create an empty scene with the default camera and background.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add an object, builder style.
    pub fn with_object(mut self, object: ObjectDesc) -> Self {
        self.objects.push(object);
        self
    }

    pub fn with_light(mut self, light: LightDesc) -> Self {
        self.lights.push(light);
        self
    }

    pub fn with_camera(mut self, camera: CameraDesc) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_background(mut self, background: BackgroundDesc) -> Self {
        self.background = background;
        self
    }

    /// Total triangle count over triangles and meshes (complete index triples only).
    pub fn triangle_count(&self) -> usize {
        self.objects
            .iter()
            .map(|o| match &o.shape {
                ShapeDesc::Triangle { .. } => 1,
                ShapeDesc::Mesh { indices, .. } => indices.len() / 3,
                _ => 0,
            })
            .sum()
    }
}

/// One renderable object: a shape plus its material.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ObjectDesc {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_material")]
    pub material: MaterialDesc,

    #[serde(flatten)]
    pub shape: ShapeDesc,
}

impl ObjectDesc {
    pub fn new(shape: ShapeDesc, material: MaterialDesc) -> Self {
        Self {
            name: None,
            material,
            shape,
        }
    }

    /// Attach a name (used in diagnostics only).
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name for log messages.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// Geometric shape of an object, tagged by `"type"`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDesc {
    Sphere {
        #[serde(default, deserialize_with = "lenient_vec3")]
        center: Vec3,
        #[serde(default = "default_radius")]
        radius: f32,
    },
    Plane {
        #[serde(default, deserialize_with = "lenient_vec3")]
        point: Vec3,
        #[serde(default, deserialize_with = "lenient_vec3")]
        normal: Vec3,
    },
    /// Axis-aligned box.
    #[serde(rename = "box")]
    Cuboid {
        #[serde(default, deserialize_with = "lenient_vec3")]
        min: Vec3,
        #[serde(default, deserialize_with = "lenient_vec3")]
        max: Vec3,
    },
    Triangle {
        #[serde(default, deserialize_with = "lenient_vec3")]
        v0: Vec3,
        #[serde(default, deserialize_with = "lenient_vec3")]
        v1: Vec3,
        #[serde(default, deserialize_with = "lenient_vec3")]
        v2: Vec3,
    },
    Mesh {
        #[serde(default, deserialize_with = "lenient_vec3_list")]
        vertices: Vec<Vec3>,
        /// Signed so a bad entry only drops its own face; negative or
        /// non-integer entries never match a vertex.
        #[serde(default, deserialize_with = "lenient_index_list")]
        indices: Vec<i64>,
    },
}

impl ShapeDesc {
    /// The interchange type tag.
    pub fn kind(&self) -> &'static str {
        match self {
            ShapeDesc::Sphere { .. } => "sphere",
            ShapeDesc::Plane { .. } => "plane",
            ShapeDesc::Cuboid { .. } => "box",
            ShapeDesc::Triangle { .. } => "triangle",
            ShapeDesc::Mesh { .. } => "mesh",
        }
    }
}

/// Surface material, tagged by `"type"`.
///
/// The exporter writes `{"type": "default"}` when materials are not exported;
/// that maps to the grey Lambertian.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    #[serde(alias = "default")]
    Lambertian {
        #[serde(default = "default_color", deserialize_with = "lenient_vec3")]
        color: Vec3,
    },
    Metal {
        #[serde(default = "default_color", deserialize_with = "lenient_vec3")]
        color: Vec3,
        #[serde(default)]
        roughness: f32,
    },
    Dielectric {
        #[serde(default = "default_ior")]
        ior: f32,
    },
    Emissive {
        #[serde(default = "default_white", deserialize_with = "lenient_vec3")]
        color: Vec3,
        #[serde(default = "default_intensity")]
        intensity: f32,
    },
}

impl Default for MaterialDesc {
    fn default() -> Self {
        MaterialDesc::Lambertian {
            color: default_color(),
        }
    }
}

/// Light source, tagged by `"type"`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightDesc {
    Point {
        #[serde(default, deserialize_with = "lenient_vec3")]
        position: Vec3,
        #[serde(default = "default_white", deserialize_with = "lenient_vec3")]
        color: Vec3,
        #[serde(default = "default_intensity")]
        intensity: f32,
    },
    Directional {
        #[serde(default, deserialize_with = "lenient_vec3")]
        direction: Vec3,
        #[serde(default = "default_white", deserialize_with = "lenient_vec3")]
        color: Vec3,
        #[serde(default = "default_intensity")]
        intensity: f32,
    },
}

/// Camera projection model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    #[default]
    Perspective,
    Orthographic,
}

/// Camera placement and lens.
///
/// `fov` is the vertical field of view in degrees.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraDesc {
    #[serde(default, deserialize_with = "lenient_vec3")]
    pub position: Vec3,
    #[serde(default, deserialize_with = "lenient_vec3")]
    pub look_at: Vec3,
    #[serde(default = "default_up", deserialize_with = "lenient_vec3")]
    pub up: Vec3,
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_aspect")]
    pub aspect: f32,
    #[serde(default)]
    pub aperture: f32,
    #[serde(default = "default_focus_dist")]
    pub focus_dist: f32,
    #[serde(default, rename = "type")]
    pub projection: Projection,
}

impl Default for CameraDesc {
    /// The exporter's fallback camera: five units back on +Z looking at the origin.
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
            up: default_up(),
            fov: default_fov(),
            aspect: default_aspect(),
            aperture: 0.0,
            focus_dist: default_focus_dist(),
            projection: Projection::Perspective,
        }
    }
}

/// Which background evaluator to use when a ray escapes the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundKind {
    #[default]
    Gradient,
    Solid,
    Hdri,
    ProceduralSky,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BackgroundDesc {
    #[serde(default, rename = "type")]
    pub kind: BackgroundKind,
    #[serde(default = "default_intensity")]
    pub intensity: f32,
    /// Only used by the solid background
    #[serde(default, deserialize_with = "lenient_opt_vec3")]
    pub color: Option<Vec3>,
}

impl Default for BackgroundDesc {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::Gradient,
            intensity: 1.0,
            color: None,
        }
    }
}

// =============================================================================
// Field defaults
// =============================================================================

fn default_radius() -> f32 {
    1.0
}

fn default_color() -> Vec3 {
    Vec3::splat(0.8)
}

fn default_white() -> Vec3 {
    Vec3::ONE
}

fn default_ior() -> f32 {
    1.5
}

fn default_intensity() -> f32 {
    1.0
}

fn default_up() -> Vec3 {
    Vec3::Y
}

fn default_fov() -> f32 {
    45.0
}

fn default_aspect() -> f32 {
    1.5
}

fn default_focus_dist() -> f32 {
    10.0
}

// =============================================================================
// Lenient decoding
// =============================================================================

/// Read a vector from `[x, y, z]` or `{"x":..,"y":..,"z":..}`.
///
/// Missing or non-numeric components read as zero; anything else is `None`.
pub(crate) fn vec3_from_value(value: &Value) -> Option<Vec3> {
    let component = |v: Option<&Value>| v.and_then(Value::as_f64).unwrap_or(0.0) as f32;
    match value {
        Value::Array(items) => Some(Vec3::new(
            component(items.first()),
            component(items.get(1)),
            component(items.get(2)),
        )),
        Value::Object(map) => Some(Vec3::new(
            component(map.get("x")),
            component(map.get("y")),
            component(map.get("z")),
        )),
        _ => None,
    }
}

fn lenient_vec3<'de, D>(deserializer: D) -> Result<Vec3, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(vec3_from_value(&value).unwrap_or_else(|| {
        log::warn!("Malformed vector {}, using zero vector", value);
        Vec3::ZERO
    }))
}

fn lenient_opt_vec3<'de, D>(deserializer: D) -> Result<Option<Vec3>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(vec3_from_value(&value))
}

fn lenient_vec3_list<'de, D>(deserializer: D) -> Result<Vec<Vec3>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            log::warn!("Malformed vertex list {}, using empty list", other);
            return Ok(Vec::new());
        }
    };
    Ok(items
        .iter()
        .map(|v| vec3_from_value(v).unwrap_or(Vec3::ZERO))
        .collect())
}

fn lenient_index_list<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            log::warn!("Malformed index list {}, using empty list", other);
            return Ok(Vec::new());
        }
    };
    Ok(items
        .iter()
        .map(|v| match v.as_i64() {
            Some(i) => i,
            None => {
                log::warn!("Mesh index {} is not an integer, treating as out of range", v);
                -1
            }
        })
        .collect())
}

fn lenient_material<'de, D>(deserializer: D) -> Result<MaterialDesc, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match serde_json::from_value::<MaterialDesc>(value.clone()) {
        Ok(material) => Ok(material),
        Err(e) => {
            log::warn!(
                "Skipping material {} ({}), falling back to default lambertian",
                value.get("type").unwrap_or(&Value::Null),
                e
            );
            Ok(MaterialDesc::default())
        }
    }
}
