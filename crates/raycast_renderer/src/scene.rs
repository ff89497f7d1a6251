//! Scene building: turn a `SceneDescription` into a `World` and a `Camera`.
//!
//! Building never fails. Degenerate shapes are still added (they simply never
//! report hits) and bad mesh faces are dropped by `TriangleMesh`.

use std::sync::Arc;

use crate::texture::{Checker, Marble, NoiseTexture, SolidColor, Texture, Wood};
use crate::{
    Background, Camera, CameraSettings, Cuboid, Dielectric, Emissive, Lambertian, Light,
    Material, Metal, Perlin, Plane, RenderConfig, Sphere, TextureKind, Triangle, TriangleMesh,
    World,
};
use raycast_core::{CameraDesc, MaterialDesc, ObjectDesc, SceneDescription, ShapeDesc};
use raycast_math::Color;
use rand::RngCore;

/// Darkening applied to a material color to get a texture's secondary color.
const SECONDARY_SHADE: f32 = 0.2;

/// Procedural albedo settings for Lambertian materials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureSettings {
    pub enabled: bool,
    pub kind: TextureKind,
    pub scale: f32,
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            kind: TextureKind::Checker,
            scale: 10.0,
        }
    }
}

impl From<&RenderConfig> for TextureSettings {
    fn from(config: &RenderConfig) -> Self {
        Self {
            enabled: config.enable_textures,
            kind: config.texture_type,
            scale: config.texture_scale,
        }
    }
}

/// Albedo texture for a Lambertian of the given color.
pub fn build_texture(
    color: Color,
    textures: &TextureSettings,
    rng: &mut dyn RngCore,
) -> Arc<dyn Texture> {
    if !textures.enabled {
        return Arc::new(SolidColor::new(color));
    }

    let secondary = color * SECONDARY_SHADE;
    let scale = textures.scale;
    match textures.kind {
        TextureKind::Checker => Arc::new(Checker::new(scale, color, secondary)),
        TextureKind::Noise => Arc::new(NoiseTexture::new(Perlin::new(rng), scale, color)),
        TextureKind::Marble => Arc::new(Marble::new(Perlin::new(rng), scale, color, secondary)),
        TextureKind::Wood => Arc::new(Wood::new(Perlin::new(rng), scale, color, secondary)),
    }
}

/// Runtime material for a material description.
pub fn build_material(
    desc: &MaterialDesc,
    textures: &TextureSettings,
    rng: &mut dyn RngCore,
) -> Arc<dyn Material> {
    match *desc {
        MaterialDesc::Lambertian { color } => {
            Arc::new(Lambertian::new(build_texture(color, textures, rng)))
        }
        MaterialDesc::Metal { color, roughness } => Arc::new(Metal::new(color, roughness)),
        MaterialDesc::Dielectric { ior } => Arc::new(Dielectric::new(ior)),
        MaterialDesc::Emissive { color, intensity } => Arc::new(Emissive::new(color, intensity)),
    }
}

fn add_object(
    world: &mut World,
    object: &ObjectDesc,
    textures: &TextureSettings,
    rng: &mut dyn RngCore,
) {
    let material = build_material(&object.material, textures, rng);

    match &object.shape {
        ShapeDesc::Sphere { center, radius } => {
            if *radius <= 0.0 {
                log::warn!("Sphere '{}' has radius {}, it will never be hit", object.label(), radius);
            }
            world.add(Box::new(Sphere::new(*center, *radius, material)));
        }
        ShapeDesc::Plane { point, normal } => {
            if normal.length_squared() == 0.0 {
                log::warn!("Plane '{}' has a zero normal, it will never be hit", object.label());
            }
            world.add(Box::new(Plane::new(*point, *normal, material)));
        }
        ShapeDesc::Cuboid { min, max } => {
            world.add(Box::new(Cuboid::new(*min, *max, material)));
        }
        ShapeDesc::Triangle { v0, v1, v2 } => {
            world.add(Box::new(Triangle::new(*v0, *v1, *v2, material)));
        }
        ShapeDesc::Mesh { vertices, indices } => {
            let mesh = TriangleMesh::new(vertices, indices, material);
            log::debug!(
                "Mesh '{}': {} triangles from {} vertices ({} faces skipped)",
                object.label(),
                mesh.triangle_count(),
                vertices.len(),
                mesh.skipped()
            );
            if mesh.is_empty() {
                log::warn!("Mesh '{}' has no usable triangles, skipping", object.label());
                return;
            }
            world.add(Box::new(mesh));
        }
    }
}

/// Build the world: every object, the light list and the background.
///
/// `rng` seeds the noise tables of procedural textures and the sky.
pub fn build_world(
    desc: &SceneDescription,
    textures: &TextureSettings,
    rng: &mut dyn RngCore,
) -> World {
    let mut world = World::new(Background::from_desc(&desc.background, rng));

    for object in &desc.objects {
        add_object(&mut world, object, textures, rng);
    }

    for light in &desc.lights {
        let light = Light::from(light);
        log::debug!("{} light, radiance {:?}", light.kind(), light.radiance());
        world.add_light(light);
    }
    if !world.lights().is_empty() {
        log::info!(
            "{} light(s) in scene '{}' are kept for reference but not sampled; \
             only emissive surfaces and the background illuminate the render",
            world.lights().len(),
            desc.name
        );
    }

    log::info!(
        "Built world '{}': {} objects ({} triangles), {} background",
        desc.name,
        world.len(),
        desc.triangle_count(),
        world.background().kind()
    );

    world
}

/// Build the camera for an output of the given aspect ratio.
///
/// A non-positive or non-finite `aspect` falls back to the description's.
pub fn build_camera(desc: &CameraDesc, aspect: f32) -> Camera {
    let aspect = if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        desc.aspect
    };

    CameraSettings::default()
        .with_position(desc.position, desc.look_at, desc.up)
        .with_lens(desc.fov, desc.aperture, desc.focus_dist)
        .with_aspect(aspect)
        .with_projection(desc.projection)
        .build()
}
