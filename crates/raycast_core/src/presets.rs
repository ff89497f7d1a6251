//! Built-in scenes.

use raycast_math::Vec3;

use crate::description::{
    BackgroundDesc, BackgroundKind, CameraDesc, LightDesc, MaterialDesc, ObjectDesc, Projection,
    SceneDescription, ShapeDesc,
};

/// A named built-in scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Three spheres on a ground plane under a gradient sky
    Default,
    /// One of every shape and material
    Materials,
    /// Closed box lit only by an emissive ceiling panel
    Cornell,
    /// Glass and metal spheres under the procedural sky
    Sky,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Default,
        Preset::Materials,
        Preset::Cornell,
        Preset::Sky,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::Materials => "materials",
            Preset::Cornell => "cornell",
            Preset::Sky => "sky",
        }
    }

    /// Look up a preset by its name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Preset> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// Build the scene description for this preset.
    pub fn description(&self) -> SceneDescription {
        match self {
            Preset::Default => default_scene(),
            Preset::Materials => materials_scene(),
            Preset::Cornell => cornell_scene(),
            Preset::Sky => sky_scene(),
        }
    }
}

fn lambertian(r: f32, g: f32, b: f32) -> MaterialDesc {
    MaterialDesc::Lambertian {
        color: Vec3::new(r, g, b),
    }
}

fn sphere(center: Vec3, radius: f32) -> ShapeDesc {
    ShapeDesc::Sphere { center, radius }
}

fn cuboid(min: Vec3, max: Vec3) -> ShapeDesc {
    ShapeDesc::Cuboid { min, max }
}

fn front_camera(fov: f32) -> CameraDesc {
    CameraDesc {
        position: Vec3::ZERO,
        look_at: Vec3::new(0.0, 0.0, -1.0),
        up: Vec3::Y,
        fov,
        aspect: 1.5,
        aperture: 0.0,
        focus_dist: 1.0,
        projection: Projection::Perspective,
    }
}

fn default_scene() -> SceneDescription {
    SceneDescription::new("default")
        .with_object(
            ObjectDesc::new(sphere(Vec3::new(0.0, 0.0, -1.0), 0.5), lambertian(0.7, 0.3, 0.3))
                .named("center"),
        )
        .with_object(
            ObjectDesc::new(
                sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5),
                MaterialDesc::Dielectric { ior: 1.5 },
            )
            .named("glass"),
        )
        .with_object(
            ObjectDesc::new(
                sphere(Vec3::new(1.0, 0.0, -1.0), 0.5),
                MaterialDesc::Metal {
                    color: Vec3::new(0.8, 0.6, 0.2),
                    roughness: 0.2,
                },
            )
            .named("metal"),
        )
        .with_object(
            ObjectDesc::new(
                ShapeDesc::Plane {
                    point: Vec3::new(0.0, -0.5, 0.0),
                    normal: Vec3::Y,
                },
                lambertian(0.8, 0.8, 0.0),
            )
            .named("ground"),
        )
        .with_camera(front_camera(90.0))
        .with_background(BackgroundDesc::default())
}

fn materials_scene() -> SceneDescription {
    // Square pyramid, base on the ground plane
    let vertices = vec![
        Vec3::new(-0.4, -0.5, -2.4),
        Vec3::new(0.4, -0.5, -2.4),
        Vec3::new(0.4, -0.5, -1.6),
        Vec3::new(-0.4, -0.5, -1.6),
        Vec3::new(0.0, 0.3, -2.0),
    ];
    let indices = vec![0, 1, 4, 1, 2, 4, 2, 3, 4, 3, 0, 4, 0, 2, 1, 0, 3, 2];

    SceneDescription::new("materials")
        .with_object(
            ObjectDesc::new(
                ShapeDesc::Plane {
                    point: Vec3::new(0.0, -0.5, 0.0),
                    normal: Vec3::Y,
                },
                lambertian(0.5, 0.5, 0.5),
            )
            .named("ground"),
        )
        .with_object(
            ObjectDesc::new(sphere(Vec3::new(-1.2, 0.0, -1.5), 0.5), lambertian(0.1, 0.2, 0.5))
                .named("diffuse"),
        )
        .with_object(
            ObjectDesc::new(
                sphere(Vec3::new(1.2, 0.0, -1.5), 0.5),
                MaterialDesc::Metal {
                    color: Vec3::new(0.8, 0.8, 0.8),
                    roughness: 0.0,
                },
            )
            .named("mirror"),
        )
        .with_object(
            ObjectDesc::new(
                sphere(Vec3::new(0.0, -0.25, -1.0), 0.25),
                MaterialDesc::Dielectric { ior: 1.5 },
            )
            .named("glass"),
        )
        .with_object(
            ObjectDesc::new(
                cuboid(Vec3::new(-2.4, -0.5, -3.0), Vec3::new(-1.8, 0.1, -2.4)),
                lambertian(0.2, 0.6, 0.2),
            )
            .named("crate"),
        )
        .with_object(
            ObjectDesc::new(
                ShapeDesc::Triangle {
                    v0: Vec3::new(1.6, -0.5, -3.0),
                    v1: Vec3::new(2.6, -0.5, -3.0),
                    v2: Vec3::new(2.1, 0.5, -3.0),
                },
                MaterialDesc::Emissive {
                    color: Vec3::new(1.0, 0.8, 0.6),
                    intensity: 3.0,
                },
            )
            .named("lamp"),
        )
        .with_object(
            ObjectDesc::new(
                ShapeDesc::Mesh { vertices, indices },
                MaterialDesc::Metal {
                    color: Vec3::new(0.9, 0.7, 0.4),
                    roughness: 0.3,
                },
            )
            .named("pyramid"),
        )
        .with_light(LightDesc::Point {
            position: Vec3::new(0.0, 4.0, 0.0),
            color: Vec3::ONE,
            intensity: 10.0,
        })
        .with_camera(CameraDesc {
            position: Vec3::new(0.0, 0.6, 1.5),
            look_at: Vec3::new(0.0, 0.0, -1.5),
            up: Vec3::Y,
            fov: 60.0,
            aspect: 1.5,
            aperture: 0.05,
            focus_dist: 3.0,
            projection: Projection::Perspective,
        })
        .with_background(BackgroundDesc {
            kind: BackgroundKind::Hdri,
            intensity: 1.0,
            color: None,
        })
}

fn cornell_scene() -> SceneDescription {
    let red = lambertian(0.65, 0.05, 0.05);
    let white = lambertian(0.73, 0.73, 0.73);
    let green = lambertian(0.12, 0.45, 0.15);

    SceneDescription::new("cornell")
        .with_object(
            ObjectDesc::new(cuboid(Vec3::new(-1.1, -1.0, -3.0), Vec3::new(-1.0, 1.0, 0.0)), red)
                .named("left wall"),
        )
        .with_object(
            ObjectDesc::new(cuboid(Vec3::new(1.0, -1.0, -3.0), Vec3::new(1.1, 1.0, 0.0)), green)
                .named("right wall"),
        )
        .with_object(
            ObjectDesc::new(
                cuboid(Vec3::new(-1.0, -1.1, -3.0), Vec3::new(1.0, -1.0, 0.0)),
                white.clone(),
            )
            .named("floor"),
        )
        .with_object(
            ObjectDesc::new(
                cuboid(Vec3::new(-1.0, 1.0, -3.0), Vec3::new(1.0, 1.1, 0.0)),
                white.clone(),
            )
            .named("ceiling"),
        )
        .with_object(
            ObjectDesc::new(
                cuboid(Vec3::new(-1.0, -1.0, -3.1), Vec3::new(1.0, 1.0, -3.0)),
                white.clone(),
            )
            .named("back wall"),
        )
        .with_object(
            ObjectDesc::new(
                cuboid(Vec3::new(-0.3, 0.98, -1.8), Vec3::new(0.3, 0.999, -1.2)),
                MaterialDesc::Emissive {
                    color: Vec3::ONE,
                    intensity: 15.0,
                },
            )
            .named("light panel"),
        )
        .with_object(
            ObjectDesc::new(
                cuboid(Vec3::new(-0.7, -1.0, -2.4), Vec3::new(-0.1, 0.2, -1.8)),
                white,
            )
            .named("tall block"),
        )
        .with_object(
            ObjectDesc::new(
                sphere(Vec3::new(0.45, -0.65, -1.4), 0.35),
                MaterialDesc::Dielectric { ior: 1.5 },
            )
            .named("glass ball"),
        )
        .with_camera(CameraDesc {
            position: Vec3::new(0.0, 0.0, 1.4),
            look_at: Vec3::new(0.0, 0.0, -1.5),
            up: Vec3::Y,
            fov: 40.0,
            aspect: 1.0,
            aperture: 0.0,
            focus_dist: 3.0,
            projection: Projection::Perspective,
        })
        .with_background(BackgroundDesc {
            kind: BackgroundKind::Solid,
            intensity: 1.0,
            color: Some(Vec3::ZERO),
        })
}

fn sky_scene() -> SceneDescription {
    SceneDescription::new("sky")
        .with_object(
            ObjectDesc::new(
                ShapeDesc::Plane {
                    point: Vec3::new(0.0, -0.5, 0.0),
                    normal: Vec3::Y,
                },
                lambertian(0.4, 0.35, 0.3),
            )
            .named("ground"),
        )
        .with_object(
            ObjectDesc::new(
                sphere(Vec3::new(-0.6, 0.0, -1.5), 0.5),
                MaterialDesc::Dielectric { ior: 1.5 },
            )
            .named("glass"),
        )
        .with_object(
            ObjectDesc::new(
                sphere(Vec3::new(0.6, 0.0, -1.5), 0.5),
                MaterialDesc::Metal {
                    color: Vec3::splat(0.9),
                    roughness: 0.05,
                },
            )
            .named("chrome"),
        )
        .with_light(LightDesc::Directional {
            direction: Vec3::new(-0.5, -1.0, -0.3),
            color: Vec3::ONE,
            intensity: 1.0,
        })
        .with_camera(front_camera(70.0))
        .with_background(BackgroundDesc {
            kind: BackgroundKind::ProceduralSky,
            intensity: 1.0,
            color: None,
        })
}
