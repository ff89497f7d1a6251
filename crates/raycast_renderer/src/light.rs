//! Analytic light sources.
//!
//! Lights are carried on the `World` for inspection but the integrator does
//! not sample them: emissive surfaces and the background are the only
//! sources of radiance in a render.

use raycast_core::LightDesc;
use raycast_math::{safe_normalize, Color, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Point {
        position: Vec3,
        color: Color,
        intensity: f32,
    },
    /// Infinitely distant light travelling along `direction` (unit length).
    Directional {
        direction: Vec3,
        color: Color,
        intensity: f32,
    },
}

impl Light {
    pub fn kind(&self) -> &'static str {
        match self {
            Light::Point { .. } => "point",
            Light::Directional { .. } => "directional",
        }
    }

    /// Color scaled by intensity.
    pub fn radiance(&self) -> Color {
        match *self {
            Light::Point {
                color, intensity, ..
            }
            | Light::Directional {
                color, intensity, ..
            } => color * intensity,
        }
    }
}

impl From<&LightDesc> for Light {
    fn from(desc: &LightDesc) -> Self {
        match *desc {
            LightDesc::Point {
                position,
                color,
                intensity,
            } => Light::Point {
                position,
                color,
                intensity,
            },
            LightDesc::Directional {
                direction,
                color,
                intensity,
            } => Light::Directional {
                direction: safe_normalize(direction),
                color,
                intensity,
            },
        }
    }
}
