//! Per-pixel color finishing and the denoise post-pass.

use crate::{RenderConfig, ToneMapping};
use raycast_math::Color;

/// Map linear radiance to a displayable range.
pub fn tone_map(color: Color, operator: ToneMapping, exposure: f32) -> Color {
    let c = color * exposure;
    match operator {
        ToneMapping::Reinhard => c / (Color::ONE + c),
        ToneMapping::Aces => aces_film(c),
        // Left unclamped; gamma correction drops negatives and quantization clamps
        ToneMapping::Linear => c,
    }
}

/// Narkowicz's rational fit of the ACES filmic curve.
fn aces_film(x: Color) -> Color {
    const A: f32 = 2.51;
    const B: f32 = 0.03;
    const C: f32 = 2.43;
    const D: f32 = 0.59;
    const E: f32 = 0.14;
    let map = |x: f32| ((x * (A * x + B)) / (x * (C * x + D) + E)).clamp(0.0, 1.0);
    Color::new(map(x.x), map(x.y), map(x.z))
}

/// `color^(1/gamma)` per channel, with negatives clamped to zero first.
#[inline]
pub fn gamma_correct(color: Color, gamma: f32) -> Color {
    let inv = 1.0 / gamma;
    let map = |c: f32| if c > 0.0 { c.powf(inv) } else { 0.0 };
    Color::new(map(color.x), map(color.y), map(color.z))
}

/// Tone map then gamma correct, as configured.
pub fn finish_color(color: Color, config: &RenderConfig) -> Color {
    gamma_correct(
        tone_map(color, config.tone_mapping, config.exposure),
        config.gamma,
    )
}

/// Convert a display-space color to 8-bit RGBA.
pub fn to_rgba8(color: Color) -> [u8; 4] {
    let q = |c: f32| (255.0 * c.clamp(0.0, 1.0)).round() as u8;
    [q(color.x), q(color.y), q(color.z), 255]
}

/// 3x3 Gaussian blur of a `width * height` row-major buffer.
///
/// Weights are `exp(-(dx²+dy²) / (2·strength²))`, normalized to sum to one.
/// Neighbours past the edge reuse the nearest edge pixel.
pub fn denoise(pixels: &[Color], width: u32, height: u32, strength: f32) -> Vec<Color> {
    let (w, h) = (width as i64, height as i64);
    if pixels.len() as i64 != w * h || pixels.is_empty() {
        return pixels.to_vec();
    }

    let two_sigma_sq = 2.0 * strength * strength;
    let mut kernel = [[0.0f32; 3]; 3];
    let mut total = 0.0;
    for (dy, row) in kernel.iter_mut().enumerate() {
        for (dx, weight) in row.iter_mut().enumerate() {
            let (ox, oy) = (dx as f32 - 1.0, dy as f32 - 1.0);
            *weight = (-(ox * ox + oy * oy) / two_sigma_sq).exp();
            total += *weight;
        }
    }

    let mut out = Vec::with_capacity(pixels.len());
    for y in 0..h {
        for x in 0..w {
            let mut sum = Color::ZERO;
            for (dy, row) in kernel.iter().enumerate() {
                let sy = (y + dy as i64 - 1).clamp(0, h - 1);
                for (dx, weight) in row.iter().enumerate() {
                    let sx = (x + dx as i64 - 1).clamp(0, w - 1);
                    sum += pixels[(sy * w + sx) as usize] * *weight;
                }
            }
            out.push(sum / total);
        }
    }
    out
}
