//! Per-render settings.
//!
//! Deserializes from the same camelCase JSON the interactive front end sends,
//! with every field optional.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::RenderError;

/// Tone-mapping operator applied before gamma correction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneMapping {
    #[default]
    Reinhard,
    Aces,
    Linear,
}

/// How sample positions are chosen within a pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AntiAliasing {
    /// Uniform jitter over the pixel square
    #[default]
    Supersampling,
    /// Polar-disk jitter within half a pixel of the center
    Stochastic,
    /// One sample at the pixel center
    #[serde(rename = "none")]
    Off,
}

/// Procedural texture used for Lambertian albedo when textures are enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureKind {
    #[default]
    Checker,
    Noise,
    Marble,
    Wood,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// Maximum ray bounce depth
    pub max_bounces: u32,
    /// Samples per pixel (ignored when anti-aliasing is off)
    pub samples: u32,
    pub gamma: f32,
    pub exposure: f32,
    pub tone_mapping: ToneMapping,
    pub anti_aliasing: AntiAliasing,
    /// Blur the finished frame with a 3x3 Gaussian
    pub denoising: bool,
    pub denoise_strength: f32,
    pub enable_textures: bool,
    pub texture_type: TextureKind,
    pub texture_scale: f32,
    /// Time spent on one row before yielding to other threads
    pub row_time_budget_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_bounces: 5,
            samples: 4,
            gamma: 2.2,
            exposure: 1.0,
            tone_mapping: ToneMapping::Reinhard,
            anti_aliasing: AntiAliasing::Supersampling,
            denoising: false,
            denoise_strength: 1.0,
            enable_textures: false,
            texture_type: TextureKind::Checker,
            texture_scale: 10.0,
            row_time_budget_ms: 16,
        }
    }
}

impl RenderConfig {
    /// Check the numeric ranges a render depends on.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.max_bounces < 1 {
            return Err(RenderError::InvalidConfig(
                "maxBounces must be at least 1".into(),
            ));
        }
        if self.samples < 1 {
            return Err(RenderError::InvalidConfig("samples must be at least 1".into()));
        }
        let positive = [
            ("gamma", self.gamma),
            ("exposure", self.exposure),
            ("denoiseStrength", self.denoise_strength),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(RenderError::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Samples actually taken per pixel.
    pub fn effective_samples(&self) -> u32 {
        match self.anti_aliasing {
            AntiAliasing::Off => 1,
            _ => self.samples.max(1),
        }
    }

    pub fn row_time_budget(&self) -> Duration {
        Duration::from_millis(self.row_time_budget_ms)
    }
}

/// Error for an unrecognized option name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption {
    kind: &'static str,
    value: String,
}

impl fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownOption {}

macro_rules! named_options {
    ($ty:ty, $kind:literal, { $($name:literal => $variant:expr),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($name => Ok($variant),)+
                    _ => Err(UnknownOption {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

named_options!(ToneMapping, "tone mapping", {
    "reinhard" => ToneMapping::Reinhard,
    "aces" => ToneMapping::Aces,
    "linear" => ToneMapping::Linear,
});

named_options!(AntiAliasing, "anti-aliasing mode", {
    "supersampling" => AntiAliasing::Supersampling,
    "stochastic" => AntiAliasing::Stochastic,
    "none" => AntiAliasing::Off,
    "off" => AntiAliasing::Off,
});

named_options!(TextureKind, "texture type", {
    "checker" => TextureKind::Checker,
    "noise" => TextureKind::Noise,
    "marble" => TextureKind::Marble,
    "wood" => TextureKind::Wood,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.effective_samples(), 4);
        assert_eq!(config.row_time_budget(), Duration::from_millis(16));
    }

    #[test]
    fn test_partial_json() {
        let config: RenderConfig = serde_json::from_str(
            r#"{"maxBounces": 2, "antiAliasing": "none", "toneMapping": "aces", "textureType": "wood"}"#,
        )
        .unwrap();
        assert_eq!(config.max_bounces, 2);
        assert_eq!(config.anti_aliasing, AntiAliasing::Off);
        assert_eq!(config.tone_mapping, ToneMapping::Aces);
        assert_eq!(config.texture_type, TextureKind::Wood);
        assert_eq!(config.samples, 4);
        assert_eq!(config.effective_samples(), 1);
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let json = serde_json::to_string(&RenderConfig::default()).unwrap();
        assert!(json.contains("\"maxBounces\":5"));
        assert!(json.contains("\"antiAliasing\":\"supersampling\""));
        assert!(json.contains("\"rowTimeBudgetMs\":16"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases = [
            RenderConfig {
                max_bounces: 0,
                ..Default::default()
            },
            RenderConfig {
                samples: 0,
                ..Default::default()
            },
            RenderConfig {
                gamma: 0.0,
                ..Default::default()
            },
            RenderConfig {
                exposure: -1.0,
                ..Default::default()
            },
            RenderConfig {
                denoise_strength: f32::NAN,
                ..Default::default()
            },
        ];
        for config in cases {
            assert!(matches!(
                config.validate(),
                Err(RenderError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("ACES".parse::<ToneMapping>().unwrap(), ToneMapping::Aces);
        assert_eq!("none".parse::<AntiAliasing>().unwrap(), AntiAliasing::Off);
        assert_eq!("Marble".parse::<TextureKind>().unwrap(), TextureKind::Marble);

        let err = "bilinear".parse::<TextureKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown texture type 'bilinear'");
    }
}
