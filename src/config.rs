//! Configuration module
//!
//! Process-wide settings for the window, cameras, lighting rig and
//! textures. Defaults reproduce the stock desk scene; any subset can be
//! overridden from `<config dir>/desk-scene/config.json`.

use glam::Vec3;
use log::{info, warn};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Global configuration, loaded on first access
pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::load);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub bird_eye: BirdEyeConfig,
    pub travel: TravelConfig,
    pub lighting: LightingConfig,
    pub textures: TextureConfig,
    pub colors: ColorConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Desk Scene".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// First-person camera start state
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub world_up: Vec3,
    /// Degrees
    pub yaw: f32,
    /// Degrees
    pub pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees
    pub zoom: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            world_up: Vec3::Y,
            yaw: -90.0,
            pitch: 0.0,
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            zoom: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Fixed overhead pose re-applied every frame while bird's-eye view is active
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BirdEyeConfig {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
}

impl Default for BirdEyeConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, 0.0),
            front: Vec3::NEG_Y,
            up: Vec3::NEG_Z,
        }
    }
}

/// Scroll-tunable multiplier applied to horizontal keyboard movement
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TravelConfig {
    pub initial_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub scroll_step: f32,
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self {
            initial_speed: 1.5,
            min_speed: 1.0,
            max_speed: 10.0,
            scroll_step: 0.1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DirectionalLightConfig {
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PointLightConfig {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for PointLightConfig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            ambient: Vec3::splat(0.05),
            diffuse: Vec3::splat(0.8),
            specular: Vec3::ONE,
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        }
    }
}

/// Camera-attached spotlight
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpotLightConfig {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    /// Inner cone half-angle in degrees
    pub cut_off: f32,
    /// Outer cone half-angle in degrees
    pub outer_cut_off: f32,
}

impl Default for SpotLightConfig {
    fn default() -> Self {
        Self {
            ambient: Vec3::new(0.0, 0.0, 0.1),
            diffuse: Vec3::new(0.0, 0.0, 0.5),
            specular: Vec3::new(0.0, 0.0, 0.5),
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
            cut_off: 12.5,
            outer_cut_off: 15.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub directional: DirectionalLightConfig,
    pub point_lights: Vec<PointLightConfig>,
    pub spot: SpotLightConfig,
    pub shininess: f32,
}

impl Default for DirectionalLightConfig {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-0.2, -1.0, -0.3),
            ambient: Vec3::splat(0.05),
            diffuse: Vec3::splat(0.4),
            specular: Vec3::splat(0.5),
        }
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        let point_lights = [
            Vec3::new(0.7, 0.2, 2.0),
            Vec3::new(2.3, -3.3, -4.0),
            Vec3::new(-4.0, 2.0, -12.0),
            Vec3::new(0.0, 0.0, -3.0),
        ]
        .into_iter()
        .map(|position| PointLightConfig {
            position,
            ..Default::default()
        })
        .collect();

        Self {
            directional: DirectionalLightConfig::default(),
            point_lights,
            spot: SpotLightConfig::default(),
            shininess: 32.0,
        }
    }
}

/// Texture file names, resolved against `directory`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub directory: PathBuf,
    pub marble: String,
    pub wood: String,
    pub paper: String,
    pub pen: String,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("assets"),
            marble: "marbleTex.jpg".to_string(),
            wood: "woodTex.jpg".to_string(),
            paper: "paperTex.jpg".to_string(),
            pen: "penTex.jpg".to_string(),
        }
    }
}

impl TextureConfig {
    pub fn path(&self, file: &str) -> PathBuf {
        self.directory.join(file)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Clear color (RGB hex)
    pub background: u32,
    /// HUD text color (RGB hex)
    pub hud_text: u32,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: 0x1a1a1a,
            hud_text: 0xe5e5e5,
        }
    }
}

impl Config {
    /// Location of the optional override file
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("desk-scene").join("config.json"))
    }

    /// Load overrides from the config file, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Self::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Convert hex color to RGB floats (0.0 - 1.0)
pub fn hex_to_rgb(hex: u32) -> (f32, f32, f32) {
    let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
    let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
    let b = (hex & 0xFF) as f32 / 255.0;
    (r, g, b)
}
