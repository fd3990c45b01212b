//! Lighting module
//!
//! GPU layout of the fixed Phong rig: one directional light, up to
//! [`MAX_POINT_LIGHTS`] point lights and a spotlight that follows the camera.
//! Every member is padded out to a `vec4` so the struct matches the WGSL
//! uniform block without manual alignment bookkeeping.

use crate::config::LightingConfig;
use glam::Vec3;

/// Maximum number of point lights
pub const MAX_POINT_LIGHTS: usize = 4;

fn vec4(v: Vec3, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DirectionalLightRaw {
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightRaw {
    pub position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// constant, linear, quadratic, unused
    pub attenuation: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpotLightRaw {
    pub position: [f32; 4],
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// constant, linear, quadratic, unused
    pub attenuation: [f32; 4],
    /// cos(inner), cos(outer), unused, unused
    pub cut_off: [f32; 4],
}

/// Lighting uniform buffer data
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    pub directional: DirectionalLightRaw,
    pub point_lights: [PointLightRaw; MAX_POINT_LIGHTS],
    pub spot: SpotLightRaw,
    /// shininess, unused x3
    pub material: [f32; 4],
    /// number of active point lights, unused x3
    pub counts: [u32; 4],
}

impl LightingUniform {
    pub fn from_config(config: &LightingConfig) -> Self {
        let dir = &config.directional;
        let directional = DirectionalLightRaw {
            direction: vec4(dir.direction, 0.0),
            ambient: vec4(dir.ambient, 0.0),
            diffuse: vec4(dir.diffuse, 0.0),
            specular: vec4(dir.specular, 0.0),
        };

        let mut point_lights = [PointLightRaw::default(); MAX_POINT_LIGHTS];
        let active = config.point_lights.len().min(MAX_POINT_LIGHTS);
        if config.point_lights.len() > MAX_POINT_LIGHTS {
            log::warn!(
                "{} point lights configured, only the first {} are used",
                config.point_lights.len(),
                MAX_POINT_LIGHTS
            );
        }
        for (raw, light) in point_lights.iter_mut().zip(&config.point_lights) {
            *raw = PointLightRaw {
                position: vec4(light.position, 1.0),
                ambient: vec4(light.ambient, 0.0),
                diffuse: vec4(light.diffuse, 0.0),
                specular: vec4(light.specular, 0.0),
                attenuation: [light.constant, light.linear, light.quadratic, 0.0],
            };
        }

        let spot = &config.spot;
        let spot = SpotLightRaw {
            position: [0.0, 0.0, 0.0, 1.0],
            direction: [0.0, 0.0, -1.0, 0.0],
            ambient: vec4(spot.ambient, 0.0),
            diffuse: vec4(spot.diffuse, 0.0),
            specular: vec4(spot.specular, 0.0),
            attenuation: [spot.constant, spot.linear, spot.quadratic, 0.0],
            cut_off: [
                spot.cut_off.to_radians().cos(),
                spot.outer_cut_off.to_radians().cos(),
                0.0,
                0.0,
            ],
        };

        Self {
            directional,
            point_lights,
            spot,
            material: [config.shininess, 0.0, 0.0, 0.0],
            counts: [active as u32, 0, 0, 0],
        }
    }

    /// Attach the spotlight to the viewer
    pub fn set_spotlight(&mut self, position: Vec3, direction: Vec3) {
        self.spot.position = vec4(position, 1.0);
        self.spot.direction = vec4(direction, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PointLightConfig;

    #[test]
    fn test_uniform_is_vec4_aligned() {
        assert_eq!(std::mem::size_of::<LightingUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<PointLightRaw>(), 80);
        assert_eq!(std::mem::size_of::<SpotLightRaw>(), 112);
    }

    #[test]
    fn test_default_rig() {
        let uniform = LightingUniform::from_config(&LightingConfig::default());
        assert_eq!(uniform.counts[0], 4);
        assert_eq!(uniform.material[0], 32.0);
        assert_eq!(uniform.directional.direction, [-0.2, -1.0, -0.3, 0.0]);
        assert_eq!(uniform.point_lights[3].position, [0.0, 0.0, -3.0, 1.0]);
        assert_eq!(uniform.point_lights[0].attenuation, [1.0, 0.09, 0.032, 0.0]);
        assert!((uniform.spot.cut_off[0] - 12.5f32.to_radians().cos()).abs() < 1e-6);
        assert!(uniform.spot.cut_off[0] > uniform.spot.cut_off[1]);
    }

    #[test]
    fn test_extra_point_lights_dropped() {
        let mut config = LightingConfig::default();
        config.point_lights.push(PointLightConfig {
            position: Vec3::splat(9.0),
            ..Default::default()
        });
        let uniform = LightingUniform::from_config(&config);
        assert_eq!(uniform.counts[0], MAX_POINT_LIGHTS as u32);
        assert!(uniform.point_lights.iter().all(|l| l.position[0] != 9.0));
    }

    #[test]
    fn test_fewer_point_lights() {
        let mut config = LightingConfig::default();
        config.point_lights.truncate(1);
        let uniform = LightingUniform::from_config(&config);
        assert_eq!(uniform.counts[0], 1);
        assert_eq!(uniform.point_lights[1].position, [0.0; 4]);
    }

    #[test]
    fn test_spotlight_follows_camera() {
        let mut uniform = LightingUniform::from_config(&LightingConfig::default());
        uniform.set_spotlight(Vec3::new(1.0, 2.0, 3.0), Vec3::NEG_Z);
        assert_eq!(uniform.spot.position, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(uniform.spot.direction, [0.0, 0.0, -1.0, 0.0]);
    }
}
