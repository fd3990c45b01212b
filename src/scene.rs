//! Scene module
//!
//! The fixed desk layout: which meshes exist, the parameters they are
//! generated from, where they sit and which texture they sample.

use crate::mesh::{create_panel, create_torus, create_truncated_cone, MeshData};
use glam::{Mat4, Vec3};

/// Parameters for [`create_truncated_cone`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeParams {
    pub base_radius: f32,
    pub top_radius: f32,
    pub height: f32,
    pub segments: u32,
}

/// Parameters for [`create_torus`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusParams {
    pub torus_radius: f32,
    pub tube_radius: f32,
    pub torus_segments: u32,
    pub tube_segments: u32,
}

/// Parameters for [`create_panel`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelParams {
    pub half_width: f32,
    pub half_depth: f32,
    pub half_thickness: f32,
}

pub const PANEL_HALF_THICKNESS: f32 = 0.01;

pub const CUP: ConeParams = ConeParams {
    base_radius: 0.4,
    top_radius: 0.5,
    height: 1.0,
    segments: 50,
};

pub const PEN: ConeParams = ConeParams {
    base_radius: 0.05,
    top_radius: 0.05,
    height: 1.0,
    segments: 50,
};

pub const HANDLE: TorusParams = TorusParams {
    torus_radius: 0.4,
    tube_radius: 0.05,
    torus_segments: 50,
    tube_segments: 20,
};

pub const GROUND: PanelParams = PanelParams {
    half_width: 3.0,
    half_depth: 3.0,
    half_thickness: PANEL_HALF_THICKNESS,
};

pub const PAPER_LARGE: PanelParams = PanelParams {
    half_width: 1.0,
    half_depth: 1.5,
    half_thickness: PANEL_HALF_THICKNESS,
};

pub const PAPER_SMALL: PanelParams = PanelParams {
    half_width: 0.333,
    half_depth: 0.5,
    half_thickness: PANEL_HALF_THICKNESS,
};

/// Height of the desk surface the papers rest on
const DESK_Y: f32 = -0.5;

impl ConeParams {
    pub fn generate(&self) -> MeshData {
        create_truncated_cone(self.base_radius, self.top_radius, self.height, self.segments)
    }
}

impl TorusParams {
    pub fn generate(&self) -> MeshData {
        create_torus(
            self.torus_radius,
            self.tube_radius,
            self.torus_segments,
            self.tube_segments,
        )
    }
}

impl PanelParams {
    pub fn generate(&self) -> MeshData {
        create_panel(self.half_width, self.half_depth, self.half_thickness)
    }
}

/// Texture bound to the diffuse slot while drawing an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Marble,
    Wood,
    Paper,
    Pen,
}

impl TextureSlot {
    pub fn all() -> [TextureSlot; 4] {
        [
            TextureSlot::Marble,
            TextureSlot::Wood,
            TextureSlot::Paper,
            TextureSlot::Pen,
        ]
    }
}

/// One drawable object in the scene
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: &'static str,
    pub mesh: MeshData,
    pub model: Mat4,
    pub texture: TextureSlot,
}

/// Generate every mesh and pair it with its model transform
pub fn build_scene() -> Vec<SceneObject> {
    let quarter = 90f32.to_radians();
    let paper_step = 2.0 * PANEL_HALF_THICKNESS;

    vec![
        SceneObject {
            name: "ground",
            mesh: GROUND.generate(),
            // Top face flush with the desk height
            model: Mat4::from_rotation_y(quarter)
                * Mat4::from_translation(Vec3::new(0.0, DESK_Y - GROUND.half_thickness, 0.0)),
            texture: TextureSlot::Wood,
        },
        SceneObject {
            name: "cup",
            mesh: CUP.generate(),
            model: Mat4::from_translation(Vec3::new(-1.0, 0.0, -1.0)),
            texture: TextureSlot::Marble,
        },
        SceneObject {
            name: "handle",
            mesh: HANDLE.generate(),
            model: Mat4::from_rotation_x(quarter)
                * Mat4::from_translation(Vec3::new(-0.5, -1.0, 0.0)),
            texture: TextureSlot::Marble,
        },
        SceneObject {
            name: "paper (large)",
            mesh: PAPER_LARGE.generate(),
            model: Mat4::from_translation(Vec3::new(1.0, DESK_Y, 0.0)),
            texture: TextureSlot::Paper,
        },
        SceneObject {
            name: "paper (stacked)",
            mesh: PAPER_SMALL.generate(),
            model: Mat4::from_translation(Vec3::new(1.0, DESK_Y + paper_step, 0.0)),
            texture: TextureSlot::Paper,
        },
        SceneObject {
            name: "paper (left)",
            mesh: PAPER_SMALL.generate(),
            model: Mat4::from_translation(Vec3::new(-0.5, DESK_Y, 1.0)),
            texture: TextureSlot::Paper,
        },
        SceneObject {
            name: "paper (far left)",
            mesh: PAPER_SMALL.generate(),
            model: Mat4::from_translation(Vec3::new(-1.5, DESK_Y, 1.0)),
            texture: TextureSlot::Paper,
        },
        SceneObject {
            name: "pen",
            mesh: PEN.generate(),
            model: Mat4::from_rotation_x(quarter)
                * Mat4::from_translation(Vec3::new(-2.0, 0.7, 0.45)),
            texture: TextureSlot::Pen,
        },
    ]
}
