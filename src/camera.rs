//! Camera module for 3D rendering
//!
//! Euler-angle fly camera. `front`, `right` and `up` are derived from yaw
//! and pitch after every angle change; they are only written directly by
//! [`Camera::pin_pose`], which the bird's-eye view uses to force a fixed
//! overhead pose each frame.

use glam::{Mat4, Vec3};

/// Pitch is kept strictly inside this bound (degrees) so the basis never flips.
pub const PITCH_LIMIT: f32 = 89.0;
/// Zoom (vertical field of view, degrees) range.
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 45.0;

/// Movement directions understood by [`Camera::process_keyboard`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Camera state and controls
#[derive(Debug, Clone)]
pub struct Camera {
    /// Current position
    pub position: Vec3,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    world_up: Vec3,
    /// Horizontal rotation in degrees
    yaw: f32,
    /// Vertical rotation in degrees
    pitch: f32,
    /// Units per second
    pub movement_speed: f32,
    /// Degrees per unit of mouse offset
    pub mouse_sensitivity: f32,
    /// Field of view in degrees
    zoom: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Y, -90.0, 0.0)
    }
}

impl Camera {
    /// Create a camera at `position` looking along the direction given by `yaw`/`pitch`
    ///
    /// `world_up` is normalized; a zero vector falls back to +Y.
    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let world_up = world_up.normalize_or(Vec3::Y);
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: world_up,
            world_up,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            zoom: MAX_ZOOM,
            aspect: 800.0 / 600.0,
            near: 0.1,
            far: 100.0,
        };
        camera.update_vectors();
        camera
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the zoom, clamped to the supported range
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Projection with this camera's aspect and clip planes but an explicit field of view
    pub fn projection_with_fov(&self, fov_degrees: f32) -> Mat4 {
        Mat4::perspective_rh(fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Update aspect ratio (on window resize)
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Move along the camera basis; `Up`/`Down` use the world up axis so pitch has no effect
    pub fn process_keyboard(&mut self, direction: CameraMovement, elapsed: f32) {
        let velocity = self.movement_speed * elapsed;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
            CameraMovement::Up => self.position += self.world_up * velocity,
            CameraMovement::Down => self.position -= self.world_up * velocity,
        }
    }

    /// Apply a mouse offset. `y_offset` must already be flipped so that
    /// positive means "look up" (screen Y grows downward).
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_vectors();
    }

    /// Scroll narrows or widens the field of view
    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.set_zoom(self.zoom - y_offset);
    }

    /// Force position and orientation, bypassing yaw/pitch.
    ///
    /// `right` is re-derived from the given `front` and `up`; the stored angles
    /// are left untouched.
    pub fn pin_pose(&mut self, position: Vec3, front: Vec3, up: Vec3) {
        self.position = position;
        self.front = front.normalize();
        self.right = self.front.cross(up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    fn update_vectors(&mut self) {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();

        self.front = Vec3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

/// Uniform buffer data for camera (GPU-compatible)
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// Eye position in world space (w unused)
    pub position: [f32; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 4],
        }
    }

    pub fn update(&mut self, view: Mat4, projection: Mat4, eye: Vec3) {
        self.view = view.to_cols_array_2d();
        self.projection = projection.to_cols_array_2d();
        self.position = [eye.x, eye.y, eye.z, 1.0];
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}
