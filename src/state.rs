//! Application state module
//!
//! Everything the frame loop mutates lives in [`AppState`]: both cameras,
//! frame timing, the mouse reference point, the travel speed and the
//! view-mode flags. Window callbacks write into it; `App::update` reads it
//! once per frame.

use crate::camera::{Camera, CameraMovement};
use crate::config::{Config, TravelConfig};
use glam::{Mat4, Vec3};
use log::info;
use std::collections::HashSet;
use std::time::Instant;
use winit::keyboard::KeyCode;

/// Per-frame wall-clock timing
#[derive(Debug, Clone, Copy)]
pub struct FrameTimer {
    last_frame: Instant,
    delta: f32,
}

impl FrameTimer {
    pub fn new(now: Instant) -> Self {
        Self {
            last_frame: now,
            delta: 0.0,
        }
    }

    /// Record a new frame and return the seconds elapsed since the previous one
    pub fn tick(&mut self, now: Instant) -> f32 {
        self.delta = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.delta
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }
}

/// Turns absolute cursor positions into look offsets.
///
/// The reference point is seeded from the first position seen, so the first
/// event never produces a jump.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseTracker {
    last: Option<(f32, f32)>,
}

impl MouseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `(x_offset, y_offset)` with Y flipped so that moving up is positive
    pub fn offset(&mut self, x: f32, y: f32) -> (f32, f32) {
        let (last_x, last_y) = self.last.unwrap_or((x, y));
        self.last = Some((x, y));
        (x - last_x, last_y - y)
    }

    /// Forget the reference point, e.g. after the cursor was re-grabbed
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Scroll-tuned multiplier for horizontal keyboard movement
#[derive(Debug, Clone, Copy)]
pub struct TravelSpeed {
    value: f32,
    min: f32,
    max: f32,
    step: f32,
}

impl TravelSpeed {
    pub fn new(config: &TravelConfig) -> Self {
        Self {
            value: config.initial_speed.clamp(config.min_speed, config.max_speed),
            min: config.min_speed,
            max: config.max_speed,
            step: config.scroll_step,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn scroll(&mut self, y_offset: f32) {
        self.value = (self.value + y_offset * self.step).clamp(self.min, self.max);
    }
}

/// Which camera drives the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    FirstPerson,
    BirdEye,
}

impl ViewMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            ViewMode::FirstPerson => "First person",
            ViewMode::BirdEye => "Bird's eye",
        }
    }
}

const MOVE_BINDINGS: [(KeyCode, CameraMovement); 6] = [
    (KeyCode::KeyW, CameraMovement::Forward),
    (KeyCode::KeyS, CameraMovement::Backward),
    (KeyCode::KeyA, CameraMovement::Left),
    (KeyCode::KeyD, CameraMovement::Right),
    (KeyCode::KeyQ, CameraMovement::Up),
    (KeyCode::KeyE, CameraMovement::Down),
];

pub const BIRD_EYE_KEY: KeyCode = KeyCode::KeyP;
pub const HUD_KEY: KeyCode = KeyCode::KeyH;

/// Main application state
pub struct AppState {
    pub camera: Camera,
    pub bird_eye_camera: Camera,
    pub view_mode: ViewMode,
    pub timer: FrameTimer,
    pub mouse: MouseTracker,
    pub travel: TravelSpeed,
    pub show_hud: bool,
    pub should_close: bool,
    held_keys: HashSet<KeyCode>,
    /// Cursor captured by the window (locked or confined)
    pointer_grabbed: bool,
    bird_eye_pose: (Vec3, Vec3, Vec3),
    /// Bird's-eye toggle fires once per press and re-arms on release
    bird_eye_key_latched: bool,
}

impl AppState {
    pub fn new(config: &Config, aspect: f32, now: Instant) -> Self {
        let cam = &config.camera;
        let mut camera = Camera::new(cam.position, cam.world_up, cam.yaw, cam.pitch);
        camera.movement_speed = cam.movement_speed;
        camera.mouse_sensitivity = cam.mouse_sensitivity;
        camera.set_zoom(cam.zoom);
        camera.near = cam.near;
        camera.far = cam.far;
        camera.set_aspect(aspect);

        let bird_eye_camera = camera.clone();

        Self {
            camera,
            bird_eye_camera,
            view_mode: ViewMode::FirstPerson,
            timer: FrameTimer::new(now),
            mouse: MouseTracker::new(),
            travel: TravelSpeed::new(&config.travel),
            show_hud: true,
            should_close: false,
            held_keys: HashSet::new(),
            pointer_grabbed: false,
            bird_eye_pose: (
                config.bird_eye.position,
                config.bird_eye.front,
                config.bird_eye.up,
            ),
            bird_eye_key_latched: false,
        }
    }

    /// Camera that receives keyboard movement
    pub fn active_camera_mut(&mut self) -> &mut Camera {
        match self.view_mode {
            ViewMode::FirstPerson => &mut self.camera,
            ViewMode::BirdEye => &mut self.bird_eye_camera,
        }
    }

    pub fn active_camera(&self) -> &Camera {
        match self.view_mode {
            ViewMode::FirstPerson => &self.camera,
            ViewMode::BirdEye => &self.bird_eye_camera,
        }
    }

    /// Record a key transition from the window
    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.held_keys.insert(key);
            match key {
                KeyCode::Escape => self.should_close = true,
                HUD_KEY => self.show_hud = !self.show_hud,
                _ => {}
            }
        } else {
            self.held_keys.remove(&key);
        }
    }

    /// egui only drains its input while the HUD runs, so hidden HUDs get none
    pub fn hud_accepts_input(&self) -> bool {
        self.show_hud
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held_keys.contains(&key)
    }

    /// Drop all held keys, e.g. when the window loses focus
    pub fn release_all_keys(&mut self) {
        self.held_keys.clear();
    }

    /// Grabbed pointers look with raw deltas; free ones with cursor positions
    pub fn set_pointer_grabbed(&mut self, grabbed: bool) {
        self.pointer_grabbed = grabbed;
        self.mouse.reset();
    }

    /// Absolute cursor position, only used while the pointer is free
    pub fn cursor_moved(&mut self, x: f32, y: f32) {
        if self.pointer_grabbed {
            return;
        }
        let (dx, dy) = self.mouse.offset(x, y);
        self.camera.process_mouse_movement(dx, dy, true);
    }

    /// Raw device delta, only used while the pointer is grabbed; screen Y grows downward
    pub fn mouse_motion(&mut self, dx: f32, dy: f32) {
        if !self.pointer_grabbed {
            return;
        }
        self.camera.process_mouse_movement(dx, -dy, true);
    }

    /// Scroll tunes travel speed; with `zoom` held it changes the field of view instead
    pub fn scroll(&mut self, y_offset: f32, zoom: bool) {
        if zoom {
            self.camera.process_mouse_scroll(y_offset);
        } else {
            self.travel.scroll(y_offset);
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.set_aspect(aspect);
        self.bird_eye_camera.set_aspect(aspect);
    }

    /// Once-per-frame step: advance timing, apply held keys, pin the overhead pose
    pub fn update(&mut self, now: Instant) {
        let dt = self.timer.tick(now);
        self.process_input(dt);
        if self.view_mode == ViewMode::BirdEye {
            let (position, front, up) = self.bird_eye_pose;
            self.bird_eye_camera.pin_pose(position, front, up);
        }
    }

    fn process_input(&mut self, dt: f32) {
        if self.is_held(BIRD_EYE_KEY) {
            if !self.bird_eye_key_latched {
                self.view_mode = match self.view_mode {
                    ViewMode::FirstPerson => ViewMode::BirdEye,
                    ViewMode::BirdEye => ViewMode::FirstPerson,
                };
                self.bird_eye_key_latched = true;
                info!("View mode: {}", self.view_mode.display_name());
            }
        } else {
            self.bird_eye_key_latched = false;
        }

        let travel = self.travel.value();
        for (key, movement) in MOVE_BINDINGS {
            if !self.held_keys.contains(&key) {
                continue;
            }
            let elapsed = match movement {
                CameraMovement::Up | CameraMovement::Down => dt,
                _ => dt * travel,
            };
            self.active_camera_mut().process_keyboard(movement, elapsed);
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.active_camera().view_matrix()
    }

    /// Projection always follows the first-person camera's zoom
    pub fn projection_matrix(&self) -> Mat4 {
        self.active_camera().projection_with_fov(self.camera.zoom())
    }

    /// Eye position used for specular lighting
    pub fn eye_position(&self) -> Vec3 {
        self.active_camera().position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const EPS: f32 = 1e-4;

    fn state(now: Instant) -> AppState {
        AppState::new(&Config::default(), 800.0 / 600.0, now)
    }

    #[test]
    fn test_frame_timer_delta() {
        let start = Instant::now();
        let mut timer = FrameTimer::new(start);
        let dt = timer.tick(start + Duration::from_millis(250));
        assert!((dt - 0.25).abs() < 1e-6);
        let dt = timer.tick(start + Duration::from_millis(300));
        assert!((dt - 0.05).abs() < 1e-6);
        assert_eq!(timer.delta(), dt);
    }

    #[test]
    fn test_mouse_tracker_seeds_on_first_event() {
        let mut mouse = MouseTracker::new();
        assert_eq!(mouse.offset(640.0, 480.0), (0.0, 0.0));
        assert_eq!(mouse.offset(650.0, 470.0), (10.0, 10.0));
        mouse.reset();
        assert_eq!(mouse.offset(0.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn test_first_cursor_event_does_not_rotate() {
        let now = Instant::now();
        let mut app = state(now);
        let front = app.camera.front();
        app.cursor_moved(1000.0, 20.0);
        assert!((app.camera.front() - front).length() < EPS);
    }

    #[test]
    fn test_travel_speed_clamped() {
        let mut travel = TravelSpeed::new(&TravelConfig::default());
        assert_eq!(travel.value(), 1.5);
        travel.scroll(5.0);
        assert!((travel.value() - 2.0).abs() < EPS);
        travel.scroll(1000.0);
        assert_eq!(travel.value(), 10.0);
        travel.scroll(-1000.0);
        assert_eq!(travel.value(), 1.0);
    }

    #[test]
    fn test_scroll_routes_to_zoom_or_travel() {
        let mut app = state(Instant::now());
        app.scroll(2.0, true);
        assert_eq!(app.camera.zoom(), 43.0);
        assert_eq!(app.travel.value(), 1.5);
        app.scroll(2.0, false);
        assert!((app.travel.value() - 1.7).abs() < EPS);
        assert_eq!(app.camera.zoom(), 43.0);
    }

    #[test]
    fn test_forward_scaled_by_travel_speed() {
        let start = Instant::now();
        let mut app = state(start);
        app.set_key(KeyCode::KeyW, true);
        app.update(start + Duration::from_secs(1));
        let moved = app.camera.position - Vec3::new(0.0, 0.0, 3.0);
        assert!((moved.length() - 2.5 * 1.5).abs() < EPS);
        assert!(moved.z < 0.0);
    }

    #[test]
    fn test_vertical_ignores_travel_speed() {
        let start = Instant::now();
        let mut app = state(start);
        app.set_key(KeyCode::KeyQ, true);
        app.update(start + Duration::from_secs(1));
        assert!((app.camera.position.y - 2.5).abs() < EPS);
        app.set_key(KeyCode::KeyQ, false);
        app.set_key(KeyCode::KeyE, true);
        app.update(start + Duration::from_secs(2));
        assert!(app.camera.position.y.abs() < EPS);
    }

    #[test]
    fn test_bird_eye_toggle_is_edge_triggered() {
        let start = Instant::now();
        let mut app = state(start);
        app.set_key(BIRD_EYE_KEY, true);
        app.update(start + Duration::from_millis(16));
        assert_eq!(app.view_mode, ViewMode::BirdEye);
        app.update(start + Duration::from_millis(32));
        assert_eq!(app.view_mode, ViewMode::BirdEye);
        app.set_key(BIRD_EYE_KEY, false);
        app.update(start + Duration::from_millis(48));
        app.set_key(BIRD_EYE_KEY, true);
        app.update(start + Duration::from_millis(64));
        assert_eq!(app.view_mode, ViewMode::FirstPerson);
    }

    #[test]
    fn test_bird_eye_pose_pinned_every_frame() {
        let start = Instant::now();
        let mut app = state(start);
        app.view_mode = ViewMode::BirdEye;
        app.set_key(KeyCode::KeyD, true);
        app.update(start + Duration::from_secs(1));
        assert_eq!(app.bird_eye_camera.position, Vec3::new(0.0, 10.0, 0.0));
        assert!((app.bird_eye_camera.front() - Vec3::NEG_Y).length() < EPS);
        assert_eq!(app.camera.position, Vec3::new(0.0, 0.0, 3.0));

        let overhead = app.view_matrix().transform_point3(Vec3::ZERO);
        assert!((overhead - Vec3::new(0.0, 0.0, -10.0)).length() < EPS);
    }

    #[test]
    fn test_projection_uses_first_person_zoom() {
        let mut app = state(Instant::now());
        app.scroll(20.0, true);
        app.view_mode = ViewMode::BirdEye;
        assert_eq!(
            app.projection_matrix(),
            app.bird_eye_camera.projection_with_fov(app.camera.zoom())
        );
        assert_eq!(app.camera.zoom(), 25.0);
    }

    #[test]
    fn test_mouse_look_always_drives_first_person() {
        let mut app = state(Instant::now());
        app.set_pointer_grabbed(true);
        app.view_mode = ViewMode::BirdEye;
        let before = app.bird_eye_camera.front();
        app.mouse_motion(100.0, 0.0);
        assert!((app.bird_eye_camera.front() - before).length() < EPS);
        assert!((app.camera.yaw() - (-80.0)).abs() < EPS);
    }

    #[test]
    fn test_grabbed_pointer_looks_with_raw_deltas() {
        let mut app = state(Instant::now());
        app.set_pointer_grabbed(true);
        // Cursor positions are pinned at the window edge while grabbed
        app.cursor_moved(0.0, 0.0);
        app.cursor_moved(800.0, 0.0);
        assert!((app.camera.yaw() - (-90.0)).abs() < EPS);

        for _ in 0..36 {
            app.mouse_motion(100.0, 0.0);
        }
        assert!((app.camera.yaw() - 270.0).abs() < 1e-2);
    }

    #[test]
    fn test_free_pointer_looks_with_cursor_positions() {
        let mut app = state(Instant::now());
        assert!(!app.pointer_grabbed);
        app.mouse_motion(100.0, 0.0);
        assert!((app.camera.yaw() - (-90.0)).abs() < EPS);

        app.cursor_moved(400.0, 300.0);
        app.cursor_moved(500.0, 300.0);
        assert!((app.camera.yaw() - (-80.0)).abs() < EPS);

        // Releasing the grab reseeds the tracker
        app.set_pointer_grabbed(true);
        app.set_pointer_grabbed(false);
        app.cursor_moved(0.0, 0.0);
        assert!((app.camera.yaw() - (-80.0)).abs() < EPS);
    }

    #[test]
    fn test_escape_requests_close() {
        let mut app = state(Instant::now());
        assert!(!app.should_close);
        app.set_key(KeyCode::Escape, true);
        assert!(app.should_close);
    }

    #[test]
    fn test_hud_toggle() {
        let mut app = state(Instant::now());
        assert!(app.show_hud);
        app.set_key(HUD_KEY, true);
        app.set_key(HUD_KEY, false);
        assert!(!app.show_hud);
        assert!(!app.hud_accepts_input());
        app.set_key(HUD_KEY, true);
        assert!(app.hud_accepts_input());
    }
}
