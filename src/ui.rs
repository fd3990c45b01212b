//! HUD overlay using egui
//!
//! A small read-only panel in the top-left corner showing the active view,
//! travel speed, zoom and frame rate, plus the key bindings.

use crate::config::CONFIG;
use crate::state::ViewMode;
use egui::{Color32, RichText};
use glam::Vec3;

/// Frame-rate estimate averaged over a short window
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    frames: u32,
    elapsed: f32,
    window: f32,
    fps: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl FpsCounter {
    pub fn new(window: f32) -> Self {
        Self {
            frames: 0,
            elapsed: 0.0,
            window,
            fps: 0.0,
        }
    }

    pub fn record(&mut self, dt: f32) {
        self.frames += 1;
        self.elapsed += dt;
        if self.elapsed >= self.window {
            self.fps = self.frames as f32 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// Snapshot of the values shown on the HUD
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    pub view_mode: ViewMode,
    pub travel_speed: f32,
    pub zoom: f32,
    pub fps: f32,
    pub position: Vec3,
    /// First-person look angles in degrees
    pub yaw: f32,
    pub pitch: f32,
}

impl HudInfo {
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("View: {}", self.view_mode.display_name()),
            format!("Speed: {:.1}", self.travel_speed),
            format!("Zoom: {:.0}°", self.zoom),
            format!(
                "Position: ({:.2}, {:.2}, {:.2})",
                self.position.x, self.position.y, self.position.z
            ),
            format!("FPS: {:.0}", self.fps),
            format!("Yaw: {:.0}° Pitch: {:.0}°", self.yaw, self.pitch),
        ]
    }
}

const CONTROLS: &str = "WASD move · Q/E up/down · P bird's eye · scroll speed · Shift+scroll zoom · H hide";

pub fn render_hud(ctx: &egui::Context, info: &HudInfo) {
    let text_color = hex_to_color32(CONFIG.colors.hud_text);

    egui::Area::new(egui::Id::new("hud"))
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(Color32::from_rgba_unmultiplied(26, 26, 46, 200))
                .rounding(6.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    for line in info.lines() {
                        ui.label(RichText::new(line).size(13.0).color(text_color));
                    }
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(CONTROLS)
                            .size(11.0)
                            .color(Color32::from_gray(150)),
                    );
                });
        });
}

/// Helper function to convert hex color to egui Color32
pub fn hex_to_color32(hex: u32) -> Color32 {
    let r = ((hex >> 16) & 0xFF) as u8;
    let g = ((hex >> 8) & 0xFF) as u8;
    let b = (hex & 0xFF) as u8;
    Color32::from_rgb(r, g, b)
}
