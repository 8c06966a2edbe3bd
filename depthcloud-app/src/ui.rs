//! egui parameter panel and error popup.

use egui::Context;

use crate::session::{DialogTarget, Session};

/// Read-only numbers shown in the Information section.
#[derive(Debug, Clone, Copy)]
pub struct FrameStats {
    pub fps: f32,
    pub vertex_count: usize,
    pub max_depth: Option<f32>,
}

/// Actions the panel can request from the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Generate,
}

/// Draw the panel and error popup; returns a requested action, if any.
pub fn draw(ctx: &Context, session: &mut Session, stats: FrameStats) -> Option<UiAction> {
    let mut action = None;

    egui::Window::new("Depth Cloud").show(ctx, |ui| {
        egui::CollapsingHeader::new("Information")
            .default_open(true)
            .show(ui, |ui| {
                ui.label(format!("FPS: {:.2}", stats.fps));
                if stats.vertex_count > 0 {
                    ui.label(format!("Number of Vertices: {}", stats.vertex_count));
                }
                if let Some(max_depth) = stats.max_depth {
                    ui.label(format!("Max Depth: {max_depth:.3} m"));
                }
            });

        egui::CollapsingHeader::new("Generate")
            .default_open(true)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut session.params.image_path);
                    if ui.button("Browse").clicked() {
                        session.browse(DialogTarget::Image);
                    }
                    ui.label("Image File");
                });
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut session.params.depth_path);
                    if ui.button("Browse").clicked() {
                        session.browse(DialogTarget::Depth);
                    }
                    ui.label("Depth Map File");
                });

                ui.add(
                    egui::Slider::new(&mut session.params.focal_length, 0.0..=10000.0)
                        .text("Focal Length"),
                );
                ui.add(egui::Slider::new(&mut session.params.stride, 1..=10).text("Stride"));

                if ui.button("Generate").clicked() {
                    action = Some(UiAction::Generate);
                }
            });

        egui::CollapsingHeader::new("Settings")
            .default_open(true)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.color_edit_button_rgb(&mut session.params.background);
                    ui.label("Background Color");
                });
                ui.add(
                    egui::Slider::new(&mut session.params.voxel_scale, 0.00001..=0.01)
                        .logarithmic(true)
                        .text("Voxel Scale"),
                );
            });
    });

    if session.last_error.is_some() {
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                if let Some(message) = &session.last_error {
                    ui.label(message);
                }
                ui.separator();
                if ui.button("Close").clicked() {
                    session.last_error = None;
                }
            });
    }

    action
}
