//! Mouse input handling: drag-to-orbit, drag-to-pan, scroll-to-zoom.

use depthcloud_core::OrbitCamera;
use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

/// Tracks held buttons and the last cursor position so absolute cursor events
/// become per-event deltas fed straight into the camera.
#[derive(Debug, Default)]
pub struct CameraInput {
    holding_orbit: bool,
    holding_pan: bool,
    cursor: Option<Vec2>,
}

impl CameraInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a window event. `ui_wants_pointer` suppresses starting new drags
    /// and zooming while the cursor is over the UI; releases always land so a
    /// drag can never get stuck held.
    pub fn handle_event(
        &mut self,
        event: &WindowEvent,
        camera: &mut OrbitCamera,
        ui_wants_pointer: bool,
    ) -> bool {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                self.on_mouse_button(*button, *state == ElementState::Pressed, ui_wants_pointer)
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.on_cursor_moved(
                    Vec2::new(position.x as f32, position.y as f32),
                    camera,
                );
                self.holding_orbit || self.holding_pan
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if ui_wants_pointer {
                    return false;
                }
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                self.on_scroll(amount, camera);
                true
            }
            _ => false,
        }
    }

    fn on_mouse_button(&mut self, button: MouseButton, pressed: bool, ui_wants_pointer: bool) -> bool {
        let held = match button {
            MouseButton::Left => &mut self.holding_orbit,
            MouseButton::Right => &mut self.holding_pan,
            _ => return false,
        };
        if pressed && !ui_wants_pointer {
            *held = true;
            true
        } else if !pressed {
            *held = false;
            true
        } else {
            false
        }
    }

    fn on_cursor_moved(&mut self, position: Vec2, camera: &mut OrbitCamera) {
        let delta = match self.cursor {
            Some(prev) => position - prev,
            None => Vec2::ZERO,
        };
        self.cursor = Some(position);

        if self.holding_orbit {
            camera.orbit(delta.x, delta.y);
        }
        if self.holding_pan {
            camera.pan(delta.x, delta.y);
        }
    }

    fn on_scroll(&mut self, amount: f32, camera: &mut OrbitCamera) {
        camera.zoom(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_drag_rotates_camera() {
        let mut input = CameraInput::new();
        let mut camera = OrbitCamera::default();

        input.on_mouse_button(MouseButton::Left, true, false);
        input.on_cursor_moved(Vec2::new(100.0, 100.0), &mut camera);
        input.on_cursor_moved(Vec2::new(110.0, 100.0), &mut camera);

        // 10 px * 0.1 deg/px
        assert!((camera.yaw - 91.0).abs() < 1e-5);
        assert_eq!(camera.pitch, 0.0);
    }

    #[test]
    fn test_first_cursor_sample_produces_no_delta() {
        let mut input = CameraInput::new();
        let mut camera = OrbitCamera::default();

        input.on_mouse_button(MouseButton::Left, true, false);
        input.on_cursor_moved(Vec2::new(500.0, 500.0), &mut camera);
        assert_eq!(camera.yaw, 90.0);
    }

    #[test]
    fn test_ui_capture_blocks_drag_start_but_not_release() {
        let mut input = CameraInput::new();
        let mut camera = OrbitCamera::default();

        assert!(!input.on_mouse_button(MouseButton::Left, true, true));
        input.on_cursor_moved(Vec2::new(0.0, 0.0), &mut camera);
        input.on_cursor_moved(Vec2::new(50.0, 0.0), &mut camera);
        assert_eq!(camera.yaw, 90.0);

        // A release received while over the UI still clears held state.
        input.on_mouse_button(MouseButton::Left, true, false);
        assert!(input.on_mouse_button(MouseButton::Left, false, true));
        input.on_cursor_moved(Vec2::new(60.0, 0.0), &mut camera);
        assert_eq!(camera.yaw, 90.0);
    }

    #[test]
    fn test_pan_drag_moves_origin() {
        let mut input = CameraInput::new();
        let mut camera = OrbitCamera::default();

        input.on_mouse_button(MouseButton::Right, true, false);
        input.on_cursor_moved(Vec2::new(0.0, 0.0), &mut camera);
        input.on_cursor_moved(Vec2::new(0.0, 10.0), &mut camera);

        // 10 px of downward drag * 0.005 units/px along world up.
        assert!((camera.origin.y - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_scroll_zooms() {
        let mut input = CameraInput::new();
        let mut camera = OrbitCamera::default();
        input.on_scroll(1.0, &mut camera);
        assert!(camera.distance < 5.0);
    }
}
