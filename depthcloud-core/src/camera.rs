//! Orbit camera: spherical parameters around a target point.

use glam::{Mat4, Vec3};

const WORLD_UP: Vec3 = Vec3::Y;
const PITCH_LIMIT: f32 = 89.0;

/// Camera orbiting a target point, parametrized by distance, pitch, and yaw.
///
/// Angles are stored in degrees. Mutations are applied once per input event
/// and carry no time dependence, so camera feel is frame-rate independent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Target point the camera orbits and looks at.
    pub origin: Vec3,
    /// Distance from the target, always >= 0.
    pub distance: f32,
    /// Pitch in degrees, clamped to [-89, 89].
    pub pitch: f32,
    /// Yaw in degrees.
    pub yaw: f32,
    /// Degrees of rotation per pixel of drag.
    pub rotate_speed: f32,
    /// World units of pan per pixel of drag.
    pub pan_speed: f32,
    /// Multiplicative zoom factor per scroll step.
    pub zoom_scale: f32,
}

impl OrbitCamera {
    /// Unit direction the camera looks along, from pitch and yaw.
    pub fn front(&self) -> Vec3 {
        let pitch = self.pitch.to_radians();
        let yaw = self.yaw.to_radians();
        Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize()
    }

    /// Camera position in world space.
    pub fn eye(&self) -> Vec3 {
        self.origin - self.front() * self.distance
    }

    /// Right-handed look-at view transform toward the orbit target.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.origin, WORLD_UP)
    }

    /// Orbit around the target (primary drag).
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.rotate_speed;
        self.pitch = (self.pitch - dy * self.rotate_speed).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Pan the target in the view plane (secondary drag).
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let right = self.front().cross(WORLD_UP).normalize();
        self.origin += right * -dx * self.pan_speed;
        self.origin += WORLD_UP * dy * self.pan_speed;
    }

    /// Zoom by scaling the orbit distance (scroll). Forward scroll moves in.
    pub fn zoom(&mut self, scroll: f32) {
        if scroll > 0.0 {
            self.distance /= 1.0 + self.zoom_scale;
        } else if scroll < 0.0 {
            self.distance *= 1.0 + self.zoom_scale;
        }
        self.distance = self.distance.max(0.0);
    }

    /// Place the orbit target at the cloud's farthest point along the viewing
    /// axis after a successful generation.
    pub fn recenter(&mut self, max_depth: f32) {
        self.origin = Vec3::new(0.0, 0.0, max_depth);
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            distance: 5.0,
            pitch: 0.0,
            yaw: 90.0,
            rotate_speed: 0.1,
            pan_speed: 0.005,
            zoom_scale: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_at_default_yaw_points_along_z() {
        let camera = OrbitCamera::default();
        assert!((camera.front() - Vec3::Z).length() < 1e-6);
        assert!((camera.eye() - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-6);
    }

    #[test]
    fn test_pitch_clamps_at_limits() {
        let mut camera = OrbitCamera::default();
        for _ in 0..100 {
            camera.orbit(0.0, 1000.0);
        }
        assert_eq!(camera.pitch, -89.0);

        for _ in 0..100 {
            camera.orbit(0.0, -1000.0);
        }
        assert_eq!(camera.pitch, 89.0);
    }

    #[test]
    fn test_zoom_never_goes_negative() {
        let mut camera = OrbitCamera::default();
        for _ in 0..10_000 {
            camera.zoom(1.0);
        }
        assert!(camera.distance >= 0.0);
        assert!(camera.distance < 1e-3);
    }

    #[test]
    fn test_zoom_out_scales_distance() {
        let mut camera = OrbitCamera::default();
        camera.zoom(-1.0);
        assert!((camera.distance - 5.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_delta_mutations_are_noops() {
        let mut camera = OrbitCamera::default();
        let before = camera;
        camera.orbit(0.0, 0.0);
        camera.pan(0.0, 0.0);
        camera.zoom(0.0);
        assert_eq!(camera, before);
    }

    #[test]
    fn test_recenter_targets_max_depth() {
        let mut camera = OrbitCamera::default();
        camera.recenter(3.5);
        assert_eq!(camera.origin, Vec3::new(0.0, 0.0, 3.5));
    }

    #[test]
    fn test_view_matrix_looks_at_origin() {
        let camera = OrbitCamera::default();
        let view = camera.view_matrix();
        // The orbit target must land on the view-space -Z axis at `distance`.
        let target = view.transform_point3(camera.origin);
        assert!((target - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-5);
    }
}
