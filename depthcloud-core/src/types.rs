//! Core data types for reconstructed point clouds.

use glam::Vec3;

/// A single reconstructed point: camera-space position plus color.
///
/// Color channels are linear and normalized to the 0-1 range. Immutable once
/// emitted by the reprojection engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointVertex {
    /// Position in camera space.
    pub position: Vec3,
    /// RGB color (linear, 0-1 range).
    pub color: Vec3,
}

impl PointVertex {
    /// Create a new point with position and color.
    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self { position, color }
    }
}

/// A point cloud produced by one reprojection run.
///
/// Created atomically and replaced wholesale by the next run; never partially
/// mutated. `max_depth` is the largest metric depth observed across the
/// visited pixels and is used to re-center the orbit camera.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    /// Vertices in row-major scan order (rows outer, columns inner).
    pub vertices: Vec<PointVertex>,
    /// Largest metric depth value observed during generation.
    pub max_depth: f32,
}

impl PointCloud {
    /// Number of vertices in the cloud.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the cloud contains no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_vertex_creation() {
        let p = PointVertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(p.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(p.color, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_cloud_len() {
        let cloud = PointCloud {
            vertices: vec![PointVertex::new(Vec3::ZERO, Vec3::ONE); 4],
            max_depth: 2.0,
        };
        assert_eq!(cloud.len(), 4);
        assert!(!cloud.is_empty());
    }
}
