use depthcloud_core::PointVertex;
use glam::Mat4;

/// Per-instance attributes for one reconstructed point.
/// Matches the instance vertex buffer layout in `voxel_vertex.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct PointInstance {
    /// Camera-space position of the point.
    pub position: [f32; 3],
    /// RGB color (linear 0-1).
    pub color: [f32; 3],
}

impl From<&PointVertex> for PointInstance {
    fn from(vertex: &PointVertex) -> Self {
        Self {
            position: vertex.position.to_array(),
            color: vertex.color.to_array(),
        }
    }
}

/// Shared per-frame uniform layout between host and shader: projection, view,
/// and model transforms as column-major 4x4 float arrays.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
}

impl FrameUniforms {
    pub fn from_matrices(projection: Mat4, view: Mat4, model: Mat4) -> Self {
        Self {
            projection: projection.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
        }
    }

    pub fn identity() -> Self {
        Self::from_matrices(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_point_instance_layout() {
        // Two tightly packed vec3s, as declared in the instance buffer layout.
        assert_eq!(std::mem::size_of::<PointInstance>(), 24);

        let vertex = PointVertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, 0.25, 1.0));
        let instance = PointInstance::from(&vertex);
        assert_eq!(instance.position, [1.0, 2.0, 3.0]);
        assert_eq!(instance.color, [0.5, 0.25, 1.0]);
    }

    #[test]
    fn test_frame_uniforms_layout() {
        // Three mat4x4<f32>, no padding.
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 192);
    }

    #[test]
    fn test_frame_uniforms_column_major() {
        let model = Mat4::from_scale(Vec3::splat(0.01));
        let uniforms = FrameUniforms::from_matrices(Mat4::IDENTITY, Mat4::IDENTITY, model);
        assert_eq!(uniforms.model[0][0], 0.01);
        assert_eq!(uniforms.model[3][3], 1.0);
        assert_eq!(uniforms.projection, Mat4::IDENTITY.to_cols_array_2d());
    }
}
