//! Shader source code embedded at compile time.

/// Voxel vertex shader - places a scaled template cube at each point instance.
pub const VOXEL_VERTEX: &str = include_str!("../shaders/voxel_vertex.wgsl");

/// Voxel fragment shader - flat per-instance color output.
pub const VOXEL_FRAGMENT: &str = include_str!("../shaders/voxel_fragment.wgsl");
