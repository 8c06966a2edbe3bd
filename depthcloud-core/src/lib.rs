//! CPU-side core for depth-map point cloud reconstruction.
//!
//! Everything in this crate is pure and GPU-free: decoded sample buffers,
//! the unprojection engine that turns depth+color pixels into colored 3D
//! points, the orbit camera, and the store that owns the current cloud.

pub mod camera;
pub mod reproject;
pub mod source;
pub mod store;
pub mod types;

pub use camera::OrbitCamera;
pub use reproject::{ReprojectError, generate_point_cloud};
pub use source::{ColorMap, DepthMap};
pub use store::CloudStore;
pub use types::{PointCloud, PointVertex};
