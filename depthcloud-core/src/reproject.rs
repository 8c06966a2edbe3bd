//! Per-pixel unprojection of a color image + depth map into a point cloud.

use glam::Vec3;
use tracing::info;

use crate::source::{ColorMap, DepthMap};
use crate::types::{PointCloud, PointVertex};

/// Errors from point cloud generation.
#[derive(Debug, thiserror::Error)]
pub enum ReprojectError {
    #[error("failed to read {path}: {source}")]
    SourceRead {
        path: std::path::PathBuf,
        source: image::ImageError,
    },
    #[error(
        "image and depth map mismatch: color {color_width}x{color_height} ({color_channels} ch), \
         depth {depth_width}x{depth_height} ({depth_channels} ch)"
    )]
    DimensionMismatch {
        color_width: u32,
        color_height: u32,
        color_channels: u8,
        depth_width: u32,
        depth_height: u32,
        depth_channels: u8,
    },
}

/// Unproject every `stride`-th pixel of the color/depth pair into a colored
/// 3D point.
///
/// `focal_length` is a single pinhole focal length shared by both axes; the
/// principal point is the geometric image center. Depth samples are ZoeDepth
/// style metric values scaled down by 255. `stride = 1` visits every pixel,
/// larger strides thin the cloud (skipped pixels contribute neither a vertex
/// nor to `max_depth`).
///
/// Pure and deterministic: identical inputs and parameters always produce the
/// same cloud, in row-major scan order.
pub fn generate_point_cloud(
    color: &ColorMap,
    depth: &DepthMap,
    focal_length: f32,
    stride: u32,
) -> Result<PointCloud, ReprojectError> {
    if color.width != depth.width
        || color.height != depth.height
        || color.channels != 3
        || depth.channels != 1
    {
        return Err(ReprojectError::DimensionMismatch {
            color_width: color.width,
            color_height: color.height,
            color_channels: color.channels,
            depth_width: depth.width,
            depth_height: depth.height,
            depth_channels: depth.channels,
        });
    }

    let width = color.width;
    let height = color.height;
    let center_w = width as f32 * 0.5;
    let center_h = height as f32 * 0.5;
    let stride = stride.max(1);

    let mut vertices =
        Vec::with_capacity((height.div_ceil(stride) * width.div_ceil(stride)) as usize);
    let mut max_depth = 0.0f32;

    for v in (0..height).step_by(stride as usize) {
        for u in (0..width).step_by(stride as usize) {
            let index = (u + v * width) as usize;
            let r = color.data[index * 3];
            let g = color.data[index * 3 + 1];
            let b = color.data[index * 3 + 2];
            let gray = depth.data[index];

            let depth_m = gray as f32 / 255.0;
            if depth_m > max_depth {
                max_depth = depth_m;
            }

            let position = Vec3::new(
                depth_m * (width as f32 - u as f32 - center_w) / focal_length,
                depth_m * (height as f32 - v as f32 - center_h) / focal_length,
                depth_m,
            );
            let color = Vec3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);

            vertices.push(PointVertex::new(position, color));
        }
    }

    info!(
        vertices = vertices.len(),
        max_depth, "generated point cloud"
    );

    Ok(PointCloud {
        vertices,
        max_depth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_color(width: u32, height: u32, rgb: [u8; 3]) -> ColorMap {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take((width * height * 3) as usize)
            .collect();
        ColorMap::new(width, height, 3, data)
    }

    fn uniform_depth(width: u32, height: u32, value: u16) -> DepthMap {
        DepthMap::new(width, height, 1, vec![value; (width * height) as usize])
    }

    #[test]
    fn test_stride_one_visits_every_pixel() {
        let color = solid_color(8, 6, [10, 20, 30]);
        let depth = uniform_depth(8, 6, 100);
        let cloud = generate_point_cloud(&color, &depth, 100.0, 1).unwrap();
        assert_eq!(cloud.len(), 48);
    }

    #[test]
    fn test_stride_count_at_non_divisible_dimensions() {
        // 7x5 at stride 3 -> ceil(5/3) * ceil(7/3) = 2 * 3 = 6
        let color = solid_color(7, 5, [0, 0, 0]);
        let depth = uniform_depth(7, 5, 1);
        let cloud = generate_point_cloud(&color, &depth, 100.0, 3).unwrap();
        assert_eq!(cloud.len(), 6);
    }

    #[test]
    fn test_max_depth_ignores_skipped_pixels() {
        let color = solid_color(4, 4, [0, 0, 0]);
        let mut depth = uniform_depth(4, 4, 255);
        // Bright outlier at (1, 1), off the stride-2 sampling grid.
        depth.data[1 + 4] = u16::MAX;
        let cloud = generate_point_cloud(&color, &depth, 100.0, 2).unwrap();
        assert_eq!(cloud.max_depth, 1.0);

        // At stride 1 the outlier is visited and dominates.
        let cloud = generate_point_cloud(&color, &depth, 100.0, 1).unwrap();
        assert_eq!(cloud.max_depth, u16::MAX as f32 / 255.0);
    }

    #[test]
    fn test_color_normalization_endpoints() {
        let mut color = solid_color(2, 1, [0, 0, 0]);
        color.data[0..3].copy_from_slice(&[0, 128, 255]);
        let depth = uniform_depth(2, 1, 255);
        let cloud = generate_point_cloud(&color, &depth, 100.0, 1).unwrap();
        let c = cloud.vertices[0].color;
        assert_eq!(c.x, 0.0);
        assert!(c.y > 0.0 && c.y < 1.0);
        assert_eq!(c.z, 1.0);
    }

    #[test]
    fn test_center_pixel_maps_to_axis() {
        // The pixel at (W/2, H/2) lands on (0, 0, depth) for any focal length.
        let color = solid_color(8, 8, [255, 255, 255]);
        let depth = uniform_depth(8, 8, 510);
        for focal in [1.0, 100.0, 1400.0] {
            let cloud = generate_point_cloud(&color, &depth, focal, 1).unwrap();
            let center = cloud.vertices[(4 * 8 + 4) as usize];
            assert_eq!(center.position, Vec3::new(0.0, 0.0, 2.0));
        }
    }

    #[test]
    fn test_dimension_mismatch_fails_without_vertices() {
        let color = solid_color(64, 64, [0, 0, 0]);
        let depth = uniform_depth(64, 32, 1);
        let err = generate_point_cloud(&color, &depth, 100.0, 1).unwrap_err();
        assert!(matches!(err, ReprojectError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_wrong_channel_counts_rejected() {
        let color = ColorMap::new(4, 4, 4, vec![0; 64]);
        let depth = uniform_depth(4, 4, 1);
        assert!(matches!(
            generate_point_cloud(&color, &depth, 100.0, 1),
            Err(ReprojectError::DimensionMismatch { .. })
        ));

        let color = ColorMap::new(4, 4, 3, vec![0; 48]);
        let depth = DepthMap::new(4, 4, 3, vec![0; 48]);
        assert!(matches!(
            generate_point_cloud(&color, &depth, 100.0, 1),
            Err(ReprojectError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_uniform_red_scene_end_to_end() {
        let color = solid_color(4, 4, [255, 0, 0]);
        let depth = uniform_depth(4, 4, 255);
        let cloud = generate_point_cloud(&color, &depth, 100.0, 1).unwrap();

        assert_eq!(cloud.len(), 16);
        assert_eq!(cloud.max_depth, 1.0);
        for vertex in &cloud.vertices {
            assert_eq!(vertex.color, Vec3::new(1.0, 0.0, 0.0));
            assert_eq!(vertex.position.z, 1.0);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let color = solid_color(5, 3, [12, 34, 56]);
        let depth = uniform_depth(5, 3, 77);
        let a = generate_point_cloud(&color, &depth, 1400.0, 2).unwrap();
        let b = generate_point_cloud(&color, &depth, 1400.0, 2).unwrap();
        assert_eq!(a, b);
    }
}
