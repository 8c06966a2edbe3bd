//! depthcloud - interactive depth-map point cloud viewer.
//!
//! Loads a color image and an aligned 16-bit depth map, unprojects every
//! pixel into a colored 3D point, and renders the cloud as instanced voxels
//! under an orbit camera.

mod app;
mod controls;
mod session;
mod ui;

use clap::Parser;
use std::path::PathBuf;

use crate::session::GenerateParams;

/// depthcloud - depth map to point cloud reconstruction viewer
#[derive(Parser, Debug)]
#[command(name = "depthcloud")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Color image to reconstruct from
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// 16-bit depth map aligned with the color image
    #[arg(short, long)]
    depth: Option<PathBuf>,

    /// Pinhole focal length in pixels
    #[arg(short, long, default_value_t = 1400.0)]
    focal_length: f32,

    /// Pixel step when sampling the image grid (1 visits every pixel)
    #[arg(short, long, default_value_t = 4)]
    stride: u32,
}

fn main() {
    let args = Args::parse();

    let params = GenerateParams {
        image_path: args
            .image
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
        depth_path: args
            .depth
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
        focal_length: args.focal_length,
        stride: args.stride.max(1),
        ..GenerateParams::default()
    };

    if let Err(e) = app::run(params) {
        eprintln!("Application error: {e}");
        std::process::exit(1);
    }
}
