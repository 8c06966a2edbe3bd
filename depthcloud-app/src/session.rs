//! Session context owned by the main loop.
//!
//! Everything the original kept as loop-local mutable state lives here: the
//! orbit camera, the point cloud store, the generation parameters, and the
//! last error message. Input handling, the UI, and the frame code each borrow
//! it; nothing is global.

use std::path::PathBuf;
use std::sync::mpsc;

use depthcloud_core::{CloudStore, ColorMap, DepthMap, OrbitCamera, generate_point_cloud};
use tracing::warn;

/// Which path field a file dialog was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogTarget {
    Image,
    Depth,
}

/// User-editable reconstruction and display parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateParams {
    pub image_path: String,
    pub depth_path: String,
    pub focal_length: f32,
    pub stride: u32,
    pub voxel_scale: f32,
    pub background: [f32; 3],
}

impl Default for GenerateParams {
    fn default() -> Self {
        Self {
            image_path: String::new(),
            depth_path: String::new(),
            focal_length: 1400.0,
            stride: 4,
            voxel_scale: 0.01,
            background: [0.0, 0.0, 0.0],
        }
    }
}

pub struct Session {
    pub camera: OrbitCamera,
    pub store: CloudStore,
    pub params: GenerateParams,
    pub last_error: Option<String>,
    dialog_tx: mpsc::Sender<(DialogTarget, PathBuf)>,
    dialog_rx: mpsc::Receiver<(DialogTarget, PathBuf)>,
}

impl Session {
    pub fn new(params: GenerateParams) -> Self {
        let (dialog_tx, dialog_rx) = mpsc::channel();
        Self {
            camera: OrbitCamera::default(),
            store: CloudStore::new(),
            params,
            last_error: None,
            dialog_tx,
            dialog_rx,
        }
    }

    /// Open a native file dialog on a helper thread so the frame loop never
    /// blocks; the picked path arrives through the session channel.
    pub fn browse(&self, target: DialogTarget) {
        let tx = self.dialog_tx.clone();
        std::thread::spawn(move || {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "tiff"])
                .add_filter("All Files", &["*"])
                .pick_file()
            {
                let _ = tx.send((target, path));
            }
        });
    }

    /// Drain any file-dialog results into the parameter fields.
    pub fn poll_dialogs(&mut self) {
        while let Ok((target, path)) = self.dialog_rx.try_recv() {
            let path = path.display().to_string();
            match target {
                DialogTarget::Image => self.params.image_path = path,
                DialogTarget::Depth => self.params.depth_path = path,
            }
        }
    }

    /// Run one synchronous reprojection from the current parameters.
    ///
    /// On success the store takes the new cloud and the camera recenters on
    /// its far plane; the caller must then re-upload GPU data. On failure the
    /// previous cloud is left untouched and the error is surfaced in the UI.
    pub fn generate(&mut self) -> bool {
        let result = ColorMap::load(&self.params.image_path)
            .and_then(|color| Ok((color, DepthMap::load(&self.params.depth_path)?)))
            .and_then(|(color, depth)| {
                generate_point_cloud(
                    &color,
                    &depth,
                    self.params.focal_length,
                    self.params.stride,
                )
            });

        match result {
            Ok(cloud) => {
                self.camera.recenter(cloud.max_depth);
                self.store.replace(cloud);
                self.last_error = None;
                true
            }
            Err(err) => {
                warn!("point cloud generation failed: {err}");
                self.last_error = Some(err.to_string());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_generation_keeps_previous_cloud() {
        let mut session = Session::new(GenerateParams {
            image_path: "missing.png".into(),
            depth_path: "missing_depth.png".into(),
            ..GenerateParams::default()
        });
        session.store.replace(depthcloud_core::PointCloud {
            vertices: vec![],
            max_depth: 2.0,
        });

        assert!(!session.generate());
        assert!(session.last_error.is_some());
        assert_eq!(session.store.current().unwrap().max_depth, 2.0);
    }

    #[test]
    fn test_poll_dialogs_updates_params() {
        let mut session = Session::new(GenerateParams::default());
        session
            .dialog_tx
            .send((DialogTarget::Depth, PathBuf::from("/tmp/d.png")))
            .unwrap();
        session.poll_dialogs();
        assert_eq!(session.params.depth_path, "/tmp/d.png");
        assert!(session.params.image_path.is_empty());
    }
}
