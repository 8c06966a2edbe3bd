//! GPU plumbing: device bring-up, surface management, and the instanced
//! voxel pipeline that draws the current point cloud.

pub mod shaders;
pub mod surface;
pub mod types;
pub mod voxel;

pub use surface::SurfaceWrapper;
pub use types::{FrameUniforms, PointInstance};
pub use voxel::{DEPTH_FORMAT, VoxelRenderer};

// Re-export so downstream crates use a single wgpu version.
pub use wgpu;

#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("Request Adapter Error: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("Request Device Error: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("Create surface error: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("Surface configuration is not supported by the adapter")]
    UnsupportedSurface,
    #[error("Shader validation error: {0}")]
    Shader(String),
}

/// Handle to the GPU: instance, adapter, and the device/queue pair.
pub struct Renderer {
    instance: wgpu::Instance,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl Renderer {
    pub async fn new() -> Result<Self, RendererError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::from_env_or_default());

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions::default())
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Renderer"),
                ..Default::default()
            })
            .await?;

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
        })
    }

    pub fn instance(&self) -> &wgpu::Instance {
        &self.instance
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Configure a window surface, clamping the dimensions to at least 1 so a
    /// zero-height viewport can never produce a degenerate configuration.
    pub fn create_surface(
        &self,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
    ) -> Result<SurfaceWrapper, RendererError> {
        let config = surface
            .get_default_config(&self.adapter, width.max(1), height.max(1))
            .ok_or(RendererError::UnsupportedSurface)?;
        surface.configure(&self.device, &config);
        Ok(SurfaceWrapper::new(surface, config))
    }
}
