use bordered_core::RenderError;
use tracing::info;

/// Device and queue of a headless wgpu instance.
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GpuContext {
    /// Create a device without a surface, blocking on adapter and device
    /// requests.
    pub fn headless() -> Result<Self, RenderError> {
        pollster::block_on(Self::create())
    }

    async fn create() -> Result<Self, RenderError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| RenderError::GpuInitFailed {
                reason: "Failed to find a suitable GPU adapter".to_string(),
            })?;

        let adapter_info = adapter.get_info();
        info!(
            "using GPU adapter {} ({:?})",
            adapter_info.name, adapter_info.backend
        );

        // Downlevel limits, but with the adapter's full texture size.
        let required_limits =
            wgpu::Limits::downlevel_defaults().using_resolution(adapter.limits());

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("bordered device"),
                    required_features: wgpu::Features::empty(),
                    required_limits,
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .map_err(|e| RenderError::GpuInitFailed {
                reason: format!("Failed to create device: {}", e),
            })?;

        Ok(Self { device, queue })
    }

    /// Largest texture edge the device accepts.
    pub fn max_texture_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }
}
