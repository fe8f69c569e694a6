//! Presentation of software framebuffers through `wgpu`.
//!
//! Every root window owns a [`Presenter`] (its surface). The adapter, device
//! and queue are shared and created with the first surface, so the adapter
//! is guaranteed to be able to present to it.

use std::sync::Arc;

use sparta_core::profiling::profile_function;
use sparta_ui::BackendError;
use winit::window::Window;

use crate::raster::Framebuffer;

struct Device {
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

pub struct Gpu {
    instance: wgpu::Instance,
    device: Option<Device>,
}

impl Gpu {
    pub fn new() -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        Self {
            instance,
            device: None,
        }
    }

    fn device_for(&mut self, surface: &wgpu::Surface<'static>) -> Result<&Device, BackendError> {
        if self.device.is_none() {
            let adapter = pollster::block_on(self.instance.request_adapter(
                &wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::LowPower,
                    compatible_surface: Some(surface),
                    force_fallback_adapter: false,
                },
            ))
            .map_err(|e| BackendError::Init(format!("no suitable GPU adapter: {}", e)))?;

            let (device, queue) = pollster::block_on(adapter.request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("sparta"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults(),
                    ..Default::default()
                },
            ))
            .map_err(|e| BackendError::Init(format!("failed to create device: {}", e)))?;

            tracing::info!("presenting through {:?}", adapter.get_info().name);
            self.device = Some(Device {
                adapter,
                device,
                queue,
            });
        }
        self.device
            .as_ref()
            .ok_or_else(|| BackendError::Init("GPU device unavailable".to_string()))
    }

    pub fn create_presenter(&mut self, window: Arc<Window>) -> Result<Presenter, BackendError> {
        let size = window.inner_size();
        let surface = self
            .instance
            .create_surface(window)
            .map_err(|e| BackendError::Surface(e.to_string()))?;
        let gpu = self.device_for(&surface)?;

        let mut config = surface
            .get_default_config(&gpu.adapter, size.width.max(1), size.height.max(1))
            .ok_or_else(|| {
                BackendError::Surface("surface is not supported by the adapter".to_string())
            })?;

        let caps = surface.get_capabilities(&gpu.adapter);
        if !caps.usages.contains(wgpu::TextureUsages::COPY_DST) {
            return Err(BackendError::Surface(
                "surface textures cannot be written to".to_string(),
            ));
        }
        config.usage |= wgpu::TextureUsages::COPY_DST;

        let order = ChannelOrder::of(config.format)?;
        surface.configure(&gpu.device, &config);
        tracing::debug!(
            "configured surface {}x{} as {:?}",
            config.width,
            config.height,
            config.format
        );

        Ok(Presenter {
            surface,
            config,
            order,
            staging: Vec::new(),
        })
    }

    /// Copies `framebuffer` onto the window and presents it.
    pub fn present(
        &self,
        presenter: &mut Presenter,
        framebuffer: &Framebuffer,
    ) -> Result<(), BackendError> {
        profile_function!();
        let Some(gpu) = &self.device else {
            return Ok(());
        };
        if presenter.config.width != framebuffer.width()
            || presenter.config.height != framebuffer.height()
        {
            presenter.resize(self, framebuffer.width(), framebuffer.height());
        }
        if framebuffer.width() == 0 || framebuffer.height() == 0 {
            return Ok(());
        }

        let frame = match presenter.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                tracing::debug!("surface outdated, reconfiguring");
                presenter.surface.configure(&gpu.device, &presenter.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("timed out acquiring surface texture");
                return Ok(());
            }
            Err(e) => return Err(BackendError::Surface(e.to_string())),
        };

        let order = presenter.order;
        presenter.staging.clear();
        presenter
            .staging
            .extend(framebuffer.pixels().iter().map(|&p| order.convert(p)));

        gpu.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &frame.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(&presenter.staging),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(framebuffer.width() * 4),
                rows_per_image: Some(framebuffer.height()),
            },
            wgpu::Extent3d {
                width: framebuffer.width(),
                height: framebuffer.height(),
                depth_or_array_layers: 1,
            },
        );
        gpu.queue.submit(std::iter::empty());
        frame.present();
        Ok(())
    }
}

impl Default for Gpu {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Presenter {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    order: ChannelOrder,
    staging: Vec<u32>,
}

impl Presenter {
    pub fn resize(&mut self, gpu: &Gpu, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
        if width == 0 || height == 0 {
            return;
        }
        if let Some(device) = &gpu.device {
            self.surface.configure(&device.device, &self.config);
        }
    }
}

/// Byte order of a surface format, relative to our `0xAARRGGBB` words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    Bgra,
    Rgba,
}

impl ChannelOrder {
    pub fn of(format: wgpu::TextureFormat) -> Result<Self, BackendError> {
        match format {
            wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => {
                Ok(ChannelOrder::Bgra)
            }
            wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => {
                Ok(ChannelOrder::Rgba)
            }
            other => Err(BackendError::Surface(format!(
                "unsupported surface format {:?}",
                other
            ))),
        }
    }

    /// A packed pixel in the memory layout of the format.
    pub fn convert(self, argb: u32) -> u32 {
        let pixel = match self {
            ChannelOrder::Bgra => argb,
            ChannelOrder::Rgba => {
                (argb & 0xff00_ff00) | ((argb >> 16) & 0xff) | ((argb & 0xff) << 16)
            }
        };
        pixel.to_le()
    }
}
