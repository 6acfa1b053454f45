use crate::coords::SurfaceSize;

use super::uniforms::TargetSlot;

/// Intermediate color targets for the ping-pong chain.
///
/// Both targets match the surface size and format and are recreated when
/// either changes. A 1x1 black texture stands in for an unbound input.
#[derive(Default)]
pub struct RenderTargets {
    size: SurfaceSize,
    format: Option<wgpu::TextureFormat>,
    a: Option<wgpu::TextureView>,
    b: Option<wgpu::TextureView>,
    fallback: Option<wgpu::TextureView>,
}

impl RenderTargets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensure(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        size: SurfaceSize,
    ) {
        if self.fallback.is_none() {
            self.fallback = Some(create_fallback(device, queue));
        }

        if self.format == Some(format) && self.size == size && self.a.is_some() && self.b.is_some()
        {
            return;
        }

        log::debug!(
            "render targets: {}x{} {:?}",
            size.width,
            size.height,
            format
        );

        self.a = Some(create_target(device, "afterglow target A", format, size));
        self.b = Some(create_target(device, "afterglow target B", format, size));
        self.format = Some(format);
        self.size = size;
    }

    pub fn view(&self, slot: TargetSlot) -> Option<&wgpu::TextureView> {
        match slot {
            TargetSlot::A => self.a.as_ref(),
            TargetSlot::B => self.b.as_ref(),
        }
    }

    pub fn fallback(&self) -> Option<&wgpu::TextureView> {
        self.fallback.as_ref()
    }
}

fn create_target(
    device: &wgpu::Device,
    label: &str,
    format: wgpu::TextureFormat,
    size: SurfaceSize,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: size.width.max(1),
            height: size.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_fallback(device: &wgpu::Device, queue: &wgpu::Queue) -> wgpu::TextureView {
    let extent = wgpu::Extent3d {
        width: 1,
        height: 1,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("afterglow fallback input"),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &[0, 0, 0, 255],
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4),
            rows_per_image: Some(1),
        },
        extent,
    );

    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
