use crate::coords::SurfaceSize;

use super::scene::SceneView;

/// Per-frame GPU context handed to passes while a surface frame is open.
///
/// Kept small and stable: device/queue, the open encoder, the surface view
/// the last enabled pass writes to, and the surface format/size.
pub struct FrameEncoder<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub surface_view: &'a wgpu::TextureView,
    pub format: wgpu::TextureFormat,
    pub size: SurfaceSize,
}

/// Inputs and output of one scheduled pass.
pub struct PassIo<'a> {
    /// Previous stage's image, or a 1x1 black texture for the first stage.
    pub input: &'a wgpu::TextureView,
    /// Where this stage writes: an intermediate target or the surface.
    pub output: &'a wgpu::TextureView,
    /// Scene + camera for passes that render geometry.
    pub view: &'a SceneView<'a>,
}
