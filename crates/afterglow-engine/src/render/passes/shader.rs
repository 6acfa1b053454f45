use crate::render::ctx::{FrameEncoder, PassIo};
use crate::render::program::{
    linear_clamp_sampler, post_bind_group_layout, post_pipeline, Program,
};
use crate::render::uniforms::{ParamError, ParamValue, Uniforms};

/// Fullscreen pass driven by a [`Program`] and a uniform block.
///
/// Shared machinery for the blur and glow stages: owns the parameter set and
/// the GPU objects, which are created on first encode and rebuilt when the
/// output format changes.
pub struct ShaderPass {
    name: &'static str,
    program: &'static Program,
    uniforms: Uniforms,
    gpu: Option<PostGpu>,
}

struct PostGpu {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    ubo: wgpu::Buffer,
    ubo_size: u64,
    sampler: wgpu::Sampler,
}

impl ShaderPass {
    pub fn new(name: &'static str, program: &'static Program, uniforms: Uniforms) -> Self {
        Self {
            name,
            program,
            uniforms,
            gpu: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError> {
        self.uniforms.set(self.name, name, value)
    }

    pub fn encode(&mut self, frame: &mut FrameEncoder<'_>, io: PassIo<'_>) {
        let bytes = self.uniforms.pack();
        self.ensure_gpu(frame.device, frame.format, bytes.len() as u64);
        let Some(gpu) = self.gpu.as_ref() else { return };

        frame.queue.write_buffer(&gpu.ubo, 0, &bytes);

        let bind_group = frame.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(self.name),
            layout: &gpu.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: gpu.ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(io.input),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&gpu.sampler),
                },
            ],
        });

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(self.name),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: io.output,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&gpu.pipeline);
        rpass.set_bind_group(0, &bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }

    fn ensure_gpu(&mut self, device: &wgpu::Device, format: wgpu::TextureFormat, ubo_size: u64) {
        if let Some(gpu) = &self.gpu {
            if gpu.format == format && gpu.ubo_size == ubo_size {
                return;
            }
        }

        log::debug!("{}: building pipeline for {:?}", self.name, format);

        let bind_group_layout = post_bind_group_layout(device, self.program.label, ubo_size);
        let pipeline = post_pipeline(device, self.program, &bind_group_layout, format);
        let ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(self.program.label),
            size: ubo_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let sampler = linear_clamp_sampler(device, self.program.label);

        self.gpu = Some(PostGpu {
            format,
            pipeline,
            bind_group_layout,
            ubo,
            ubo_size,
            sampler,
        });
    }
}
