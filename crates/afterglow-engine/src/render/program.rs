//! Shader programs and the shared fullscreen-pass GPU plumbing.

use std::borrow::Cow;
use std::num::NonZeroU64;

/// Immutable vertex + fragment program.
///
/// `sources` are concatenated in order; post passes prepend the shared
/// fullscreen-triangle vertex stage.
#[derive(Debug)]
pub struct Program {
    pub label: &'static str,
    pub sources: &'static [&'static str],
    pub vertex_entry: &'static str,
    pub fragment_entry: &'static str,
}

impl Program {
    pub fn wgsl(&self) -> Cow<'static, str> {
        match self.sources {
            [single] => Cow::Borrowed(*single),
            many => Cow::Owned(many.concat()),
        }
    }

    pub(crate) fn module(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.label),
            source: wgpu::ShaderSource::Wgsl(self.wgsl()),
        })
    }
}

const FULLSCREEN_WGSL: &str = include_str!("shaders/fullscreen.wgsl");

pub const BLUR_PROGRAM: Program = Program {
    label: "afterglow blur",
    sources: &[FULLSCREEN_WGSL, include_str!("shaders/blur.wgsl")],
    vertex_entry: "vs_fullscreen",
    fragment_entry: "fs_main",
};

pub const GLOW_PROGRAM: Program = Program {
    label: "afterglow glow",
    sources: &[FULLSCREEN_WGSL, include_str!("shaders/glow.wgsl")],
    vertex_entry: "vs_fullscreen",
    fragment_entry: "fs_main",
};

pub const SCENE_PROGRAM: Program = Program {
    label: "afterglow scene",
    sources: &[include_str!("shaders/scene.wgsl")],
    vertex_entry: "vs_main",
    fragment_entry: "fs_main",
};

// ── fullscreen pass plumbing ──────────────────────────────────────────────

/// Bind group layout shared by every fullscreen post pass:
/// `0` uniform block, `1` input texture, `2` sampler.
pub(crate) fn post_bind_group_layout(
    device: &wgpu::Device,
    label: &str,
    uniform_size: u64,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(uniform_size),
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

/// Opaque fullscreen-triangle pipeline writing to `format`.
pub(crate) fn post_pipeline(
    device: &wgpu::Device,
    program: &Program,
    layout: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = program.module(device);

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(program.label),
        bind_group_layouts: &[layout],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(program.label),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some(program.vertex_entry),
            compilation_options: Default::default(),
            buffers: &[],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some(program.fragment_entry),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

pub(crate) fn linear_clamp_sampler(device: &wgpu::Device, label: &str) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_programs_share_the_fullscreen_stage() {
        for program in [&BLUR_PROGRAM, &GLOW_PROGRAM] {
            let src = program.wgsl();
            assert!(src.contains("fn vs_fullscreen"));
            assert!(src.contains("fn fs_main"));
            assert!(src.contains("@group(0) @binding(1)"));
        }
    }

    #[test]
    fn single_source_program_is_borrowed() {
        assert!(matches!(SCENE_PROGRAM.wgsl(), Cow::Borrowed(_)));
    }
}
