//! Pipeline for the runtime-loaded wave shader pair.

use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::{
    error::LumenError,
    gpu::{render_context::RenderContext, shader_composer::ShaderComposer},
    renderer::mesh::Vertex,
};

/// Uniform for the wave shader: model matrix, animation time, and surface
/// resolution. Layout mirrors `WaveUniform` in `modules/wave_io.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WaveUniform {
    /// Object-to-world transform, column major.
    pub model: [[f32; 4]; 4],
    /// Seconds since engine start.
    pub time: f32,
    /// Aligns `resolution` to the 8-byte vec2 boundary.
    pub _pad: f32,
    /// Surface size in physical pixels.
    pub resolution: [f32; 2],
}

impl WaveUniform {
    /// Pack the transform, clock, and surface size for upload.
    #[must_use]
    pub fn new(model: Mat4, time: f32, width: u32, height: u32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            time,
            _pad: 0.0,
            resolution: [width as f32, height as f32],
        }
    }
}

/// Wave uniform buffer and bind group (group 1 in the wave shader).
pub struct WaveBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl WaveBinding {
    /// Upload the initial uniform and build the bind group.
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniform: WaveUniform,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Wave Buffer"),
            contents: bytemuck::bytes_of(&uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Wave Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self { buffer, bind_group }
    }

    /// Overwrite the uniform contents.
    pub fn set(&self, queue: &wgpu::Queue, uniform: WaveUniform) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&uniform));
    }

    /// The bind group for render pass binding.
    #[must_use]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Pipeline built from the vertex/fragment source pair carried in the
/// scene model. The sources are loaded from disk at startup, so a bad
/// edit surfaces here as a compose error rather than a panic.
pub struct WavePipeline {
    pipeline: wgpu::RenderPipeline,
    wave_layout: wgpu::BindGroupLayout,
}

impl WavePipeline {
    /// Merge an externally loaded vertex/fragment WGSL pair and build the
    /// pipeline against the surface format.
    ///
    /// # Errors
    ///
    /// Returns an error if shader composition fails.
    pub fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        camera_layout: &wgpu::BindGroupLayout,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Self, LumenError> {
        let shader = composer.compose_pair(
            &context.device,
            "Wave Shader",
            vertex_src,
            fragment_src,
        )?;

        let wave_layout =
            context
                .device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("Wave Layout"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            context
                .device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("Wave Pipeline Layout"),
                    bind_group_layouts: &[camera_layout, &wave_layout],
                    push_constant_ranges: &[],
                });

        let pipeline =
            context
                .device
                .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some("Wave Pipeline"),
                    layout: Some(&pipeline_layout),
                    vertex: wgpu::VertexState {
                        module: &shader,
                        entry_point: Some("vs_main"),
                        buffers: &[Vertex::LAYOUT],
                        compilation_options: Default::default(),
                    },
                    fragment: Some(wgpu::FragmentState {
                        module: &shader,
                        entry_point: Some("fs_main"),
                        targets: &[Some(wgpu::ColorTargetState {
                            format: context.format(),
                            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                            write_mask: wgpu::ColorWrites::ALL,
                        })],
                        compilation_options: Default::default(),
                    }),
                    primitive: wgpu::PrimitiveState {
                        topology: wgpu::PrimitiveTopology::TriangleList,
                        cull_mode: None,
                        ..Default::default()
                    },
                    depth_stencil: Some(wgpu::DepthStencilState {
                        format: crate::gpu::texture::DepthTexture::FORMAT,
                        depth_write_enabled: true,
                        depth_compare: wgpu::CompareFunction::Less,
                        stencil: wgpu::StencilState::default(),
                        bias: wgpu::DepthBiasState::default(),
                    }),
                    multisample: wgpu::MultisampleState::default(),
                    multiview: None,
                    cache: None,
                });

        Ok(Self {
            pipeline,
            wave_layout,
        })
    }

    /// Set the pipeline on the pass. Caller binds groups 0..=1 and draws.
    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
    }

    /// Layout for creating [`WaveBinding`]s compatible with this pipeline.
    #[must_use]
    pub fn wave_layout(&self) -> &wgpu::BindGroupLayout {
        &self.wave_layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_matches_wgsl_layout() {
        // mat4 at 0, time at 64, resolution at its vec2 boundary (72),
        // struct padded to 80.
        assert_eq!(size_of::<WaveUniform>(), 80);
        assert_eq!(std::mem::offset_of!(WaveUniform, time), 64);
        assert_eq!(std::mem::offset_of!(WaveUniform, resolution), 72);
    }

    #[test]
    fn packs_surface_size_as_floats() {
        let u = WaveUniform::new(Mat4::IDENTITY, 2.5, 1280, 720);
        assert_eq!(u.resolution, [1280.0, 720.0]);
        assert!((u.time - 2.5).abs() < f32::EPSILON);
    }
}
