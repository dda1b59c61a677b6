//! Blinn-Phong mesh pipeline.
//!
//! One pipeline serves every lit draw in both views. Solid-color meshes
//! bind the 1x1 white fallback texture, so textured and untextured
//! objects share bind group layouts and the pass never switches
//! pipelines.

use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::{
    error::LumenError,
    gpu::{
        render_context::RenderContext, shader_composer::ShaderComposer,
        texture::GpuTexture,
    },
    renderer::mesh::Vertex,
};

/// Per-object uniform: model matrix, tint color, and UV rotation angle.
/// Layout mirrors `ObjectUniform` in `raster/mesh.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    /// Object-to-world transform, column major.
    pub model: [[f32; 4]; 4],
    /// Base color multiplied into the texture sample.
    pub color: [f32; 4],
    /// UV rotation around the texture center, radians.
    pub uv_angle: f32,
    /// Pads the struct to a 16-byte multiple.
    pub _pad: [f32; 3],
}

impl ObjectUniform {
    /// Pack a transform, color, and UV spin for upload.
    #[must_use]
    pub fn new(model: Mat4, color: [f32; 4], uv_angle: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
            uv_angle,
            _pad: [0.0; 3],
        }
    }
}

/// Per-object uniform buffer and bind group (group 2 in the mesh shader).
pub struct ObjectBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ObjectBinding {
    /// Bind group layout for the per-object uniform.
    pub fn layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object Layout"),
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
        })
    }

    /// Upload the initial uniform and build the bind group.
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniform: ObjectUniform,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Object Buffer"),
            contents: bytemuck::bytes_of(&uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self { buffer, bind_group }
    }

    /// Overwrite the uniform contents.
    pub fn set(&self, queue: &wgpu::Queue, uniform: ObjectUniform) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&uniform));
    }

    /// The bind group for render pass binding.
    #[must_use]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// The lit mesh pipeline plus the layouts callers need to create
/// per-object and texture bind groups.
pub struct PhongPipeline {
    pipeline: wgpu::RenderPipeline,
    object_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,
}

impl PhongPipeline {
    /// Compose the mesh shader and build the pipeline against the surface
    /// format.
    ///
    /// # Errors
    ///
    /// Returns an error if shader composition fails.
    pub fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        camera_layout: &wgpu::BindGroupLayout,
        lights_layout: &wgpu::BindGroupLayout,
    ) -> Result<Self, LumenError> {
        let shader = composer.compose(
            &context.device,
            "Phong Mesh Shader",
            include_str!("../../assets/shaders/raster/mesh.wgsl"),
            "raster/mesh.wgsl",
        )?;

        let object_layout = ObjectBinding::layout(&context.device);
        let texture_layout = GpuTexture::layout(&context.device);

        let pipeline_layout =
            context
                .device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("Phong Pipeline Layout"),
                    bind_group_layouts: &[
                        camera_layout,
                        lights_layout,
                        &object_layout,
                        &texture_layout,
                    ],
                    push_constant_ranges: &[],
                });

        let pipeline =
            context
                .device
                .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some("Phong Pipeline"),
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
            object_layout,
            texture_layout,
        })
    }

    /// Set the pipeline on the pass. Caller binds groups 0..=3 and draws.
    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
    }

    /// Layout for creating [`ObjectBinding`]s compatible with this
    /// pipeline.
    #[must_use]
    pub fn object_layout(&self) -> &wgpu::BindGroupLayout {
        &self.object_layout
    }

    /// Layout for creating texture bind groups compatible with this
    /// pipeline.
    #[must_use]
    pub fn texture_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_layout
    }
}
