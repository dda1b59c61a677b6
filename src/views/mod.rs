//! The switchable scene views.
//!
//! Each view owns its own camera, lights, and scene objects, and renders
//! into a pass the engine opens with the view's background color. Views
//! are registered in a fixed order; the scene model's `active_view` index
//! selects which one updates and draws.

use crate::{
    error::LumenError,
    gpu::{
        render_context::RenderContext, shader_composer::ShaderComposer,
        texture::GpuTexture,
    },
    model::SceneModel,
    options::Options,
    renderer::{
        lighting::{Lights, LightsUniform},
        phong::PhongPipeline,
        wave::WavePipeline,
    },
};

/// First view: lit cube, wave-displaced plane, loaded model.
pub mod view_one;
/// Second view: wave-shaded cube, textured plane, recolorable background.
pub mod view_two;

pub use view_one::ViewOne;
pub use view_two::ViewTwo;

/// Pipelines and layouts shared by every view.
pub struct SceneResources {
    /// Layout every view camera binds at group 0.
    pub camera_layout: wgpu::BindGroupLayout,
    /// Layout every view light rig binds at group 1.
    pub lights_layout: wgpu::BindGroupLayout,
    /// Blinn-Phong pipeline for solid meshes.
    pub phong: PhongPipeline,
    /// Wave pipeline compiled from the runtime shader pair.
    pub wave: WavePipeline,
    /// 1x1 white fallback bound by untextured draws.
    pub white: GpuTexture,
}

impl SceneResources {
    /// Build the shared pipelines. The wave pipeline compiles from the
    /// runtime shader sources carried in the scene model.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::ShaderCompose`] if a shader fails to build.
    pub fn new(
        context: &RenderContext,
        model: &SceneModel,
    ) -> Result<Self, LumenError> {
        let mut composer = ShaderComposer::new()?;

        let camera_layout =
            crate::camera::CameraBinding::layout(&context.device);
        let lights_layout = Lights::layout(&context.device);

        let phong = PhongPipeline::new(
            context,
            &mut composer,
            &camera_layout,
            &lights_layout,
        )?;
        let wave = WavePipeline::new(
            context,
            &mut composer,
            &camera_layout,
            &model.vertex_shader,
            &model.fragment_shader,
        )?;
        let white = GpuTexture::white(
            &context.device,
            &context.queue,
            phong.texture_layout(),
        );

        Ok(Self {
            camera_layout,
            lights_layout,
            phong,
            wave,
            white,
        })
    }
}

/// A renderable scene view.
pub trait View {
    /// Display name, surfaced in the debug panel.
    fn name(&self) -> &'static str;

    /// Clear color for this view's render pass.
    fn background(&self) -> wgpu::Color;

    /// Recolor the background. Views that keep a fixed background ignore
    /// this.
    fn set_background(&mut self, _color: [f32; 3]) {}

    /// Apply updated lighting options. Views may scale the shared rig to
    /// their own mood.
    fn set_lighting(&mut self, queue: &wgpu::Queue, base: LightsUniform);

    /// Surface resized; update cameras and resolution-dependent uniforms.
    fn resize(&mut self, queue: &wgpu::Queue, width: u32, height: u32);

    /// Advance animations and sync GPU state for this frame.
    fn update(
        &mut self,
        context: &RenderContext,
        resources: &SceneResources,
        model: &SceneModel,
        elapsed: f32,
        delta: f32,
    );

    /// Record draws into an already-opened pass.
    fn render<'a>(
        &'a self,
        pass: &mut wgpu::RenderPass<'a>,
        resources: &'a SceneResources,
    );
}

/// A view's camera with its GPU residency kept in sync.
pub struct ViewCamera {
    camera: crate::camera::Camera,
    uniform: crate::camera::CameraUniform,
    binding: crate::camera::CameraBinding,
}

impl ViewCamera {
    /// Build a camera facing the origin and upload its uniform.
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        options: &crate::options::CameraOptions,
        width: u32,
        height: u32,
    ) -> Self {
        let aspect = if height > 0 {
            width as f32 / height as f32
        } else {
            1.0
        };
        let camera = crate::camera::Camera::facing_origin(
            options.distance,
            aspect,
            options.fovy,
            options.znear,
            options.zfar,
        );
        let mut uniform = crate::camera::CameraUniform::new();
        uniform.update_view_proj(&camera);
        let binding = crate::camera::CameraBinding::new(device, layout, uniform);

        Self {
            camera,
            uniform,
            binding,
        }
    }

    /// Update the aspect ratio and re-upload the view projection.
    pub fn resize(&mut self, queue: &wgpu::Queue, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
        self.uniform.update_view_proj(&self.camera);
        self.binding.set(queue, self.uniform);
    }

    /// The camera bind group for render pass binding.
    #[must_use]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        self.binding.bind_group()
    }
}

/// Build the view registry in presentation order.
pub fn build_views(
    context: &RenderContext,
    resources: &SceneResources,
    options: &Options,
    width: u32,
    height: u32,
) -> Vec<Box<dyn View>> {
    vec![
        Box::new(ViewOne::new(context, resources, options, width, height)),
        Box::new(ViewTwo::new(context, resources, options, width, height)),
    ]
}
