//! The core engine: owns the GPU context, the scene model, the view
//! registry, and the UI end of the host bridge.

mod export;
mod frame;
mod input;

use std::fs;
use std::path::Path;

use crate::bridge::{LedStatus, UiBridge};
use crate::error::LumenError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::DepthTexture;
use crate::model::SceneModel;
use crate::options::Options;
use crate::util::clock::AnimationClock;
use crate::util::frame_timing::FrameTiming;
use crate::views::{self, SceneResources, View};

/// Wave shader sources on disk, editable without rebuilding. The embedded
/// copies back them up when the files are missing.
const VERT_PATH: &str = "assets/shaders/wave.vert.wgsl";
const FRAG_PATH: &str = "assets/shaders/wave.frag.wgsl";

/// The rendering engine behind the viewer window.
///
/// # Frame loop
///
/// Each frame, call [`render`](Self::render) to tick and present. Call
/// [`resize`](Self::resize) when the window size changes. Input is
/// forwarded via [`handle_input`](Self::handle_input) and key actions via
/// [`execute_action`](Self::execute_action).
///
/// # Bridge
///
/// The engine holds the UI endpoint of the host bridge: it drains inbound
/// events at the top of every frame and pushes the LED brightness out on
/// every tick while the first view is active.
pub struct LumenEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    resources: SceneResources,
    views: Vec<Box<dyn View>>,
    model: SceneModel,
    options: Options,
    clock: AnimationClock,
    /// Per-frame timing and FPS tracking.
    pub frame_timing: FrameTiming,
    depth: DepthTexture,
    bridge: UiBridge,
    /// Normalized pointer position, y up. Stored for prospective
    /// ray-casting; nothing consumes it yet.
    pointer: (f32, f32),
    /// Path of the most recent frame export, for the panel to pick up.
    last_export: Option<String>,
}

impl LumenEngine {
    /// Build the engine against a window surface.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError`] if GPU initialization or shader composition
    /// fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
        bridge: UiBridge,
    ) -> Result<Self, LumenError> {
        let context = RenderContext::new(window, size).await?;

        let model = SceneModel {
            vertex_shader: load_shader_source(
                VERT_PATH,
                include_str!("../../assets/shaders/wave.vert.wgsl"),
            ),
            fragment_shader: load_shader_source(
                FRAG_PATH,
                include_str!("../../assets/shaders/wave.frag.wgsl"),
            ),
            ..SceneModel::default()
        };

        let resources = SceneResources::new(&context, &model)?;
        let views =
            views::build_views(&context, &resources, &options, size.0, size.1);
        let depth = DepthTexture::new(&context.device, size.0, size.1);

        // The LED tracks whether the first view is up.
        bridge.write_led_status(LedStatus::On);

        Ok(Self {
            context,
            resources,
            views,
            model,
            options,
            clock: AnimationClock::new(),
            frame_timing: FrameTiming::new(),
            depth,
            bridge,
            pointer: (0.0, 0.0),
            last_export: None,
        })
    }

    /// Execute one frame: drain bridge events, tick the active view, draw,
    /// and present.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.tick();

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        self.encode_scene_pass(&mut encoder, &view, &self.depth.view);
        self.context.submit(encoder);
        frame.present();

        self.frame_timing.end_frame();
        Ok(())
    }

    /// Record the active view's pass against arbitrary color/depth
    /// attachments. Shared by the swapchain path and frame export.
    fn encode_scene_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color: &wgpu::TextureView,
        depth: &wgpu::TextureView,
    ) {
        let active = &self.views[self.model.active_view];
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(active.background()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                },
            ),
            ..Default::default()
        });

        active.render(&mut pass, &self.resources);
    }

    /// Resize the surface, depth buffer, and every view's camera.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.depth = DepthTexture::new(&self.context.device, width, height);
        for view in &mut self.views {
            view.resize(&self.context.queue, width, height);
        }
    }
}

// ── Accessors and model edits ────────────────────────────────────────────

impl LumenEngine {
    /// Current runtime options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the options wholesale (from the panel's schema UI). Lighting
    /// changes land on the GPU immediately; camera projection options are
    /// read at startup.
    pub fn set_options(&mut self, options: Options) {
        self.options = options;
        let base = crate::renderer::lighting::LightsUniform::from_options(
            &self.options.lighting,
        );
        for view in &mut self.views {
            view.set_lighting(&self.context.queue, base);
        }
    }

    /// Current scene parameter state.
    #[must_use]
    pub fn model(&self) -> &SceneModel {
        &self.model
    }

    /// Display name of the view currently rendering.
    pub fn active_view_name(&self) -> &'static str {
        self.views[self.model.active_view].name()
    }

    /// Set one of the panel-bound scene parameters, clamped to its
    /// configured slider range. Unknown names are logged and dropped.
    pub fn apply_param(&mut self, name: &str, value: f32) {
        let panel = &self.options.panel;
        match name {
            "group_x" => self.model.group_x = panel.group_x.clamp(value),
            "group_y" => self.model.group_y = panel.group_y.clamp(value),
            "group_angle" => {
                self.model.group_angle = panel.group_angle.clamp(value);
            }
            _ => log::warn!("unknown panel parameter: {name}"),
        }
    }

    /// Take the path of a finished frame export, if one is pending.
    pub fn take_export_path(&mut self) -> Option<String> {
        self.last_export.take()
    }

    fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Report the view switch to the LED: lit while the first view is up.
    fn push_led_status(&self) {
        let status = if self.model.active_view == 0 {
            LedStatus::On
        } else {
            LedStatus::Off
        };
        self.bridge.write_led_status(status);
    }
}

/// Read a wave shader stage from disk, falling back to the embedded copy.
fn load_shader_source(path: &str, fallback: &str) -> String {
    match fs::read_to_string(Path::new(path)) {
        Ok(source) => source,
        Err(e) => {
            log::debug!("using embedded shader for {path}: {e}");
            fallback.to_owned()
        }
    }
}
