//! Second view: the cube runs the runtime-loaded wave shader, the plane
//! is textured with a slowly rotating UV transform, and the background
//! color can be recolored over the bridge.

use glam::{Mat4, Vec3};

use crate::{
    assets::{self, AssetHandle},
    gpu::{render_context::RenderContext, texture::GpuTexture},
    model::SceneModel,
    options::Options,
    renderer::{
        lighting::{Lights, LightsUniform},
        mesh::{GpuMesh, Mesh},
        phong::{ObjectBinding, ObjectUniform},
        wave::{WaveBinding, WaveUniform},
    },
};

use super::{SceneResources, View, ViewCamera};

const TEXTURE_PATH: &str = "assets/textures/crate.png";
const MODEL_PATH: &str = "assets/models/duck.glb";

const DEFAULT_BACKGROUND: [f32; 3] = [0.07, 0.07, 0.12];
const PLANE_TINT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const MODEL_GRAY: [f32; 4] = [0.6, 0.6, 0.65, 1.0];

const MODEL_OFFSET_X: f32 = 2.0;
const MODEL_SCALE: f32 = 0.01;

/// The textured backdrop plane hangs behind the group, outside it.
const PLANE_OFFSET_Z: f32 = -2.0;
const SPIN_RATE: f32 = 0.6;

/// This view runs the shared light rig dimmer to match its dark backdrop.
const LIGHT_DIM: f32 = 0.5;

/// UV rotation rate for the plane texture, radians per second.
const UV_SPIN_RATE: f32 = 0.25;

/// Second view: wave-shaded cube, textured plane with a spinning UV
/// mapping, the loaded glTF model, and a recolorable background.
pub struct ViewTwo {
    camera: ViewCamera,
    lights: Lights,
    background: [f32; 3],
    surface_size: (u32, u32),

    cube: GpuMesh,
    cube_wave: WaveBinding,
    cube_spin: f32,

    plane: GpuMesh,
    plane_object: ObjectBinding,
    plane_texture: Option<GpuTexture>,
    texture_load: AssetHandle<assets::texture::RgbaPixels>,

    model_load: AssetHandle<Mesh>,
    loaded_model: Option<(GpuMesh, ObjectBinding)>,
    model_spin: f32,
}

impl ViewTwo {
    /// Build the view's meshes, bindings, and kick off async asset loads.
    pub fn new(
        context: &RenderContext,
        resources: &SceneResources,
        options: &Options,
        width: u32,
        height: u32,
    ) -> Self {
        let device = &context.device;

        let camera = ViewCamera::new(
            device,
            &resources.camera_layout,
            &options.camera,
            width,
            height,
        );
        let lights = Lights::new(
            device,
            &resources.lights_layout,
            LightsUniform::from_options(&options.lighting).scaled(LIGHT_DIM),
        );

        let cube = GpuMesh::new(device, "View Two Cube", &Mesh::cube());
        let cube_wave = WaveBinding::new(
            device,
            resources.wave.wave_layout(),
            WaveUniform::new(Mat4::IDENTITY, 0.0, width, height),
        );

        let plane = GpuMesh::new(
            device,
            "View Two Plane",
            &Mesh::plane(4.0, 4.0, 1, 1),
        );
        let plane_object = ObjectBinding::new(
            device,
            resources.phong.object_layout(),
            ObjectUniform::new(Mat4::IDENTITY, PLANE_TINT, 0.0),
        );

        let texture_load = AssetHandle::spawn("crate-texture-2", || {
            assets::texture::load_rgba8(std::path::Path::new(TEXTURE_PATH))
        });
        let model_load = AssetHandle::spawn("duck-model-2", || {
            assets::model::load_gltf(std::path::Path::new(MODEL_PATH))
        });

        Self {
            camera,
            lights,
            background: DEFAULT_BACKGROUND,
            surface_size: (width, height),
            cube,
            cube_wave,
            cube_spin: 0.0,
            plane,
            plane_object,
            plane_texture: None,
            texture_load,
            model_load,
            loaded_model: None,
            model_spin: 0.0,
        }
    }

    fn group_transform(model: &SceneModel) -> Mat4 {
        Mat4::from_translation(Vec3::new(model.group_x, model.group_y, 0.0))
            * Mat4::from_rotation_z(model.group_angle)
    }
}

impl View for ViewTwo {
    fn name(&self) -> &'static str {
        "Scene Two"
    }

    fn background(&self) -> wgpu::Color {
        wgpu::Color {
            r: f64::from(self.background[0]),
            g: f64::from(self.background[1]),
            b: f64::from(self.background[2]),
            a: 1.0,
        }
    }

    fn set_background(&mut self, color: [f32; 3]) {
        self.background = color;
    }

    fn set_lighting(&mut self, queue: &wgpu::Queue, base: LightsUniform) {
        self.lights.set(queue, base.scaled(LIGHT_DIM));
    }

    fn resize(&mut self, queue: &wgpu::Queue, width: u32, height: u32) {
        self.camera.resize(queue, width, height);
        self.surface_size = (width, height);
    }

    fn update(
        &mut self,
        context: &RenderContext,
        resources: &SceneResources,
        model: &SceneModel,
        elapsed: f32,
        delta: f32,
    ) {
        let device = &context.device;
        let queue = &context.queue;

        if let Some(pixels) = self.texture_load.poll() {
            self.plane_texture = Some(GpuTexture::from_rgba8(
                device,
                queue,
                resources.phong.texture_layout(),
                &pixels.pixels,
                pixels.width,
                pixels.height,
                "Plane Texture",
            ));
        }
        if let Some(mesh) = self.model_load.poll() {
            let gpu_mesh = GpuMesh::new(device, "View Two Model", &mesh);
            let binding = ObjectBinding::new(
                device,
                resources.phong.object_layout(),
                ObjectUniform::new(Mat4::IDENTITY, MODEL_GRAY, 0.0),
            );
            self.loaded_model = Some((gpu_mesh, binding));
        }

        let group = Self::group_transform(model);
        let (width, height) = self.surface_size;

        self.cube_spin += delta * SPIN_RATE;
        self.cube_wave.set(
            queue,
            WaveUniform::new(
                group
                    * Mat4::from_rotation_x(self.cube_spin)
                    * Mat4::from_rotation_y(self.cube_spin),
                elapsed,
                width,
                height,
            ),
        );

        // The backdrop plane is anchored to the scene; only its texture
        // spins, via the uv-rotation uniform.
        self.plane_object.set(
            queue,
            ObjectUniform::new(
                Mat4::from_translation(Vec3::new(0.0, 0.0, PLANE_OFFSET_Z)),
                PLANE_TINT,
                elapsed * UV_SPIN_RATE,
            ),
        );

        self.model_spin += delta * SPIN_RATE;
        if let Some((_, binding)) = &self.loaded_model {
            binding.set(
                queue,
                ObjectUniform::new(
                    group
                        * Mat4::from_translation(Vec3::new(MODEL_OFFSET_X, 0.0, 0.0))
                        * Mat4::from_rotation_x(self.model_spin)
                        * Mat4::from_rotation_y(self.model_spin)
                        * Mat4::from_scale(Vec3::splat(MODEL_SCALE)),
                    MODEL_GRAY,
                    0.0,
                ),
            );
        }
    }

    fn render<'a>(
        &'a self,
        pass: &mut wgpu::RenderPass<'a>,
        resources: &'a SceneResources,
    ) {
        resources.phong.bind(pass);
        pass.set_bind_group(0, self.camera.bind_group(), &[]);
        pass.set_bind_group(1, self.lights.bind_group(), &[]);

        let plane_texture = self
            .plane_texture
            .as_ref()
            .unwrap_or(&resources.white);
        pass.set_bind_group(2, self.plane_object.bind_group(), &[]);
        pass.set_bind_group(3, &plane_texture.bind_group, &[]);
        self.plane.draw(pass);

        if let Some((mesh, binding)) = &self.loaded_model {
            pass.set_bind_group(2, binding.bind_group(), &[]);
            pass.set_bind_group(3, &resources.white.bind_group, &[]);
            mesh.draw(pass);
        }

        resources.wave.bind(pass);
        pass.set_bind_group(0, self.camera.bind_group(), &[]);
        pass.set_bind_group(1, self.cube_wave.bind_group(), &[]);
        self.cube.draw(pass);
    }
}
