//! First view: a spinning lit cube, a wave-displaced plane behind it, and
//! an asynchronously loaded glTF model off to the side. Cube and model
//! share a group that follows the scene model's position and rotation;
//! the plane is anchored to the scene and stays put.

use glam::{Mat4, Vec3};

use crate::{
    assets::{self, AssetHandle},
    gpu::{render_context::RenderContext, texture::GpuTexture},
    model::SceneModel,
    options::Options,
    renderer::{
        lighting::{Lights, LightsUniform},
        mesh::{self, GpuMesh, Mesh, Vertex},
        phong::{ObjectBinding, ObjectUniform},
    },
};

use super::{SceneResources, View, ViewCamera};

const TEXTURE_PATH: &str = "assets/textures/crate.png";
const MODEL_PATH: &str = "assets/models/duck.glb";

/// Cube tint before the crate texture finishes loading.
const CUBE_PINK: [f32; 4] = [1.0, 0.42, 0.72, 1.0];
const PLANE_BLUE: [f32; 4] = [0.33, 0.55, 0.80, 1.0];
const MODEL_GRAY: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

/// Loaded model sits to the right of the cube, shrunk to scene scale.
const MODEL_OFFSET_X: f32 = 2.0;
const MODEL_SCALE: f32 = 0.01;

/// The wave plane hangs behind the group, outside it.
const PLANE_OFFSET_Z: f32 = -2.0;

/// Spin rate matching one hundredth of a radian per frame at 60 fps.
const SPIN_RATE: f32 = 0.6;

/// First view: spinning pink cube (textured once the crate texture
/// resolves), CPU-displaced wave plane, and the loaded glTF model.
pub struct ViewOne {
    camera: ViewCamera,
    lights: Lights,

    cube: GpuMesh,
    cube_object: ObjectBinding,
    crate_texture: Option<GpuTexture>,
    texture_load: AssetHandle<assets::texture::RgbaPixels>,
    cube_spin: f32,

    plane_base: Vec<Vertex>,
    plane_scratch: Vec<Vertex>,
    plane: GpuMesh,
    plane_object: ObjectBinding,

    model_load: AssetHandle<Mesh>,
    loaded_model: Option<(GpuMesh, ObjectBinding)>,
    model_spin: f32,
}

impl ViewOne {
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
            LightsUniform::from_options(&options.lighting),
        );

        let cube_mesh = Mesh::cube();
        let cube = GpuMesh::new(device, "View One Cube", &cube_mesh);
        let cube_object = ObjectBinding::new(
            device,
            resources.phong.object_layout(),
            ObjectUniform::new(Mat4::IDENTITY, CUBE_PINK, 0.0),
        );

        let plane_mesh = Mesh::plane(6.0, 6.0, 10, 10);
        let plane = GpuMesh::new(device, "View One Plane", &plane_mesh);
        let plane_object = ObjectBinding::new(
            device,
            resources.phong.object_layout(),
            ObjectUniform::new(Self::plane_transform(), PLANE_BLUE, 0.0),
        );

        let texture_load = AssetHandle::spawn("crate-texture", || {
            assets::texture::load_rgba8(std::path::Path::new(TEXTURE_PATH))
        });
        let model_load = AssetHandle::spawn("duck-model", || {
            assets::model::load_gltf(std::path::Path::new(MODEL_PATH))
        });

        Self {
            camera,
            lights,
            cube,
            cube_object,
            crate_texture: None,
            texture_load,
            cube_spin: 0.0,
            plane_base: plane_mesh.vertices,
            plane_scratch: Vec::new(),
            plane,
            plane_object,
            model_load,
            loaded_model: None,
            model_spin: 0.0,
        }
    }

    /// Group transform driven by the debug panel and bridge input.
    fn group_transform(model: &SceneModel) -> Mat4 {
        Mat4::from_translation(Vec3::new(model.group_x, model.group_y, 0.0))
            * Mat4::from_rotation_z(model.group_angle)
    }

    /// The plane's fixed scene transform; the group never touches it.
    fn plane_transform() -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, PLANE_OFFSET_Z))
    }
}

/// White once the shared crate texture is bound, the flat tint before.
fn material_tint(texture_ready: bool, untextured: [f32; 4]) -> [f32; 4] {
    if texture_ready {
        [1.0, 1.0, 1.0, 1.0]
    } else {
        untextured
    }
}

impl View for ViewOne {
    fn name(&self) -> &'static str {
        "Scene One"
    }

    fn background(&self) -> wgpu::Color {
        wgpu::Color::WHITE
    }

    fn set_lighting(&mut self, queue: &wgpu::Queue, base: LightsUniform) {
        self.lights.set(queue, base);
    }

    fn resize(&mut self, queue: &wgpu::Queue, width: u32, height: u32) {
        self.camera.resize(queue, width, height);
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
            self.crate_texture = Some(GpuTexture::from_rgba8(
                device,
                queue,
                resources.phong.texture_layout(),
                &pixels.pixels,
                pixels.width,
                pixels.height,
                "Crate Texture",
            ));
        }
        if let Some(mesh) = self.model_load.poll() {
            let gpu_mesh = GpuMesh::new(device, "View One Model", &mesh);
            let binding = ObjectBinding::new(
                device,
                resources.phong.object_layout(),
                ObjectUniform::new(Mat4::IDENTITY, MODEL_GRAY, 0.0),
            );
            self.loaded_model = Some((gpu_mesh, binding));
        }

        let group = Self::group_transform(model);

        self.cube_spin += delta * SPIN_RATE;
        let texture_ready = self.crate_texture.is_some();
        self.cube_object.set(
            queue,
            ObjectUniform::new(
                group
                    * Mat4::from_rotation_x(self.cube_spin)
                    * Mat4::from_rotation_y(self.cube_spin),
                material_tint(texture_ready, CUBE_PINK),
                0.0,
            ),
        );

        mesh::displace_waves(&self.plane_base, elapsed, &mut self.plane_scratch);
        self.plane
            .update_vertices(device, queue, &self.plane_scratch);

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
                    material_tint(texture_ready, MODEL_GRAY),
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

        let crate_texture = self
            .crate_texture
            .as_ref()
            .unwrap_or(&resources.white);
        pass.set_bind_group(2, self.cube_object.bind_group(), &[]);
        pass.set_bind_group(3, &crate_texture.bind_group, &[]);
        self.cube.draw(pass);

        pass.set_bind_group(2, self.plane_object.bind_group(), &[]);
        pass.set_bind_group(3, &resources.white.bind_group, &[]);
        self.plane.draw(pass);

        if let Some((mesh, binding)) = &self.loaded_model {
            pass.set_bind_group(2, binding.bind_group(), &[]);
            pass.set_bind_group(3, &crate_texture.bind_group, &[]);
            mesh.draw(pass);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_stays_anchored_while_group_moves() {
        let model = SceneModel {
            group_x: 1.5,
            group_y: -0.5,
            group_angle: 0.8,
            ..SceneModel::default()
        };

        // The group transform reacts to the edits...
        assert_ne!(
            ViewOne::group_transform(&model),
            ViewOne::group_transform(&SceneModel::default())
        );
        // ...while the plane keeps its fixed scene offset.
        assert_eq!(
            ViewOne::plane_transform(),
            Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0))
        );
    }

    #[test]
    fn texture_arrival_whitens_cube_and_model() {
        assert_eq!(material_tint(false, CUBE_PINK), CUBE_PINK);
        assert_eq!(material_tint(false, MODEL_GRAY), MODEL_GRAY);
        assert_eq!(material_tint(true, CUBE_PINK), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(material_tint(true, MODEL_GRAY), [1.0, 1.0, 1.0, 1.0]);
    }
}
