//! Lighting uniform and bind group shared by the mesh pipeline.

use wgpu::util::DeviceExt;

use crate::options::LightingOptions;

/// Std140-compatible lighting data. Layout mirrors `LightsUniform` in
/// `modules/lighting.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    /// Point light position in world space.
    pub point_position: [f32; 3],
    /// Point light intensity multiplier.
    pub point_intensity: f32,
    /// Point light color.
    pub point_color: [f32; 3],
    /// Ambient term intensity.
    pub ambient_intensity: f32,
    /// Ambient term color.
    pub ambient_color: [f32; 3],
    /// Blinn-Phong specular exponent.
    pub shininess: f32,
}

impl LightsUniform {
    /// Build the uniform from the lighting options section.
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Self {
        Self {
            point_position: options.point_position,
            point_intensity: options.point_intensity,
            point_color: options.point_color,
            ambient_intensity: options.ambient,
            ambient_color: options.ambient_color,
            shininess: options.shininess,
        }
    }

    /// Copy with both light intensities scaled, for views that run the
    /// same rig dimmer.
    pub fn scaled(mut self, factor: f32) -> Self {
        self.point_intensity *= factor;
        self.ambient_intensity *= factor;
        self
    }
}

/// GPU residency for [`LightsUniform`]: buffer, layout, and bind group.
pub struct Lights {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl Lights {
    /// Bind group layout for the lights uniform (fragment stage only).
    pub fn layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Lights Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
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
        uniform: LightsUniform,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lights Buffer"),
            contents: bytemuck::bytes_of(&uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Lights Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self { buffer, bind_group }
    }

    /// Overwrite the uniform contents.
    pub fn set(&self, queue: &wgpu::Queue, uniform: LightsUniform) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&uniform));
    }

    /// The bind group for render pass binding.
    #[must_use]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_matches_wgsl_size() {
        // Three vec4-sized rows.
        assert_eq!(size_of::<LightsUniform>(), 48);
    }

    #[test]
    fn from_options_maps_all_fields() {
        let options = LightingOptions::default();
        let uniform = LightsUniform::from_options(&options);
        assert_eq!(uniform.point_intensity, options.point_intensity);
        assert_eq!(uniform.ambient_intensity, options.ambient);
        assert_eq!(uniform.point_position, options.point_position);
        assert_eq!(uniform.shininess, options.shininess);
    }

    #[test]
    fn scaled_dims_both_terms() {
        let uniform = LightsUniform::from_options(&LightingOptions::default());
        let dim = uniform.scaled(0.5);
        assert_eq!(dim.point_intensity, uniform.point_intensity * 0.5);
        assert_eq!(dim.ambient_intensity, uniform.ambient_intensity * 0.5);
        assert_eq!(dim.shininess, uniform.shininess);
    }
}
