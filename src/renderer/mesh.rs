//! CPU-side mesh generation and the per-frame wave displacement.

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::gpu::dynamic_buffer::DynamicVertexBuffer;

/// Interleaved vertex attributes for every mesh pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in object space.
    pub position: [f32; 3],
    /// Unit normal in object space.
    pub normal: [f32; 3],
    /// Texture coordinate.
    pub uv: [f32; 2],
}

impl Vertex {
    /// Vertex buffer layout shared by every mesh pipeline.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Float32x3,
            2 => Float32x2,
        ],
    };
}

/// Indexed triangle mesh on the CPU side.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// Vertex data in the layout [`Vertex::LAYOUT`] describes.
    pub vertices: Vec<Vertex>,
    /// Triangle list indices into `vertices`.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Unit cube centered on the origin, 4 vertices per face so normals
    /// and UVs stay flat.
    pub fn cube() -> Self {
        // (normal, face axes u and v)
        const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, u_axis, v_axis) in FACES {
            let n = Vec3::from(normal);
            let u = Vec3::from(u_axis);
            let v = Vec3::from(v_axis);
            let base = vertices.len() as u32;

            for (du, dv) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
                let pos = n * 0.5 + u * du + v * dv;
                vertices.push(Vertex {
                    position: pos.to_array(),
                    normal,
                    uv: [du + 0.5, dv + 0.5],
                });
            }

            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self { vertices, indices }
    }

    /// Flat plane in the XY plane facing +Z, subdivided into a segment
    /// grid so per-vertex displacement has something to push around.
    pub fn plane(width: f32, height: f32, segments_x: u32, segments_y: u32) -> Self {
        let segments_x = segments_x.max(1);
        let segments_y = segments_y.max(1);

        let cols = segments_x + 1;
        let rows = segments_y + 1;

        let mut vertices = Vec::with_capacity((cols * rows) as usize);
        for row in 0..rows {
            for col in 0..cols {
                let fx = col as f32 / segments_x as f32;
                let fy = row as f32 / segments_y as f32;
                vertices.push(Vertex {
                    position: [(fx - 0.5) * width, (fy - 0.5) * height, 0.0],
                    normal: [0.0, 0.0, 1.0],
                    uv: [fx, fy],
                });
            }
        }

        let mut indices = Vec::with_capacity((segments_x * segments_y * 6) as usize);
        for row in 0..segments_y {
            for col in 0..segments_x {
                let a = row * cols + col;
                let b = a + 1;
                let c = a + cols;
                let d = c + 1;
                indices.extend_from_slice(&[a, b, d, a, d, c]);
            }
        }

        Self { vertices, indices }
    }
}

/// Per-frame wave displacement of plane vertices.
///
/// Each vertex's Z offset depends on its index `i` within the mesh:
/// `sin(t + i - n/2) * 0.5 + cos(t - i) * 0.5`, which stays within
/// `[-1.0, 1.0]` for all inputs.
pub fn displace_waves(base: &[Vertex], elapsed: f32, out: &mut Vec<Vertex>) {
    out.clear();
    out.extend_from_slice(base);

    let half_count = base.len() as f32 / 2.0;
    for (i, vertex) in out.iter_mut().enumerate() {
        let fi = i as f32;
        let offset =
            (elapsed + fi - half_count).sin() * 0.5 + (elapsed - fi).cos() * 0.5;
        vertex.position[2] = offset;
    }
}

/// GPU residency for a [`Mesh`]: a growable vertex buffer plus a static
/// index buffer.
pub struct GpuMesh {
    vertices: DynamicVertexBuffer<Vertex>,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    /// Upload a mesh, keeping the vertex buffer growable for per-frame
    /// rewrites.
    pub fn new(device: &wgpu::Device, label: &str, mesh: &Mesh) -> Self {
        let vertices = DynamicVertexBuffer::new_with_data(
            device,
            &format!("{label} Vertices"),
            &mesh.vertices,
            wgpu::BufferUsages::VERTEX,
        );
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Indices")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertices,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    /// Re-upload vertex data (indices are immutable).
    pub fn update_vertices(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        vertices: &[Vertex],
    ) {
        // The reallocation flag only matters for bind groups; vertex
        // buffers rebind every draw.
        let _ = self.vertices.write(device, queue, vertices);
    }

    /// Bind buffers and issue the indexed draw.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertices.buffer().slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_four_vertices_per_face() {
        let cube = Mesh::cube();
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.indices.len(), 36);
        for v in &cube.vertices {
            // All corners sit on the half-unit shell.
            let max = v
                .position
                .iter()
                .fold(0.0_f32, |acc, c| acc.max(c.abs()));
            assert!((max - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn cube_indices_in_range() {
        let cube = Mesh::cube();
        assert!(cube.indices.iter().all(|&i| (i as usize) < cube.vertices.len()));
    }

    #[test]
    fn plane_grid_counts() {
        let plane = Mesh::plane(6.0, 6.0, 10, 10);
        assert_eq!(plane.vertices.len(), 11 * 11);
        assert_eq!(plane.indices.len(), 10 * 10 * 6);
    }

    #[test]
    fn plane_spans_requested_extent() {
        let plane = Mesh::plane(6.0, 4.0, 10, 10);
        let xs: Vec<f32> = plane.vertices.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = plane.vertices.iter().map(|v| v.position[1]).collect();
        assert!((xs.iter().cloned().fold(f32::MAX, f32::min) - -3.0).abs() < 1e-6);
        assert!((xs.iter().cloned().fold(f32::MIN, f32::max) - 3.0).abs() < 1e-6);
        assert!((ys.iter().cloned().fold(f32::MAX, f32::min) - -2.0).abs() < 1e-6);
        assert!((ys.iter().cloned().fold(f32::MIN, f32::max) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn plane_clamps_zero_segments() {
        let plane = Mesh::plane(1.0, 1.0, 0, 0);
        assert_eq!(plane.vertices.len(), 4);
        assert_eq!(plane.indices.len(), 6);
    }

    #[test]
    fn wave_displacement_stays_bounded() {
        let plane = Mesh::plane(6.0, 6.0, 10, 10);
        let mut scratch = Vec::new();
        for step in 0..200 {
            let elapsed = step as f32 * 0.173;
            displace_waves(&plane.vertices, elapsed, &mut scratch);
            assert_eq!(scratch.len(), plane.vertices.len());
            for v in &scratch {
                assert!(v.position[2].abs() <= 1.0 + 1e-5);
            }
        }
    }

    #[test]
    fn wave_displacement_leaves_xy_untouched() {
        let plane = Mesh::plane(6.0, 6.0, 10, 10);
        let mut scratch = Vec::new();
        displace_waves(&plane.vertices, 2.5, &mut scratch);
        for (orig, moved) in plane.vertices.iter().zip(&scratch) {
            assert_eq!(orig.position[0], moved.position[0]);
            assert_eq!(orig.position[1], moved.position[1]);
            assert_eq!(orig.uv, moved.uv);
        }
    }

    #[test]
    fn wave_displacement_varies_across_vertices() {
        let plane = Mesh::plane(6.0, 6.0, 10, 10);
        let mut scratch = Vec::new();
        displace_waves(&plane.vertices, 1.0, &mut scratch);
        let first = scratch[0].position[2];
        assert!(scratch.iter().any(|v| (v.position[2] - first).abs() > 1e-3));
    }
}
