//! glTF model loading.
//!
//! Flattens the default scene's node hierarchy into a single [`Mesh`],
//! baking node transforms into the vertices. Materials are ignored; the
//! loaded model draws with the view's own tint color.

use std::path::Path;

use glam::{Mat3, Mat4, Vec3};

use crate::{
    error::LumenError,
    renderer::mesh::{Mesh, Vertex},
};

/// Load a glTF (or GLB) file and flatten it into one mesh.
///
/// # Errors
///
/// Returns [`LumenError::Asset`] if the file cannot be read or parsed.
pub fn load_gltf(path: &Path) -> Result<Mesh, LumenError> {
    let (document, buffers, _images) = gltf::import(path)
        .map_err(|e| LumenError::Asset(format!("{}: {e}", path.display())))?;

    let mut mesh = Mesh::default();

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| {
            LumenError::Asset(format!("{}: no scenes", path.display()))
        })?;

    for node in scene.nodes() {
        flatten_node(&node, Mat4::IDENTITY, &buffers, &mut mesh);
    }

    if mesh.vertices.is_empty() {
        return Err(LumenError::Asset(format!(
            "{}: no mesh data",
            path.display()
        )));
    }

    Ok(mesh)
}

fn flatten_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut Mesh,
) {
    let local = Mat4::from_cols_array_2d(&node.transform().matrix());
    let world = parent * local;

    if let Some(gltf_mesh) = node.mesh() {
        let normal_matrix = Mat3::from_mat4(world).inverse().transpose();

        for primitive in gltf_mesh.primitives() {
            let reader =
                primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let positions: Vec<[f32; 3]> = positions.collect();

            let normals: Vec<[f32; 3]> = reader
                .read_normals()
                .map(|iter| iter.collect())
                .unwrap_or_else(|| vec![[0.0, 0.0, 1.0]; positions.len()]);

            let uvs: Vec<[f32; 2]> = reader
                .read_tex_coords(0)
                .map(|iter| iter.into_f32().collect())
                .unwrap_or_else(|| vec![[0.0, 0.0]; positions.len()]);

            let base = out.vertices.len() as u32;

            for ((position, normal), uv) in
                positions.iter().zip(&normals).zip(&uvs)
            {
                let world_pos = world.transform_point3(Vec3::from(*position));
                let world_normal =
                    (normal_matrix * Vec3::from(*normal)).normalize_or_zero();
                out.vertices.push(Vertex {
                    position: world_pos.to_array(),
                    normal: world_normal.to_array(),
                    uv: *uv,
                });
            }

            match reader.read_indices() {
                Some(indices) => {
                    out.indices
                        .extend(indices.into_u32().map(|i| base + i));
                }
                None => {
                    // Non-indexed primitive: sequential triangles.
                    out.indices
                        .extend((0..positions.len() as u32).map(|i| base + i));
                }
            }
        }
    }

    for child in node.children() {
        flatten_node(&child, world, buffers, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_asset_error() {
        let result = load_gltf(Path::new("/nonexistent/model.gltf"));
        assert!(matches!(result, Err(LumenError::Asset(_))));
    }
}
