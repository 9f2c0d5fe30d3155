use cgmath::InnerSpace;

use crate::data_structures::model::ModelVertex;

/// Read one glTF primitive into vertices and triangle-list indices.
///
/// Non-indexed primitives get sequential indices. Missing normals are
/// reconstructed from the triangles, see [`compute_normals`].
pub fn read_primitive(
    primitive: &gltf::mesh::Primitive,
    buffers: &[Vec<u8>],
) -> (Vec<ModelVertex>, Vec<u32>) {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));

    let mut vertices: Vec<ModelVertex> = match reader.read_positions() {
        Some(positions) => positions
            .map(|position| ModelVertex {
                position,
                ..Default::default()
            })
            .collect(),
        None => return (Vec::new(), Vec::new()),
    };

    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..vertices.len() as u32).collect(),
    };

    if let Some(tex_coords) = reader.read_tex_coords(0).map(|v| v.into_f32()) {
        vertices
            .iter_mut()
            .zip(tex_coords)
            .for_each(|(vertex, uv)| vertex.tex_coords = uv);
    }

    match reader.read_normals() {
        Some(normals) => vertices
            .iter_mut()
            .zip(normals)
            .for_each(|(vertex, normal)| vertex.normal = normal),
        None => compute_normals(&mut vertices, &indices),
    }

    (vertices, indices)
}

/**
 * Area-weighted smooth normals: every triangle adds its (unnormalized) face
 * normal to its three corners, the sums are normalized at the end.
 *
 * Triangles that reference vertices out of range are skipped.
 */
pub fn compute_normals(vertices: &mut [ModelVertex], indices: &[u32]) {
    let mut sums = vec![cgmath::Vector3::new(0.0f32, 0.0, 0.0); vertices.len()];

    for c in indices.chunks_exact(3) {
        let [a, b, d] = [c[0] as usize, c[1] as usize, c[2] as usize];
        if a >= vertices.len() || b >= vertices.len() || d >= vertices.len() {
            continue;
        }
        let pos0: cgmath::Vector3<f32> = vertices[a].position.into();
        let pos1: cgmath::Vector3<f32> = vertices[b].position.into();
        let pos2: cgmath::Vector3<f32> = vertices[d].position.into();

        // Counter-clockwise winding points the cross product outwards
        let face = (pos1 - pos0).cross(pos2 - pos0);
        sums[a] += face;
        sums[b] += face;
        sums[d] += face;
    }

    for (vertex, sum) in vertices.iter_mut().zip(sums) {
        vertex.normal = if sum.magnitude2() > f32::EPSILON {
            sum.normalize().into()
        } else {
            [0.0, 1.0, 0.0]
        };
    }
}
