use crate::prelude::*;
use bevy::prelude::*;
use bevy::render::{
    mesh::{Indices, PrimitiveTopology},
    render_asset::RenderAssetUsages,
};
use rayon::prelude::*;

// uv of each billboard corner, counter-clockwise when facing the camera
const QUAD_CORNERS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Expands every particle into a camera-facing quad. All four corners share
/// the particle position; the vertex shader offsets them by the uv.
pub fn point_cloud_mesh(set: ParticleSet) -> Mesh {
    let (positions, colors) = set.into_buffers();
    let n = positions.len();

    let mut quad_positions = vec![[0.0f32; 3]; n * 4];
    quad_positions
        .par_chunks_exact_mut(4)
        .zip(positions.par_iter())
        .for_each(|(quad, position)| quad.fill(*position));

    let mut quad_colors = vec![[0.0f32; 4]; n * 4];
    quad_colors
        .par_chunks_exact_mut(4)
        .zip(colors.par_iter())
        .for_each(|(quad, [r, g, b])| quad.fill([*r, *g, *b, 1.0]));

    let mut quad_uvs = vec![[0.0f32; 2]; n * 4];
    quad_uvs
        .par_chunks_exact_mut(4)
        .for_each(|quad| quad.copy_from_slice(&QUAD_CORNERS));

    let mut indices = vec![0u32; n * 6];
    indices
        .par_chunks_exact_mut(6)
        .enumerate()
        .for_each(|(i, quad)| {
            let base = (i * 4) as u32;
            for (slot, corner) in quad.iter_mut().zip(QUAD_INDICES) {
                *slot = base + corner;
            }
        });

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, quad_positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, quad_uvs)
    .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, quad_colors)
    .with_inserted_indices(Indices::U32(indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;

    fn sample_set() -> ParticleSet {
        let params = GalaxyParams {
            particle_count: 5,
            ..default()
        };
        spiral_galaxy::generate(&params).unwrap()
    }

    #[test]
    fn one_quad_per_particle() {
        let set = sample_set();
        let mesh = point_cloud_mesh(set.clone());

        assert_eq!(mesh.count_vertices(), 5 * 4);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(5 * 6));

        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("missing positions");
        };
        for (i, quad) in positions.chunks_exact(4).enumerate() {
            assert!(quad.iter().all(|p| *p == set.positions()[i]));
        }

        let Some(VertexAttributeValues::Float32x4(colors)) =
            mesh.attribute(Mesh::ATTRIBUTE_COLOR)
        else {
            panic!("missing colors");
        };
        let [r, g, b] = set.colors()[1];
        assert_eq!(colors[4..8], [[r, g, b, 1.0]; 4]);
    }

    #[test]
    fn quads_index_their_own_corners() {
        let mesh = point_cloud_mesh(sample_set());
        let Some(Indices::U32(indices)) = mesh.indices() else {
            panic!("expected u32 indices");
        };
        assert_eq!(indices[6..12], [4, 5, 6, 4, 6, 7]);
        assert!(indices.iter().all(|i| *i < 20));
    }
}
