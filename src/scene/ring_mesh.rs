//! Flat ring (annulus) mesh generation
//!
//! The ring lies in the XY plane facing +Z. Vertices are laid out as
//! `radial_segments + 1` concentric circles of `angular_segments + 1` vertices
//! each (the seam vertex is duplicated so UVs do not wrap).

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use std::f32::consts::TAU;

/// Build a ring with standard planar UVs: `((x / outer + 1) / 2, (y / outer + 1) / 2)`.
pub fn ring_mesh(
    inner_radius: f32,
    outer_radius: f32,
    angular_segments: u32,
    radial_segments: u32,
) -> Mesh {
    let positions = ring_positions(inner_radius, outer_radius, angular_segments, radial_segments);
    let uvs = positions
        .iter()
        .map(|[x, y, _]| [(x / outer_radius + 1.0) / 2.0, (y / outer_radius + 1.0) / 2.0])
        .collect();
    assemble(positions, uvs, angular_segments, radial_segments)
}

/// Build a ring whose texture U coordinate runs from the inner edge (0) to the
/// outer edge (1), for radially banded ring textures.
pub fn planet_ring_mesh(
    inner_radius: f32,
    outer_radius: f32,
    angular_segments: u32,
    radial_segments: u32,
) -> Mesh {
    let positions = ring_positions(inner_radius, outer_radius, angular_segments, radial_segments);
    let uvs = radial_ring_uvs(&positions, inner_radius, outer_radius);
    assemble(positions, uvs, angular_segments, radial_segments)
}

/// Map each vertex to `(t, 1)` where `t` is its normalised radial distance
/// between `inner_radius` and `outer_radius`.
pub fn radial_ring_uvs(
    positions: &[[f32; 3]],
    inner_radius: f32,
    outer_radius: f32,
) -> Vec<[f32; 2]> {
    let span = outer_radius - inner_radius;
    positions
        .iter()
        .map(|&p| {
            let r = Vec3::from(p).length();
            [(r - inner_radius) / span, 1.0]
        })
        .collect()
}

fn ring_positions(
    inner_radius: f32,
    outer_radius: f32,
    angular_segments: u32,
    radial_segments: u32,
) -> Vec<[f32; 3]> {
    let angular_segments = angular_segments.max(3);
    let radial_segments = radial_segments.max(1);
    let radius_step = (outer_radius - inner_radius) / radial_segments as f32;

    let mut positions =
        Vec::with_capacity(((angular_segments + 1) * (radial_segments + 1)) as usize);
    for j in 0..=radial_segments {
        let radius = inner_radius + radius_step * j as f32;
        for i in 0..=angular_segments {
            let theta = TAU * i as f32 / angular_segments as f32;
            positions.push([radius * theta.cos(), radius * theta.sin(), 0.0]);
        }
    }
    positions
}

fn assemble(
    positions: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    angular_segments: u32,
    radial_segments: u32,
) -> Mesh {
    let angular_segments = angular_segments.max(3);
    let radial_segments = radial_segments.max(1);
    let row = angular_segments + 1;

    let mut indices = Vec::with_capacity((angular_segments * radial_segments * 6) as usize);
    for j in 0..radial_segments {
        for i in 0..angular_segments {
            let a = j * row + i;
            let b = a + row;
            let c = b + 1;
            let d = a + 1;
            // Counter-clockwise seen from +Z
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    let normals = vec![[0.0, 0.0, 1.0]; positions.len()];

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_indices(Indices::U32(indices));
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh
}
