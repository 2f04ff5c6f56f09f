// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Subdivided unit plane shared by every slot.

use alloc::vec::Vec;

use bytemuck::{Pod, Zeroable};

/// Horizontal subdivisions of the gallery plane.
pub const PLANE_WIDTH_SEGMENTS: u16 = 48;

/// Vertical subdivisions of the gallery plane.
pub const PLANE_HEIGHT_SEGMENTS: u16 = 24;

/// One vertex: position on the unit plane and its texture coordinate.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PlaneVertex {
    /// Position in `[-0.5, 0.5]²`, `z = 0`.
    pub position: [f32; 3],
    /// Texture coordinate, `v = 1` at the top edge.
    pub uv: [f32; 2],
}

/// An indexed triangle mesh of a unit plane centered on the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneMesh {
    /// Vertices in row-major order, top row first.
    pub vertices: Vec<PlaneVertex>,
    /// Triangle list indices into `vertices`.
    pub indices: Vec<u16>,
}

impl PlaneMesh {
    /// Builds a plane split into `width_segments × height_segments` quads.
    ///
    /// Zero segment counts are treated as one. The vertex count must fit a
    /// `u16` index, which holds for up to 255 segments per side.
    #[must_use]
    pub fn new(width_segments: u16, height_segments: u16) -> Self {
        let ws = width_segments.clamp(1, 255);
        let hs = height_segments.clamp(1, 255);
        let row = ws + 1;

        let mut vertices = Vec::with_capacity(usize::from(row) * usize::from(hs + 1));
        for iy in 0..=hs {
            let v = f32::from(iy) / f32::from(hs);
            for ix in 0..=ws {
                let u = f32::from(ix) / f32::from(ws);
                vertices.push(PlaneVertex {
                    position: [u - 0.5, 0.5 - v, 0.0],
                    uv: [u, 1.0 - v],
                });
            }
        }

        let mut indices = Vec::with_capacity(usize::from(ws) * usize::from(hs) * 6);
        for iy in 0..hs {
            for ix in 0..ws {
                let a = iy * row + ix;
                let b = a + row;
                let c = b + 1;
                let d = a + 1;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self { vertices, indices }
    }

    /// The gallery plane.
    #[must_use]
    pub fn gallery() -> Self {
        Self::new(PLANE_WIDTH_SEGMENTS, PLANE_HEIGHT_SEGMENTS)
    }

    /// A single quad, used for captions.
    #[must_use]
    pub fn quad() -> Self {
        Self::new(1, 1)
    }

    /// Vertex data as bytes for a buffer upload.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as bytes for a buffer upload.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gallery_plane_counts() {
        let mesh = PlaneMesh::gallery();
        assert_eq!(mesh.vertices.len(), 49 * 25);
        assert_eq!(mesh.indices.len(), 48 * 24 * 6);
        let max = mesh.indices.iter().copied().max().unwrap_or(0);
        assert_eq!(usize::from(max), mesh.vertices.len() - 1);
    }

    #[test]
    fn quad_corners() {
        let mesh = PlaneMesh::quad();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.vertices[0].position, [-0.5, 0.5, 0.0]);
        assert_eq!(mesh.vertices[0].uv, [0.0, 1.0]);
        assert_eq!(mesh.vertices[3].position, [0.5, -0.5, 0.0]);
        assert_eq!(mesh.vertices[3].uv, [1.0, 0.0]);
        assert_eq!(mesh.indices, [0, 2, 1, 2, 3, 1]);
    }

    #[test]
    fn byte_views_match_layout() {
        let mesh = PlaneMesh::quad();
        assert_eq!(mesh.vertex_bytes().len(), 4 * 5 * 4);
        assert_eq!(mesh.index_bytes().len(), 6 * 2);
    }

    #[test]
    fn zero_segments_build_one_quad() {
        assert_eq!(PlaneMesh::new(0, 0), PlaneMesh::quad());
    }
}
