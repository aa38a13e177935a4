//! Unit-cube mesh shared by the scene pass and the pick pass.
//!
//! Four vertices and six indices per face, faces in canonical [`Face`] order.
//! Drawing face `f` means drawing `CUBE_INDICES[f.index_range()]`.

use crate::face::Face;

/// Position and normal of one cube corner.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

const fn v(position: [f32; 3], normal: [f32; 3]) -> Vertex {
    Vertex { position, normal }
}

#[rustfmt::skip]
pub static CUBE_VERTICES: [Vertex; 24] = [
    // Front (+z)
    v([ 0.5,  0.5,  0.5], [0.0, 0.0, 1.0]),
    v([-0.5,  0.5,  0.5], [0.0, 0.0, 1.0]),
    v([-0.5, -0.5,  0.5], [0.0, 0.0, 1.0]),
    v([ 0.5, -0.5,  0.5], [0.0, 0.0, 1.0]),
    // Back (-z)
    v([-0.5,  0.5, -0.5], [0.0, 0.0, -1.0]),
    v([ 0.5,  0.5, -0.5], [0.0, 0.0, -1.0]),
    v([ 0.5, -0.5, -0.5], [0.0, 0.0, -1.0]),
    v([-0.5, -0.5, -0.5], [0.0, 0.0, -1.0]),
    // Top (+y)
    v([-0.5,  0.5, -0.5], [0.0, 1.0, 0.0]),
    v([-0.5,  0.5,  0.5], [0.0, 1.0, 0.0]),
    v([ 0.5,  0.5,  0.5], [0.0, 1.0, 0.0]),
    v([ 0.5,  0.5, -0.5], [0.0, 1.0, 0.0]),
    // Bottom (-y)
    v([-0.5, -0.5, -0.5], [0.0, -1.0, 0.0]),
    v([ 0.5, -0.5, -0.5], [0.0, -1.0, 0.0]),
    v([ 0.5, -0.5,  0.5], [0.0, -1.0, 0.0]),
    v([-0.5, -0.5,  0.5], [0.0, -1.0, 0.0]),
    // Right (+x)
    v([ 0.5,  0.5, -0.5], [1.0, 0.0, 0.0]),
    v([ 0.5,  0.5,  0.5], [1.0, 0.0, 0.0]),
    v([ 0.5, -0.5,  0.5], [1.0, 0.0, 0.0]),
    v([ 0.5, -0.5, -0.5], [1.0, 0.0, 0.0]),
    // Left (-x)
    v([-0.5,  0.5,  0.5], [-1.0, 0.0, 0.0]),
    v([-0.5,  0.5, -0.5], [-1.0, 0.0, 0.0]),
    v([-0.5, -0.5, -0.5], [-1.0, 0.0, 0.0]),
    v([-0.5, -0.5,  0.5], [-1.0, 0.0, 0.0]),
];

#[rustfmt::skip]
pub static CUBE_INDICES: [u32; 36] = [
    0, 1, 2, 0, 2, 3,
    4, 5, 6, 4, 6, 7,
    8, 9, 10, 8, 10, 11,
    12, 13, 14, 12, 14, 15,
    16, 17, 18, 16, 18, 19,
    20, 21, 22, 20, 22, 23,
];

/// Indices that draw a single face.
pub fn face_indices(face: Face) -> &'static [u32] {
    &CUBE_INDICES[face.index_range()]
}

/// The four vertices of a face.
pub fn face_vertices(face: Face) -> &'static [Vertex] {
    let start = face.index() * 4;
    &CUBE_VERTICES[start..start + 4]
}

/// Raw bytes of the vertex buffer, ready for upload.
pub fn vertex_bytes() -> &'static [u8] {
    bytemuck::cast_slice(&CUBE_VERTICES)
}
