//! Fixed meshes uploaded once at start-up.

use bevy_math::Vec3;

/// Matches the input layout `POSITION R32G32B32_FLOAT @0`,
/// `COLOR R8G8B8A8_UNORM @12`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: u32,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32, color: u32) -> Self {
        Self {
            position: [x, y, z],
            color,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Packs an opaque colour in `R8G8B8A8_UNORM` byte order.
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    u32::from_le_bytes([r, g, b, 0xFF])
}

pub const TRIANGLE_VERTICES: [Vertex; 3] = [
    Vertex::new(-0.5, -0.5, 0.0, rgb(255, 0, 0)),
    Vertex::new(0.5, -0.5, 0.0, rgb(0, 255, 0)),
    Vertex::new(0.0, 0.5, 0.0, rgb(0, 0, 255)),
];

pub const TRIANGLE_INDICES: [u16; 3] = [0, 2, 1];

pub const CUBE_VERTICES: [Vertex; 8] = [
    // z = -0.5
    Vertex::new(-0.5, -0.5, -0.5, rgb(255, 0, 0)),
    Vertex::new(0.5, -0.5, -0.5, rgb(0, 255, 0)),
    Vertex::new(0.5, 0.5, -0.5, rgb(0, 0, 255)),
    Vertex::new(-0.5, 0.5, -0.5, rgb(255, 255, 0)),
    // z = +0.5
    Vertex::new(-0.5, -0.5, 0.5, rgb(255, 0, 255)),
    Vertex::new(0.5, -0.5, 0.5, rgb(0, 255, 255)),
    Vertex::new(0.5, 0.5, 0.5, rgb(128, 128, 128)),
    Vertex::new(-0.5, 0.5, 0.5, rgb(255, 128, 0)),
];

/// Clockwise seen from outside, which D3D treats as front-facing.
pub const CUBE_INDICES: [u16; 36] = [
    0, 2, 1, 0, 3, 2, // z-
    4, 5, 6, 4, 6, 7, // z+
    0, 7, 3, 0, 4, 7, // x-
    1, 6, 5, 1, 2, 6, // x+
    3, 6, 2, 3, 7, 6, // y+
    0, 5, 4, 0, 1, 5, // y-
];

/// Unnormalized `(b - a) x (c - a)` of one indexed triangle.
pub fn face_normal(vertices: &[Vertex], triangle: [u16; 3]) -> Vec3 {
    let [a, b, c] = triangle.map(|i| vertices[i as usize].position());
    (b - a).cross(c - a)
}

pub fn triangles(indices: &[u16]) -> impl Iterator<Item = [u16; 3]> + '_ {
    indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<Vertex>(), 16);
        assert_eq!(std::mem::offset_of!(Vertex, color), 12);
    }

    #[test]
    fn rgb_puts_red_in_the_low_byte() {
        assert_eq!(rgb(255, 0, 0), 0xFF0000FF);
        assert_eq!(rgb(0, 0, 255).to_le_bytes(), [0, 0, 255, 255]);
    }

    #[test]
    fn cube_has_eight_vertices_and_twelve_triangles() {
        assert_eq!(CUBE_VERTICES.len(), 8);
        assert_eq!(CUBE_INDICES.len(), 36);
        assert_eq!(triangles(&CUBE_INDICES).count(), 12);
        assert!(CUBE_INDICES.iter().all(|&i| (i as usize) < CUBE_VERTICES.len()));
        for v in 0..CUBE_VERTICES.len() as u16 {
            assert!(CUBE_INDICES.contains(&v), "vertex {v} unused");
        }
    }

    #[test]
    fn every_cube_triangle_faces_outward() {
        for triangle in triangles(&CUBE_INDICES) {
            let normal = face_normal(&CUBE_VERTICES, triangle);
            let centroid = triangle
                .map(|i| CUBE_VERTICES[i as usize].position())
                .into_iter()
                .sum::<Vec3>()
                / 3.0;
            assert!(normal.dot(centroid) > 0.0, "{triangle:?} faces inward");
        }
    }

    #[test]
    fn each_cube_face_is_two_coplanar_triangles() {
        let mut normals: Vec<Vec3> = triangles(&CUBE_INDICES)
            .map(|t| face_normal(&CUBE_VERTICES, t).normalize())
            .collect();
        for pair in normals.chunks_exact(2) {
            assert!(pair[0].abs_diff_eq(pair[1], 1e-6));
        }
        normals.dedup_by(|a, b| a.abs_diff_eq(*b, 1e-6));
        assert_eq!(normals.len(), 6);
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            assert!(normals.iter().any(|n| n.abs_diff_eq(axis, 1e-6)));
            assert!(normals.iter().any(|n| n.abs_diff_eq(-axis, 1e-6)));
        }
    }

    #[test]
    fn triangle_faces_the_viewer() {
        let normal = face_normal(&TRIANGLE_VERTICES, TRIANGLE_INDICES);
        // The D3D viewer looks down +z, so a visible face points at -z.
        assert!(normal.z < 0.0);
    }
}
