//! Mesh generation module
//!
//! Procedural generators for the shapes in the desk scene: a truncated cone
//! (cup body, pen), a torus (cup handle) and a thin rectangular panel
//! (ground plane, paper sheets). Generators are pure and perform no
//! parameter validation; segment counts below 3 give degenerate geometry.

use glam::Vec3;
use std::f32::consts::TAU;

/// Vertex data structure for 3D rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x2,
    ];

    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Mesh data containing vertices and indices.
///
/// An empty index list means the vertices are an explicit triangle list and
/// are drawn non-indexed.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of triangles, whether indexed or not
    pub fn triangle_count(&self) -> usize {
        if self.is_indexed() {
            self.indices.len() / 3
        } else {
            self.vertices.len() / 3
        }
    }

    /// Append an unindexed quad as two triangles, corners in counter-clockwise order
    fn push_quad(&mut self, v0: Vertex, v1: Vertex, v2: Vertex, v3: Vertex) {
        // Two triangles: 0-1-2 and 2-3-0
        self.vertices.extend_from_slice(&[v0, v1, v2, v2, v3, v0]);
    }
}

/// Create a closed truncated cone centered on the origin, axis along Y.
///
/// Layout: bottom ring `0..=segments`, top ring `segments+1..=2*segments+1`
/// (angle 0 duplicated at 2π to close the UV seam), then the bottom center
/// and the top center. Side normals are the cylindrical `(cos, 0, sin)` on
/// both rings regardless of the radii.
pub fn create_truncated_cone(
    base_radius: f32,
    top_radius: f32,
    height: f32,
    segments: u32,
) -> MeshData {
    let ring = segments + 1;
    let num_vertices = ring as usize * 2 + 2;
    let num_indices = segments as usize * 6 + segments as usize * 3 * 2;
    let half = height / 2.0;

    let mut mesh = MeshData::with_capacity(num_vertices, num_indices);
    let mut top = Vec::with_capacity(ring as usize);

    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let (z, x) = (TAU * t).sin_cos();
        let normal = [x, 0.0, z];

        mesh.vertices.push(Vertex::new(
            [x * base_radius, -half, z * base_radius],
            normal,
            [t, 0.0],
        ));
        top.push(Vertex::new(
            [x * top_radius, half, z * top_radius],
            normal,
            [t, 1.0],
        ));
    }
    mesh.vertices.extend(top);

    let center_bottom = mesh.vertices.len() as u32;
    mesh.vertices
        .push(Vertex::new([0.0, -half, 0.0], [0.0, -1.0, 0.0], [0.5, 0.0]));
    let center_top = center_bottom + 1;
    mesh.vertices
        .push(Vertex::new([0.0, half, 0.0], [0.0, 1.0, 0.0], [0.5, 1.0]));

    for i in 0..segments {
        let b0 = i;
        let b1 = i + 1;
        let t0 = i + ring;
        let t1 = i + ring + 1;

        // Side wall
        mesh.indices.extend_from_slice(&[b0, t0, t1, b0, t1, b1]);
        // Bottom cap
        mesh.indices.extend_from_slice(&[center_bottom, b0, b1]);
        // Top cap
        mesh.indices.extend_from_slice(&[center_top, t1, t0]);
    }

    mesh
}

/// Create a torus lying in the XZ plane around the origin.
///
/// No seam vertices are duplicated; the last ring and the last tube column
/// wrap back to the first through modular indexing.
pub fn create_torus(
    torus_radius: f32,
    tube_radius: f32,
    torus_segments: u32,
    tube_segments: u32,
) -> MeshData {
    let num_vertices = (torus_segments * tube_segments) as usize;
    let mut mesh = MeshData::with_capacity(num_vertices, num_vertices * 6);

    let torus_step = TAU / torus_segments as f32;
    let tube_step = TAU / tube_segments as f32;

    for i in 0..torus_segments {
        let (sin_torus, cos_torus) = (i as f32 * torus_step).sin_cos();

        for j in 0..tube_segments {
            let (sin_tube, cos_tube) = (j as f32 * tube_step).sin_cos();

            let ring = torus_radius + tube_radius * cos_tube;
            let position = Vec3::new(ring * cos_torus, tube_radius * sin_tube, ring * sin_torus);
            // Radial direction from the origin, not the true tube normal
            let normal = position.normalize_or_zero();

            mesh.vertices.push(Vertex::new(
                position.to_array(),
                normal.to_array(),
                [
                    i as f32 / torus_segments as f32,
                    j as f32 / tube_segments as f32,
                ],
            ));

            let next_tube = (j + 1) % tube_segments;
            let next_torus = (i + 1) % torus_segments;

            let top_left = i * tube_segments + j;
            let top_right = i * tube_segments + next_tube;
            let bottom_left = next_torus * tube_segments + j;
            let bottom_right = next_torus * tube_segments + next_tube;

            mesh.indices.extend_from_slice(&[
                top_left,
                top_right,
                bottom_left,
                bottom_left,
                top_right,
                bottom_right,
            ]);
        }
    }

    mesh
}

/// Create a thin box used as a flat panel: 6 faces, 36 unindexed vertices.
///
/// Every face carries its own axis-aligned normal and a full 0..1 UV tile.
/// `half_thickness` must stay small next to the extents or stacked panels
/// will z-fight.
pub fn create_panel(half_width: f32, half_depth: f32, half_thickness: f32) -> MeshData {
    let (hx, hy, hz) = (half_width, half_thickness, half_depth);
    let mut mesh = MeshData::with_capacity(36, 0);

    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        // Front (+Z)
        (
            [0.0, 0.0, 1.0],
            [[-hx, -hy, hz], [hx, -hy, hz], [hx, hy, hz], [-hx, hy, hz]],
        ),
        // Back (-Z)
        (
            [0.0, 0.0, -1.0],
            [[hx, -hy, -hz], [-hx, -hy, -hz], [-hx, hy, -hz], [hx, hy, -hz]],
        ),
        // Left (-X)
        (
            [-1.0, 0.0, 0.0],
            [[-hx, -hy, -hz], [-hx, -hy, hz], [-hx, hy, hz], [-hx, hy, -hz]],
        ),
        // Right (+X)
        (
            [1.0, 0.0, 0.0],
            [[hx, -hy, hz], [hx, -hy, -hz], [hx, hy, -hz], [hx, hy, hz]],
        ),
        // Top (+Y)
        (
            [0.0, 1.0, 0.0],
            [[-hx, hy, hz], [hx, hy, hz], [hx, hy, -hz], [-hx, hy, -hz]],
        ),
        // Bottom (-Y)
        (
            [0.0, -1.0, 0.0],
            [[-hx, -hy, -hz], [hx, -hy, -hz], [hx, -hy, hz], [-hx, -hy, hz]],
        ),
    ];

    const TILE: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    for (normal, corners) in faces {
        mesh.push_quad(
            Vertex::new(corners[0], normal, TILE[0]),
            Vertex::new(corners[1], normal, TILE[1]),
            Vertex::new(corners[2], normal, TILE[2]),
            Vertex::new(corners[3], normal, TILE[3]),
        );
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    /// Triangles as vertex triples, whether indexed or not
    fn triangles(mesh: &MeshData) -> Vec<[&Vertex; 3]> {
        (0..mesh.triangle_count())
            .map(|t| {
                if mesh.is_indexed() {
                    let i = &mesh.indices[t * 3..t * 3 + 3];
                    [
                        &mesh.vertices[i[0] as usize],
                        &mesh.vertices[i[1] as usize],
                        &mesh.vertices[i[2] as usize],
                    ]
                } else {
                    [
                        &mesh.vertices[t * 3],
                        &mesh.vertices[t * 3 + 1],
                        &mesh.vertices[t * 3 + 2],
                    ]
                }
            })
            .collect()
    }

    fn face_normal(tri: [&Vertex; 3]) -> Vec3 {
        let a = Vec3::from(tri[0].position);
        let b = Vec3::from(tri[1].position);
        let c = Vec3::from(tri[2].position);
        (b - a).cross(c - a)
    }

    fn centroid(tri: [&Vertex; 3]) -> Vec3 {
        tri.iter()
            .map(|v| Vec3::from(v.position))
            .fold(Vec3::ZERO, |acc, p| acc + p)
            / 3.0
    }

    #[test]
    fn test_cone_counts() {
        for n in [3u32, 8, 50] {
            let mesh = create_truncated_cone(0.4, 0.5, 1.0, n);
            assert_eq!(mesh.vertex_count(), 2 * (n as usize + 1) + 2);
            assert_eq!(mesh.index_count(), 6 * n as usize + 6 * n as usize);
        }
    }

    #[test]
    fn test_cup_cone_scenario() {
        let mesh = create_truncated_cone(0.4, 0.5, 1.0, 50);
        assert_eq!(mesh.vertex_count(), 104);
        assert_eq!(mesh.index_count(), 50 * 6 + 50 * 3 * 2);
    }

    #[test]
    fn test_cone_indices_in_range() {
        let mesh = create_truncated_cone(0.4, 0.5, 1.0, 17);
        let count = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn test_cylinder_ring_radius() {
        let n = 32;
        let mesh = create_truncated_cone(0.05, 0.05, 1.0, n);
        let ring_vertices = 2 * (n as usize + 1);
        for v in &mesh.vertices[..ring_vertices] {
            let radial = (v.position[0] * v.position[0] + v.position[2] * v.position[2]).sqrt();
            assert!((radial - 0.05).abs() < EPS, "radial distance {radial}");
        }
    }

    #[test]
    fn test_cone_seam_and_centers() {
        let n = 12;
        let mesh = create_truncated_cone(0.4, 0.5, 1.0, n);
        let first = mesh.vertices[0];
        let last = mesh.vertices[n as usize];
        assert!((Vec3::from(first.position) - Vec3::from(last.position)).length() < EPS);
        assert_eq!(first.uv, [0.0, 0.0]);
        assert_eq!(last.uv, [1.0, 0.0]);

        let bottom = mesh.vertices[mesh.vertex_count() - 2];
        let top = mesh.vertices[mesh.vertex_count() - 1];
        assert_eq!(bottom.position, [0.0, -0.5, 0.0]);
        assert_eq!(bottom.normal, [0.0, -1.0, 0.0]);
        assert_eq!(bottom.uv, [0.5, 0.0]);
        assert_eq!(top.position, [0.0, 0.5, 0.0]);
        assert_eq!(top.normal, [0.0, 1.0, 0.0]);
        assert_eq!(top.uv, [0.5, 1.0]);
    }

    #[test]
    fn test_cone_side_normals_are_cylindrical() {
        let mesh = create_truncated_cone(0.2, 0.6, 1.0, 10);
        let n = 10usize;
        for i in 0..=n {
            let bottom = mesh.vertices[i];
            let top = mesh.vertices[i + n + 1];
            assert_eq!(bottom.normal, top.normal);
            assert_eq!(bottom.normal[1], 0.0);
        }
    }

    #[test]
    fn test_cone_winding_faces_outward() {
        let mesh = create_truncated_cone(0.4, 0.5, 1.0, 24);
        for tri in triangles(&mesh) {
            let n = face_normal(tri);
            assert!(n.dot(centroid(tri)) > 0.0);
        }
    }

    #[test]
    fn test_torus_counts() {
        let mesh = create_torus(0.4, 0.05, 50, 20);
        assert_eq!(mesh.vertex_count(), 1000);
        assert_eq!(mesh.index_count(), 6000);

        let mesh = create_torus(1.0, 0.25, 7, 5);
        assert_eq!(mesh.vertex_count(), 35);
        assert_eq!(mesh.index_count(), 6 * 35);
    }

    #[test]
    fn test_torus_indices_wrap_in_range() {
        let mesh = create_torus(0.4, 0.05, 9, 4);
        let count = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
        assert!(mesh.indices.contains(&0));
        assert!(mesh.indices.contains(&(count - 1)));
    }

    #[test]
    fn test_torus_normals_unit_length() {
        let mesh = create_torus(0.4, 0.05, 50, 20);
        for v in &mesh.vertices {
            let len = Vec3::from(v.normal).length();
            assert!((len - 1.0).abs() < EPS, "normal length {len}");
        }
    }

    #[test]
    fn test_torus_vertex_on_tube_surface() {
        let (big, small) = (0.4, 0.05);
        let mesh = create_torus(big, small, 16, 8);
        for v in &mesh.vertices {
            let p = Vec3::from(v.position);
            let ring_dist = (p.x * p.x + p.z * p.z).sqrt() - big;
            let tube_dist = (ring_dist * ring_dist + p.y * p.y).sqrt();
            assert!((tube_dist - small).abs() < EPS);
        }
    }

    #[test]
    fn test_torus_winding_faces_out_of_tube() {
        let big = 0.4;
        let mesh = create_torus(big, 0.05, 24, 12);
        for tri in triangles(&mesh) {
            let c = centroid(tri);
            let ring_center = Vec3::new(c.x, 0.0, c.z).normalize() * big;
            assert!(face_normal(tri).dot(c - ring_center) > 0.0);
        }
    }

    #[test]
    fn test_panel_layout() {
        let mesh = create_panel(1.0, 1.5, 0.01);
        assert_eq!(mesh.vertex_count(), 36);
        assert!(!mesh.is_indexed());
        assert_eq!(mesh.triangle_count(), 12);

        let axes = [
            Vec3::X,
            Vec3::NEG_X,
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::Z,
            Vec3::NEG_Z,
        ];
        let mut seen = Vec::new();
        for face in mesh.vertices.chunks(6) {
            let n = Vec3::from(face[0].normal);
            assert!(face.iter().all(|v| Vec3::from(v.normal) == n));
            assert!(axes.contains(&n));
            assert!(!seen.contains(&n));
            seen.push(n);
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_panel_extents_and_uvs() {
        let mesh = create_panel(0.333, 0.5, 0.01);
        for v in &mesh.vertices {
            assert!((v.position[0].abs() - 0.333).abs() < EPS);
            assert!((v.position[1].abs() - 0.01).abs() < EPS);
            assert!((v.position[2].abs() - 0.5).abs() < EPS);
            assert!(v.uv.iter().all(|&c| c == 0.0 || c == 1.0));
        }
    }

    #[test]
    fn test_panel_winding_matches_face_normal() {
        let mesh = create_panel(3.0, 3.0, 0.01);
        for tri in triangles(&mesh) {
            let n = face_normal(tri).normalize();
            assert!(n.dot(Vec3::from(tri[0].normal)) > 0.99);
        }
    }
}
