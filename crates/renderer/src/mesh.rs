//! Mesh data structures and primitive generation.

use crate::vertex::Vertex;
use glam::Vec3;
use wgpu::util::DeviceExt;

/// A GPU mesh with vertex and index buffers.
pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
}

impl Mesh {
    /// Create a mesh from vertex and index data.
    pub fn new(device: &wgpu::Device, vertices: &[Vertex], indices: &[u32]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            num_indices: indices.len() as u32,
        }
    }

    /// Create a unit cube centered at origin.
    pub fn cube(device: &wgpu::Device) -> Self {
        let mut data = MeshData::new();
        data.push_cuboid(Vec3::ZERO, Vec3::splat(0.5), [1.0, 1.0, 1.0, 1.0]);
        data.upload(device)
    }

    /// Create a ground plane.
    pub fn plane(device: &wgpu::Device, size: f32) -> Self {
        let half = size / 2.0;
        let vertices = [
            Vertex::new([-half, 0.0, half], [0.0, 1.0, 0.0], [0.0, 0.0]),
            Vertex::new([half, 0.0, half], [0.0, 1.0, 0.0], [1.0, 0.0]),
            Vertex::new([half, 0.0, -half], [0.0, 1.0, 0.0], [1.0, 1.0]),
            Vertex::new([-half, 0.0, -half], [0.0, 1.0, 0.0], [0.0, 1.0]),
        ];
        let indices: [u32; 6] = [0, 1, 2, 2, 3, 0];
        Self::new(device, &vertices, &indices)
    }

    /// Unit quad in the XY plane facing +Z, UVs covering the full texture
    /// with v = 0 at the top. Scaled per instance to panel dimensions.
    pub fn panel_quad(device: &wgpu::Device) -> Self {
        let vertices = [
            Vertex::new([-0.5, -0.5, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
            Vertex::new([0.5, -0.5, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0]),
            Vertex::new([0.5, 0.5, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
            Vertex::new([-0.5, 0.5, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
        ];
        let indices: [u32; 6] = [0, 1, 2, 2, 3, 0];
        Self::new(device, &vertices, &indices)
    }
}

/// Mesh data before GPU upload (for procedural construction).
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload(&self, device: &wgpu::Device) -> Mesh {
        Mesh::new(device, &self.vertices, &self.indices)
    }

    /// Append another mesh, reindexing it.
    pub fn extend(&mut self, other: &MeshData) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Translate every vertex.
    pub fn translate(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            v.position[0] += offset.x;
            v.position[1] += offset.y;
            v.position[2] += offset.z;
        }
    }

    fn quad(&mut self, corners: [Vec3; 4], normal: Vec3, color: [f32; 4]) {
        let base = self.vertices.len() as u32;
        let uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
        for (corner, uv) in corners.iter().zip(uvs) {
            self.vertices.push(Vertex::with_color(
                corner.to_array(),
                normal.to_array(),
                uv,
                color,
            ));
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    /// Append an axis-aligned box.
    pub fn push_cuboid(&mut self, center: Vec3, half: Vec3, color: [f32; 4]) {
        let (cx, cy, cz) = (center.x, center.y, center.z);
        let (hx, hy, hz) = (half.x, half.y, half.z);
        // Front (+Z)
        self.quad(
            [
                Vec3::new(cx - hx, cy - hy, cz + hz),
                Vec3::new(cx + hx, cy - hy, cz + hz),
                Vec3::new(cx + hx, cy + hy, cz + hz),
                Vec3::new(cx - hx, cy + hy, cz + hz),
            ],
            Vec3::Z,
            color,
        );
        // Back (-Z)
        self.quad(
            [
                Vec3::new(cx + hx, cy - hy, cz - hz),
                Vec3::new(cx - hx, cy - hy, cz - hz),
                Vec3::new(cx - hx, cy + hy, cz - hz),
                Vec3::new(cx + hx, cy + hy, cz - hz),
            ],
            -Vec3::Z,
            color,
        );
        // Top (+Y)
        self.quad(
            [
                Vec3::new(cx - hx, cy + hy, cz + hz),
                Vec3::new(cx + hx, cy + hy, cz + hz),
                Vec3::new(cx + hx, cy + hy, cz - hz),
                Vec3::new(cx - hx, cy + hy, cz - hz),
            ],
            Vec3::Y,
            color,
        );
        // Bottom (-Y)
        self.quad(
            [
                Vec3::new(cx - hx, cy - hy, cz - hz),
                Vec3::new(cx + hx, cy - hy, cz - hz),
                Vec3::new(cx + hx, cy - hy, cz + hz),
                Vec3::new(cx - hx, cy - hy, cz + hz),
            ],
            -Vec3::Y,
            color,
        );
        // Right (+X)
        self.quad(
            [
                Vec3::new(cx + hx, cy - hy, cz + hz),
                Vec3::new(cx + hx, cy - hy, cz - hz),
                Vec3::new(cx + hx, cy + hy, cz - hz),
                Vec3::new(cx + hx, cy + hy, cz + hz),
            ],
            Vec3::X,
            color,
        );
        // Left (-X)
        self.quad(
            [
                Vec3::new(cx - hx, cy - hy, cz - hz),
                Vec3::new(cx - hx, cy - hy, cz + hz),
                Vec3::new(cx - hx, cy + hy, cz + hz),
                Vec3::new(cx - hx, cy + hy, cz - hz),
            ],
            -Vec3::X,
            color,
        );
    }

    /// Append a vertical cylinder (capped).
    pub fn push_cylinder(
        &mut self,
        center: Vec3,
        radius: f32,
        height: f32,
        segments: u32,
        color: [f32; 4],
    ) {
        let half_h = height / 2.0;
        let base = self.vertices.len() as u32;

        // Side rings
        for i in 0..=segments {
            let theta = 2.0 * std::f32::consts::PI * i as f32 / segments as f32;
            let (sin, cos) = theta.sin_cos();
            let normal = Vec3::new(cos, 0.0, sin);
            let u = i as f32 / segments as f32;
            for (y, v) in [(-half_h, 1.0), (half_h, 0.0)] {
                self.vertices.push(Vertex::with_color(
                    [
                        center.x + radius * cos,
                        center.y + y,
                        center.z + radius * sin,
                    ],
                    normal.to_array(),
                    [u, v],
                    color,
                ));
            }
        }
        for i in 0..segments {
            let a = base + i * 2;
            self.indices
                .extend_from_slice(&[a, a + 2, a + 1, a + 1, a + 2, a + 3]);
        }

        // Caps
        for (y, normal) in [(-half_h, -Vec3::Y), (half_h, Vec3::Y)] {
            let center_idx = self.vertices.len() as u32;
            self.vertices.push(Vertex::with_color(
                [center.x, center.y + y, center.z],
                normal.to_array(),
                [0.5, 0.5],
                color,
            ));
            for i in 0..=segments {
                let theta = 2.0 * std::f32::consts::PI * i as f32 / segments as f32;
                let (sin, cos) = theta.sin_cos();
                self.vertices.push(Vertex::with_color(
                    [
                        center.x + radius * cos,
                        center.y + y,
                        center.z + radius * sin,
                    ],
                    normal.to_array(),
                    [0.5 + 0.5 * cos, 0.5 + 0.5 * sin],
                    color,
                ));
            }
            for i in 0..segments {
                let rim = center_idx + 1 + i;
                if normal.y > 0.0 {
                    self.indices.extend_from_slice(&[center_idx, rim, rim + 1]);
                } else {
                    self.indices.extend_from_slice(&[center_idx, rim + 1, rim]);
                }
            }
        }
    }

    /// Append a UV sphere.
    pub fn push_sphere(
        &mut self,
        center: Vec3,
        radius: f32,
        segments: u32,
        rings: u32,
        color: [f32; 4],
    ) {
        let base = self.vertices.len() as u32;
        for ring in 0..=rings {
            let phi = std::f32::consts::PI * ring as f32 / rings as f32;
            let y = radius * phi.cos();
            let ring_radius = radius * phi.sin();
            for segment in 0..=segments {
                let theta = 2.0 * std::f32::consts::PI * segment as f32 / segments as f32;
                let x = ring_radius * theta.cos();
                let z = ring_radius * theta.sin();
                let normal = Vec3::new(x, y, z).normalize_or_zero();
                self.vertices.push(Vertex::with_color(
                    [center.x + x, center.y + y, center.z + z],
                    normal.to_array(),
                    [
                        segment as f32 / segments as f32,
                        ring as f32 / rings as f32,
                    ],
                    color,
                ));
            }
        }
        for ring in 0..rings {
            for segment in 0..segments {
                let current = base + ring * (segments + 1) + segment;
                let next = current + segments + 1;
                self.indices
                    .extend_from_slice(&[current, next, current + 1, current + 1, next, next + 1]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_has_24_vertices_36_indices() {
        let mut data = MeshData::new();
        data.push_cuboid(Vec3::ZERO, Vec3::splat(0.5), [1.0; 4]);
        assert_eq!(data.vertices.len(), 24);
        assert_eq!(data.indices.len(), 36);
        // All corners within the half extents.
        for v in &data.vertices {
            assert!(v.position.iter().all(|c| c.abs() <= 0.5 + 1e-6));
        }
    }

    #[test]
    fn extend_reindexes() {
        let mut a = MeshData::new();
        a.push_cuboid(Vec3::ZERO, Vec3::ONE, [1.0; 4]);
        let mut b = MeshData::new();
        b.push_cuboid(Vec3::ONE, Vec3::ONE, [1.0; 4]);
        a.extend(&b);
        assert_eq!(a.vertices.len(), 48);
        assert_eq!(a.indices.len(), 72);
        assert!(a.indices.iter().all(|&i| (i as usize) < a.vertices.len()));
        assert!(a.indices[36..].iter().all(|&i| i >= 24));
    }

    #[test]
    fn cylinder_indices_stay_in_range() {
        let mut data = MeshData::new();
        data.push_cylinder(Vec3::new(1.0, 0.5, -2.0), 0.3, 1.8, 12, [1.0; 4]);
        assert!(!data.indices.is_empty());
        assert!(data.indices.iter().all(|&i| (i as usize) < data.vertices.len()));
    }

    #[test]
    fn sphere_indices_stay_in_range() {
        let mut data = MeshData::new();
        data.push_sphere(Vec3::ZERO, 0.2, 8, 6, [1.0; 4]);
        assert!(data.indices.iter().all(|&i| (i as usize) < data.vertices.len()));
    }
}
