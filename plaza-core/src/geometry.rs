/// Vertex layout and mesh buffers shared by the tessellator and renderers
use nalgebra::{Point3, Vector2, Vector3};

use crate::error::GeometryError;

/// Floats per vertex: position (3), normal (3), texture coordinate (2).
pub const VERTEX_SIZE: usize = 8;

/// Bytes between consecutive vertices in an uploaded buffer.
pub const VERTEX_STRIDE: usize = VERTEX_SIZE * std::mem::size_of::<f32>();

/// One attribute of the interleaved vertex layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub name: &'static str,
    pub components: usize,
    pub offset: usize,
}

/// Attribute table a host binds the vertex buffer with, in byte offsets.
pub const VERTEX_ATTRIBUTES: [VertexAttribute; 3] = [
    VertexAttribute { name: "aPos", components: 3, offset: 0 },
    VertexAttribute { name: "aNor", components: 3, offset: 12 },
    VertexAttribute { name: "aUV", components: 2, offset: 24 },
];

/// A vertex with position, normal and texture coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub uv: Vector2<f32>,
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position: Point3::from(position),
            normal: Vector3::from(normal),
            uv: Vector2::from(uv),
        }
    }

    /// Read a vertex from the first 8 floats of `data`.
    ///
    /// Panics if `data` is shorter than [`VERTEX_SIZE`].
    pub fn from_slice(data: &[f32]) -> Self {
        Self::new(
            [data[0], data[1], data[2]],
            [data[3], data[4], data[5]],
            [data[6], data[7]],
        )
    }

    pub fn to_array(&self) -> [f32; VERTEX_SIZE] {
        let p = &self.position;
        let n = &self.normal;
        [p.x, p.y, p.z, n.x, n.y, n.z, self.uv.x, self.uv.y]
    }
}

/// How consecutive vertices of a buffer group into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Every three vertices form an independent triangle.
    Triangles,
    /// Each vertex after the first two closes a triangle with the previous two.
    TriangleStrip,
}

/// Flat interleaved vertex data, built once and read thereafter
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffer {
    topology: Topology,
    data: Vec<f32>,
}

impl MeshBuffer {
    /// Wrap raw interleaved floats; the length must be a whole number of vertices.
    pub fn from_raw(topology: Topology, data: Vec<f32>) -> Result<Self, GeometryError> {
        if data.len() % VERTEX_SIZE != 0 {
            return Err(GeometryError::InvalidBuffer { len: data.len() });
        }
        Ok(Self { topology, data })
    }

    pub fn from_vertices(topology: Topology, vertices: &[Vertex]) -> Self {
        let mut data = Vec::with_capacity(vertices.len() * VERTEX_SIZE);
        for vertex in vertices {
            data.extend_from_slice(&vertex.to_array());
        }
        Self { topology, data }
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn vertex_count(&self) -> usize {
        self.data.len() / VERTEX_SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// The float data reinterpreted as bytes, for vertex buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.data.chunks_exact(VERTEX_SIZE).map(Vertex::from_slice)
    }

    /// The vertex at `index`.
    ///
    /// Panics if `index` is not below [`MeshBuffer::vertex_count`].
    pub fn vertex(&self, index: usize) -> Vertex {
        Vertex::from_slice(&self.data[index * VERTEX_SIZE..])
    }

    /// Triangles as a renderer would assemble them from this buffer.
    ///
    /// Strip triangles alternate winding; odd ones are swapped back so every
    /// triangle keeps the orientation of the first. Degenerate triangles at
    /// strip seams are yielded as-is.
    pub fn triangles(&self) -> impl Iterator<Item = [Vertex; 3]> + '_ {
        let count = self.vertex_count();
        let (step, total) = match self.topology {
            Topology::Triangles => (3, count / 3),
            Topology::TriangleStrip => (1, count.saturating_sub(2)),
        };
        let strip = self.topology == Topology::TriangleStrip;
        (0..total).map(move |i| {
            let base = i * step;
            let (a, b, c) = (self.vertex(base), self.vertex(base + 1), self.vertex(base + 2));
            if strip && i % 2 == 1 {
                [b, a, c]
            } else {
                [a, b, c]
            }
        })
    }
}

/// Two faces of the cube (+Z and -Z), two triangles each.
#[rustfmt::skip]
const CUBE_TEMPLATE: [f32; 12 * VERTEX_SIZE] = [
    -1.0, -1.0,  1.0,  0.0, 0.0,  1.0,  0.0, 0.0,
     1.0,  1.0,  1.0,  0.0, 0.0,  1.0,  1.0, 1.0,
    -1.0,  1.0,  1.0,  0.0, 0.0,  1.0,  0.0, 1.0,
     1.0,  1.0,  1.0,  0.0, 0.0,  1.0,  1.0, 1.0,
    -1.0, -1.0,  1.0,  0.0, 0.0,  1.0,  0.0, 0.0,
     1.0, -1.0,  1.0,  0.0, 0.0,  1.0,  1.0, 0.0,
     1.0,  1.0, -1.0,  0.0, 0.0, -1.0,  0.0, 0.0,
    -1.0, -1.0, -1.0,  0.0, 0.0, -1.0,  1.0, 1.0,
    -1.0,  1.0, -1.0,  0.0, 0.0, -1.0,  1.0, 0.0,
    -1.0, -1.0, -1.0,  0.0, 0.0, -1.0,  1.0, 1.0,
     1.0,  1.0, -1.0,  0.0, 0.0, -1.0,  0.0, 0.0,
     1.0, -1.0, -1.0,  0.0, 0.0, -1.0,  0.0, 1.0,
];

/// Build the 36-vertex cube spanning `[-1, 1]` on every axis.
///
/// The +Z/-Z template faces are emitted, then their positions and normals
/// are rotated x -> y -> z -> x twice more to produce the X and Y faces.
/// Texture coordinates are carried over unchanged.
pub fn cube() -> MeshBuffer {
    let mut template = CUBE_TEMPLATE;
    let mut data = Vec::with_capacity(3 * template.len());

    for _ in 0..3 {
        for vertex in template.chunks_exact_mut(VERTEX_SIZE) {
            data.extend_from_slice(vertex);
            let (p, n) = ([vertex[0], vertex[1], vertex[2]], [vertex[3], vertex[4], vertex[5]]);
            for j in 0..3 {
                vertex[j] = p[(j + 1) % 3];
                vertex[3 + j] = n[(j + 1) % 3];
            }
        }
    }

    MeshBuffer {
        topology: Topology::Triangles,
        data,
    }
}
