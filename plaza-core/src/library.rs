/// Meshes built once at setup and shared by every frame
use crate::error::GeometryError;
use crate::geometry::{self, MeshBuffer};
use crate::surface;
use crate::tessellate::create_mesh;

/// Grid resolution and shape parameters for the tessellated meshes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TessellationConfig {
    pub columns: usize,
    pub rows: usize,
    pub torus_radius: f32,
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self {
            columns: 30,
            rows: 30,
            torus_radius: surface::TORUS_MINOR_RADIUS,
        }
    }
}

/// The drawable primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Cube,
    Sphere,
    Torus,
    Cylinder,
    Tube,
}

impl Shape {
    pub const ALL: [Shape; 5] = [
        Shape::Cube,
        Shape::Sphere,
        Shape::Torus,
        Shape::Cylinder,
        Shape::Tube,
    ];
}

/// One immutable mesh per [`Shape`].
#[derive(Debug, Clone)]
pub struct ShapeLibrary {
    cube: MeshBuffer,
    sphere: MeshBuffer,
    torus: MeshBuffer,
    cylinder: MeshBuffer,
    tube: MeshBuffer,
}

impl ShapeLibrary {
    pub fn build(config: &TessellationConfig) -> Result<Self, GeometryError> {
        let (m, n) = (config.columns, config.rows);
        let r = config.torus_radius;

        let library = Self {
            cube: geometry::cube(),
            sphere: create_mesh(m, n, surface::sphere)?,
            torus: create_mesh(m, n, |u, v| surface::torus_with_radius(u, v, r))?,
            cylinder: create_mesh(m, n, surface::cylinder)?,
            tube: create_mesh(m, n, surface::open_tube)?,
        };

        let total: usize = Shape::ALL.iter().map(|&s| library.mesh(s).vertex_count()).sum();
        log::info!("Built shape library at {}x{}: {} vertices", m, n, total);
        Ok(library)
    }

    pub fn mesh(&self, shape: Shape) -> &MeshBuffer {
        match shape {
            Shape::Cube => &self.cube,
            Shape::Sphere => &self.sphere,
            Shape::Torus => &self.torus,
            Shape::Cylinder => &self.cylinder,
            Shape::Tube => &self.tube,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Topology;

    #[test]
    fn test_default_library() {
        let library = ShapeLibrary::build(&TessellationConfig::default()).unwrap();
        assert_eq!(library.mesh(Shape::Cube).vertex_count(), 36);
        assert_eq!(library.mesh(Shape::Cube).topology(), Topology::Triangles);
        for shape in [Shape::Sphere, Shape::Torus, Shape::Cylinder, Shape::Tube] {
            let mesh = library.mesh(shape);
            assert_eq!(mesh.vertex_count(), 4 * 29 * 29);
            assert_eq!(mesh.topology(), Topology::TriangleStrip);
        }
    }

    #[test]
    fn test_torus_radius_is_configurable() {
        let config = TessellationConfig {
            columns: 2,
            rows: 2,
            torus_radius: 0.5,
        };
        let library = ShapeLibrary::build(&config).unwrap();
        let first = library.mesh(Shape::Torus).vertex(0);
        assert!((first.position.x - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_resolution_fails_build() {
        let config = TessellationConfig {
            columns: 1,
            rows: 1,
            ..TessellationConfig::default()
        };
        assert!(ShapeLibrary::build(&config).is_err());
    }
}
