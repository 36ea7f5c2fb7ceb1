/// Plaza Core Library - transform stack and parametric mesh engine
///
/// This library provides the renderer-independent core of the plaza scene:
/// vector and matrix algebra, a save/restore transform stack, a triangle
/// strip tessellator for parametric surfaces, and the shared 8-float vertex
/// layout every mesh is built in.

pub mod algebra;
pub mod error;
pub mod geometry;
pub mod library;
pub mod projection;
pub mod surface;
pub mod tessellate;
pub mod transform;

// Re-export commonly used types
pub use error::{GeometryError, TransformError};
pub use geometry::{MeshBuffer, Topology, Vertex, VERTEX_SIZE};
pub use library::{Shape, ShapeLibrary, TessellationConfig};
pub use projection::{Camera, ProjectionMode};
pub use tessellate::create_mesh;
pub use transform::{SavedTransform, TransformStack, TurnState};
