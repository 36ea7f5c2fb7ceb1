/// Error types surfaced by the geometry and transform engines
use std::fmt;

/// Errors raised while building vertex data.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A 1 x 1 tessellation grid holds a single sample and cannot form a triangle.
    DegenerateResolution { columns: usize, rows: usize },
    /// Raw float data whose length is not a whole number of vertices.
    InvalidBuffer { len: usize },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::DegenerateResolution { columns, rows } => write!(
                f,
                "No triangles: a {}x{} tessellation grid is a single point",
                columns, rows
            ),
            GeometryError::InvalidBuffer { len } => write!(
                f,
                "Vertex data of length {} is not a multiple of {} floats",
                len,
                crate::geometry::VERTEX_SIZE
            ),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Misuse of the transform stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformError {
    /// `restore` was called with only the base matrix on the stack.
    StackUnderflow,
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::StackUnderflow => {
                write!(f, "restore called without a matching save")
            }
        }
    }
}

impl std::error::Error for TransformError {}
