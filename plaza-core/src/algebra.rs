/// Vector and matrix algebra over nalgebra types
///
/// Matrices are `Matrix4<f32>`, stored column-major: linear index `n`
/// addresses row `n & 3`, column `n >> 2`. All functions are pure and
/// never mutate their inputs.
use nalgebra::{Matrix4, SVector, Vector3};

/// Sum of pairwise products.
pub fn dot<const D: usize>(a: &SVector<f32, D>, b: &SVector<f32, D>) -> f32 {
    a.dot(b)
}

pub fn add<const D: usize>(a: &SVector<f32, D>, b: &SVector<f32, D>) -> SVector<f32, D> {
    a + b
}

pub fn subtract<const D: usize>(a: &SVector<f32, D>, b: &SVector<f32, D>) -> SVector<f32, D> {
    a - b
}

/// Multiply every component of `v` by the scalar `a`.
pub fn scale_vector<const D: usize>(a: f32, v: &SVector<f32, D>) -> SVector<f32, D> {
    v * a
}

/// Divide `v` by its Euclidean norm.
///
/// `v` must not be the zero vector: the result is then NaN in every
/// component. Use [`try_normalize`] when the input may be degenerate.
pub fn normalize<const D: usize>(v: &SVector<f32, D>) -> SVector<f32, D> {
    let s = dot(v, v).sqrt();
    v / s
}

/// Like [`normalize`], but `None` for vectors too short to normalize.
pub fn try_normalize<const D: usize>(v: &SVector<f32, D>) -> Option<SVector<f32, D>> {
    v.try_normalize(f32::EPSILON)
}

/// Right-handed cross product.
pub fn cross(a: &Vector3<f32>, b: &Vector3<f32>) -> Vector3<f32> {
    a.cross(b)
}

pub fn identity() -> Matrix4<f32> {
    Matrix4::identity()
}

/// Right-handed rotation of `theta` radians about the X axis.
pub fn rotate_x(theta: f32) -> Matrix4<f32> {
    let (s, c) = theta.sin_cos();
    Matrix4::from_column_slice(&[
        1.0, 0.0, 0.0, 0.0, //
        0.0, c, s, 0.0, //
        0.0, -s, c, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Right-handed rotation of `theta` radians about the Y axis.
pub fn rotate_y(theta: f32) -> Matrix4<f32> {
    let (s, c) = theta.sin_cos();
    Matrix4::from_column_slice(&[
        c, 0.0, -s, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        s, 0.0, c, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Right-handed rotation of `theta` radians about the Z axis.
pub fn rotate_z(theta: f32) -> Matrix4<f32> {
    let (s, c) = theta.sin_cos();
    Matrix4::from_column_slice(&[
        c, s, 0.0, 0.0, //
        -s, c, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Non-uniform scale along the three axes.
pub fn scale(x: f32, y: f32, z: f32) -> Matrix4<f32> {
    Matrix4::new_nonuniform_scaling(&Vector3::new(x, y, z))
}

pub fn translate(x: f32, y: f32, z: f32) -> Matrix4<f32> {
    Matrix4::new_translation(&Vector3::new(x, y, z))
}

/// Compose `a` with `b` so that the result applies `b` first, then `a`.
///
/// Output element `n` combines row `n & 3` of `a` with column `n >> 2` of `b`.
pub fn multiply(a: &Matrix4<f32>, b: &Matrix4<f32>) -> Matrix4<f32> {
    a * b
}

/// True when the bottom row is `0, 0, 0, 1`.
pub fn is_affine(m: &Matrix4<f32>) -> bool {
    m[3] == 0.0 && m[7] == 0.0 && m[11] == 0.0 && m[15] == 1.0
}
