/// Parametric surfaces mapping `(u, v)` in `[0, 1]^2` to vertices
///
/// Each function is resolution-independent and suitable as the surface
/// argument of [`create_mesh`](crate::tessellate::create_mesh).
use std::f32::consts::{PI, TAU};

use crate::geometry::Vertex;

/// Minor radius used by [`torus`].
pub const TORUS_MINOR_RADIUS: f32 = 0.2;

/// Unit sphere; position and normal coincide.
pub fn sphere(u: f32, v: f32) -> Vertex {
    let theta = TAU * u;
    let phi = PI * v - PI / 2.0;

    let p = [theta.cos() * phi.cos(), theta.sin() * phi.cos(), phi.sin()];
    Vertex::new(p, p, [u, v])
}

/// Torus around the Z axis with major radius 1 and minor radius 0.2.
pub fn torus(u: f32, v: f32) -> Vertex {
    torus_with_radius(u, v, TORUS_MINOR_RADIUS)
}

pub fn torus_with_radius(u: f32, v: f32, r: f32) -> Vertex {
    let theta = TAU * u;
    let phi = TAU * v;
    let (st, ct) = theta.sin_cos();
    let (sp, cp) = phi.sin_cos();

    Vertex::new(
        [ct * (1.0 + r * cp), st * (1.0 + r * cp), r * sp],
        [ct * cp, st * cp, sp],
        [u, v],
    )
}

/// Cylinder wall of radius 1 from z = -1 to z = 1, without end caps.
pub fn open_tube(u: f32, v: f32) -> Vertex {
    let theta = TAU * u;
    let (x, y) = (theta.cos(), theta.sin());
    let z = 2.0 * v - 1.0;
    Vertex::new([x, y, z], [x, y, 0.0], [u, v])
}

/// Which part of the capped cylinder a `v` sample lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CylinderBand {
    /// Center point of an end cap.
    CapCenter,
    /// Outer rim of an end cap.
    CapRim,
    /// Side wall.
    Wall,
}

impl CylinderBand {
    /// Scales `v` slightly past 5 so that `v = 1` falls in band 5 rather
    /// than on the boundary of a nonexistent band 6.
    pub const BAND_SCALE: f32 = 5.001;

    /// Band index in `0..=5`; samples outside `[0, 1]` clamp to the ends.
    pub fn index(v: f32) -> usize {
        (Self::BAND_SCALE * v).floor().clamp(0.0, 5.0) as usize
    }

    pub fn from_v(v: f32) -> Self {
        match Self::index(v) {
            0 | 5 => CylinderBand::CapCenter,
            1 | 4 => CylinderBand::CapRim,
            _ => CylinderBand::Wall,
        }
    }
}

/// Radius 1 cylinder from z = -1 to z = 1 with both end caps.
///
/// `v` runs back cap center, back cap rim, wall, front cap rim, front cap
/// center. Cap vertices carry the axial normal `(0, 0, z)`.
pub fn cylinder(u: f32, v: f32) -> Vertex {
    let (s, c) = (TAU * u).sin_cos();
    let z = (10.0 * v - 5.0).clamp(-1.0, 1.0);

    match CylinderBand::from_v(v) {
        CylinderBand::CapCenter => Vertex::new([0.0, 0.0, z], [0.0, 0.0, z], [u, v]),
        CylinderBand::CapRim => Vertex::new([c, s, z], [0.0, 0.0, z], [u, v]),
        CylinderBand::Wall => Vertex::new([c, s, z], [c, s, 0.0], [u, v]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    fn close(a: Point3<f32>, b: [f32; 3]) -> bool {
        (a - Point3::from(b)).norm() < 1e-6
    }

    #[test]
    fn test_sphere_equator_and_pole() {
        let equator = sphere(0.0, 0.5);
        assert!(close(equator.position, [1.0, 0.0, 0.0]));
        assert_eq!(equator.position.coords, equator.normal);

        let pole = sphere(0.0, 1.0);
        assert!(close(pole.position, [0.0, 0.0, 1.0]));
        assert_eq!(pole.position.coords, pole.normal);
    }

    #[test]
    fn test_sphere_is_unit_and_periodic_in_u() {
        for &(u, v) in &[(0.1, 0.2), (0.7, 0.9), (0.33, 0.5)] {
            assert!((sphere(u, v).position.coords.norm() - 1.0).abs() < 1e-6);
        }
        let start = sphere(0.0, 0.3).position;
        let wrapped = sphere(1.0, 0.3).position;
        assert!((start - wrapped).norm() < 1e-5);
    }

    #[test]
    fn test_torus_outer_equator() {
        let v = torus(0.0, 0.0);
        assert!(close(v.position, [1.2, 0.0, 0.0]));
        assert_eq!(v.normal, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_torus_normal_ignores_radius() {
        let thin = torus_with_radius(0.3, 0.6, 0.05);
        let thick = torus_with_radius(0.3, 0.6, 0.5);
        assert_eq!(thin.normal, thick.normal);
        assert!((thin.normal.norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_open_tube_wall() {
        let bottom = open_tube(0.25, 0.0);
        assert!(close(bottom.position, [0.0, 1.0, -1.0]));
        assert!(bottom.normal.z == 0.0);

        let top = open_tube(0.0, 1.0);
        assert!(close(top.position, [1.0, 0.0, 1.0]));
    }

    #[test]
    fn test_cylinder_band_boundaries() {
        assert_eq!(CylinderBand::index(0.0), 0);
        assert_eq!(CylinderBand::index(0.199), 0);
        assert_eq!(CylinderBand::index(0.2), 1);
        assert_eq!(CylinderBand::index(0.5), 2);
        assert_eq!(CylinderBand::index(0.7), 3);
        assert_eq!(CylinderBand::index(1.0), 5);
        assert_eq!(CylinderBand::index(-0.5), 0);
        assert_eq!(CylinderBand::index(3.0), 5);
    }

    #[test]
    fn test_cylinder_back_cap() {
        for &v in &[0.0, 0.05, 0.1, 0.19] {
            let vertex = cylinder(0.3, v);
            assert_eq!(vertex.position.z, -1.0);
            assert_eq!(vertex.normal, Vector3::new(0.0, 0.0, -1.0));
            assert_eq!(vertex.position.x, 0.0);
        }
    }

    #[test]
    fn test_cylinder_rim_wall_and_front_cap() {
        let rim = cylinder(0.0, 0.3);
        assert_eq!(CylinderBand::from_v(0.3), CylinderBand::CapRim);
        assert!(close(rim.position, [1.0, 0.0, -1.0]));

        let wall = cylinder(0.0, 0.5);
        assert_eq!(CylinderBand::from_v(0.5), CylinderBand::Wall);
        assert!(close(wall.position, [1.0, 0.0, 0.0]));
        assert!((wall.normal - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-6);

        let front = cylinder(0.4, 1.0);
        assert!(close(front.position, [0.0, 0.0, 1.0]));
        assert_eq!(front.normal, Vector3::new(0.0, 0.0, 1.0));
    }
}
