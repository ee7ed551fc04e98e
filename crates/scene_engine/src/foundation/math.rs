//! Math utilities and types
//!
//! Provides the vector aliases used by components plus the spherical coordinate
//! conversions the orbiting camera is built on.

pub use nalgebra::{Matrix4, Vector3};

use std::f32::consts::{FRAC_PI_2, PI};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Offsets shorter than this are treated as "on the target" and have no direction.
pub const DEGENERATE_RADIUS: f32 = 1e-6;

/// Position on a sphere around an origin.
///
/// Uses a latitude-style polar angle: `polar = 0` lies in the XZ plane and
/// `polar = ±π/2` points straight up or down the Y axis. Azimuth is measured in the
/// XZ plane from +X towards +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Distance from the origin
    pub radius: f32,
    /// Angle in the XZ plane, radians
    pub azimuth: f32,
    /// Elevation above the XZ plane, radians
    pub polar: f32,
}

impl Spherical {
    /// Create from explicit components
    pub fn new(radius: f32, azimuth: f32, polar: f32) -> Self {
        Self {
            radius,
            azimuth,
            polar,
        }
    }

    /// Convert a cartesian offset into spherical coordinates.
    ///
    /// Returns `None` for an offset of (near) zero length, where neither angle is
    /// defined. The azimuth is taken from `atan(z / x)` and shifted by π when
    /// `x < 0`, so it keeps tracking the full circle as the offset crosses the
    /// YZ plane; an offset with `x == 0` resolves to `±π/2` by the sign of `z`.
    pub fn from_cartesian(offset: Vec3) -> Option<Self> {
        let radius = offset.norm();
        if radius < DEGENERATE_RADIUS {
            return None;
        }

        let azimuth = if offset.x == 0.0 {
            if offset.z < 0.0 {
                -FRAC_PI_2
            } else {
                FRAC_PI_2
            }
        } else {
            let base = (offset.z / offset.x).atan();
            if offset.x < 0.0 {
                base + PI
            } else {
                base
            }
        };

        let polar = (offset.y / radius).clamp(-1.0, 1.0).asin();

        Some(Self {
            radius,
            azimuth,
            polar,
        })
    }

    /// Convert back into a cartesian offset from the origin
    pub fn to_cartesian(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        Vec3::new(
            self.radius * cos_polar * cos_azimuth,
            self.radius * sin_polar,
            self.radius * cos_polar * sin_azimuth,
        )
    }
}

/// Build a rotation matrix from XYZ Euler angles in radians
pub fn euler_to_matrix(rotation: &Vec3) -> Mat4 {
    nalgebra::Rotation3::from_euler_angles(rotation.x, rotation.y, rotation.z).to_homogeneous()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_spherical_axis_aligned() {
        let s = Spherical::from_cartesian(Vec3::new(2.0, 0.0, 0.0)).unwrap();
        assert_relative_eq!(s.radius, 2.0);
        assert_relative_eq!(s.azimuth, 0.0);
        assert_relative_eq!(s.polar, 0.0);

        let up = Spherical::from_cartesian(Vec3::new(0.0, 3.0, 0.0)).unwrap();
        assert_relative_eq!(up.polar, FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn test_spherical_negative_x_branch() {
        let s = Spherical::from_cartesian(Vec3::new(-1.0, 0.0, 1.0)).unwrap();
        assert_relative_eq!(s.azimuth, 3.0 * PI / 4.0, epsilon = 1e-6);
        assert_relative_eq!(s.to_cartesian(), Vec3::new(-1.0, 0.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_spherical_zero_x_does_not_divide() {
        let s = Spherical::from_cartesian(Vec3::new(0.0, 1.0, -2.0)).unwrap();
        assert_relative_eq!(s.azimuth, -FRAC_PI_2);
        assert_relative_eq!(s.to_cartesian(), Vec3::new(0.0, 1.0, -2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_spherical_degenerate_offset() {
        assert!(Spherical::from_cartesian(Vec3::zeros()).is_none());
    }

    #[test]
    fn test_euler_identity() {
        assert_relative_eq!(euler_to_matrix(&Vec3::zeros()), Mat4::identity());
    }
}
