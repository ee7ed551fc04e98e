//! Camera component
//!
//! Holds projection parameters and the point an orbiting controller circles. The
//! camera's position lives in the entity's [`TransformComponent`](super::TransformComponent).

use crate::foundation::math::{Mat4, Vec3};

/// Projection used by a camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Perspective projection
    Perspective {
        /// Vertical field of view in radians
        fov_y: f32,
    },
    /// Orthographic projection
    Orthographic {
        /// View volume width in world units
        width: f32,
        /// View volume height in world units
        height: f32,
    },
}

impl Default for Projection {
    fn default() -> Self {
        Self::Perspective {
            fov_y: 60.0_f32.to_radians(),
        }
    }
}

/// ECS Camera component
#[derive(Debug, Clone, PartialEq)]
pub struct CameraComponent {
    /// Whether this camera should be used
    pub enabled: bool,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,

    /// Projection kind and its parameters
    pub projection: Projection,

    /// World space point an orbit controller rotates around
    pub target: Vec3,
}

impl Default for CameraComponent {
    fn default() -> Self {
        Self {
            enabled: true,
            near: 0.1,
            far: 1000.0,
            projection: Projection::default(),
            target: Vec3::zeros(),
        }
    }
}

impl CameraComponent {
    /// Create a perspective camera with the field of view given in degrees
    pub fn perspective(fov_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            near,
            far,
            projection: Projection::Perspective {
                fov_y: fov_degrees.to_radians(),
            },
            ..Default::default()
        }
    }

    /// Create an orthographic camera
    pub fn orthographic(width: f32, height: f32, near: f32, far: f32) -> Self {
        Self {
            near,
            far,
            projection: Projection::Orthographic { width, height },
            ..Default::default()
        }
    }

    /// Builder pattern: Set orbit target
    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Projection matrix for the given viewport aspect ratio (width / height)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        match self.projection {
            Projection::Perspective { fov_y } => {
                nalgebra::Perspective3::new(aspect, fov_y, self.near, self.far).to_homogeneous()
            }
            Projection::Orthographic { width, height } => {
                let half_w = width * 0.5;
                let half_h = height * 0.5;
                nalgebra::Orthographic3::new(-half_w, half_w, -half_h, half_h, self.near, self.far)
                    .to_homogeneous()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perspective_converts_degrees() {
        let camera = CameraComponent::perspective(90.0, 0.1, 100.0);
        match camera.projection {
            Projection::Perspective { fov_y } => {
                assert_relative_eq!(fov_y, std::f32::consts::FRAC_PI_2);
            }
            Projection::Orthographic { .. } => panic!("expected perspective projection"),
        }
        assert!(camera.enabled);
    }

    #[test]
    fn test_orthographic_matrix_scales_by_extent() {
        let camera = CameraComponent::orthographic(4.0, 2.0, 0.1, 10.0);
        let matrix = camera.projection_matrix(2.0);
        assert_relative_eq!(matrix.m11, 0.5);
        assert_relative_eq!(matrix.m22, 1.0);
    }
}
