//! Transform component for the ECS system
//!
//! Pure data component: position plus XYZ Euler rotation, both in world space.

use crate::foundation::math::{euler_to_matrix, Mat4, Vec3};

/// ECS Transform component
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformComponent {
    /// World space position (Y-up right-handed)
    pub position: Vec3,

    /// World space rotation as XYZ Euler angles in radians
    pub rotation: Vec3,
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set rotation from Euler angles (radians, XYZ order)
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Convert to transformation matrix (rotation then translation)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position) * euler_to_matrix(&self.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_translation_in_matrix() {
        let transform = TransformComponent::from_position(Vec3::new(1.0, 2.0, 3.0));
        let matrix = transform.to_matrix();
        assert_relative_eq!(matrix.m14, 1.0);
        assert_relative_eq!(matrix.m24, 2.0);
        assert_relative_eq!(matrix.m34, 3.0);
    }

    #[test]
    fn test_builder() {
        let transform = TransformComponent::identity()
            .with_position(Vec3::new(0.0, 1.0, 0.0))
            .with_rotation(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0));
        assert_eq!(transform.position.y, 1.0);
        assert_eq!(transform.rotation.y, std::f32::consts::FRAC_PI_2);
    }
}
