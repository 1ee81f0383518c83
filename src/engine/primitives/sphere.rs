use super::primitive::{EncodablePrimitive, ShapeKind};
use crate::{
    engine::config_engine::{ranges, DEFAULT_SPHERE_RADIUS},
    helper::more_errors::ShapeError,
    renderer::shader_interfaces::shape_buffer::ParamSlots,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub radius: f32,
}

impl Sphere {
    pub const fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::new(DEFAULT_SPHERE_RADIUS)
    }
}

impl EncodablePrimitive for Sphere {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Sphere
    }

    fn encoded_params(&self) -> ParamSlots {
        [
            [self.radius, 0., 0., 0.],
            [0.; 4],
            [0.; 4],
            [0.; 4],
        ]
    }

    fn validate(&self) -> Result<(), ShapeError> {
        ShapeError::check_range("sphere radius", self.radius, ranges::SPHERE_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_in_first_slot() {
        let params = Sphere::new(0.7).encoded_params();
        assert_eq!(params[0], [0.7, 0., 0., 0.]);
        assert_eq!(params[2], [0.; 4]);
        assert_eq!(params[3], [0.; 4]);
    }

    #[test]
    fn radius_range() {
        assert!(Sphere::new(2.0).validate().is_ok());
        assert!(matches!(
            Sphere::new(0.05).validate(),
            Err(ShapeError::OutOfRange { .. })
        ));
    }
}
