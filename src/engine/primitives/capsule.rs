use super::primitive::{EncodablePrimitive, ShapeKind};
use crate::{
    engine::config_engine::{
        ranges, DEFAULT_CAPSULE_POINT_A, DEFAULT_CAPSULE_POINT_B, DEFAULT_CAPSULE_RADIUS,
    },
    helper::more_errors::ShapeError,
    renderer::shader_interfaces::shape_buffer::ParamSlots,
};
use glam::Vec3;

/// Line segment from `point_a` to `point_b` (shape space) swept by a sphere of `radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub point_a: Vec3,
    pub point_b: Vec3,
    pub radius: f32,
}

impl Capsule {
    pub const fn new(point_a: Vec3, point_b: Vec3, radius: f32) -> Self {
        Self {
            point_a,
            point_b,
            radius,
        }
    }
}

impl Default for Capsule {
    fn default() -> Self {
        Self::new(
            DEFAULT_CAPSULE_POINT_A,
            DEFAULT_CAPSULE_POINT_B,
            DEFAULT_CAPSULE_RADIUS,
        )
    }
}

impl EncodablePrimitive for Capsule {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Capsule
    }

    /// slot1.x = radius, slot3.xyz = point a, slot4.xyz = point b. slot2 is unused.
    fn encoded_params(&self) -> ParamSlots {
        [
            [self.radius, 0., 0., 0.],
            [0.; 4],
            self.point_a.extend(0.).to_array(),
            self.point_b.extend(0.).to_array(),
        ]
    }

    fn validate(&self) -> Result<(), ShapeError> {
        ShapeError::check_finite("capsule point a", &self.point_a.to_array())?;
        ShapeError::check_finite("capsule point b", &self.point_b.to_array())?;
        ShapeError::check_range("capsule radius", self.radius, ranges::CAPSULE_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_in_last_two_slots() {
        let capsule = Capsule::new(Vec3::new(0., -0.5, 0.), Vec3::new(0., 0.5, 0.), 0.2);
        let params = capsule.encoded_params();
        assert_eq!(params[0], [0.2, 0., 0., 0.]);
        assert_eq!(params[1], [0.; 4]);
        assert_eq!(params[2], [0., -0.5, 0., 0.]);
        assert_eq!(params[3], [0., 0.5, 0., 0.]);
    }

    #[test]
    fn non_finite_endpoint_is_rejected() {
        let capsule = Capsule::new(Vec3::new(f32::NAN, 0., 0.), Vec3::ZERO, 0.2);
        assert_eq!(
            capsule.validate(),
            Err(ShapeError::NonFinite {
                parameter: "capsule point a"
            })
        );
    }
}
