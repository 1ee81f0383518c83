use super::primitive::{EncodablePrimitive, ShapeKind};
use crate::{
    engine::config_engine::{ranges, DEFAULT_TORUS_MAJOR_RADIUS, DEFAULT_TORUS_MINOR_RADIUS},
    helper::more_errors::ShapeError,
    renderer::shader_interfaces::shape_buffer::ParamSlots,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torus {
    /// Distance from the center to the middle of the tube
    pub major_radius: f32,
    /// Radius of the tube
    pub minor_radius: f32,
}

impl Torus {
    pub const fn new(major_radius: f32, minor_radius: f32) -> Self {
        Self {
            major_radius,
            minor_radius,
        }
    }
}

impl Default for Torus {
    fn default() -> Self {
        Self::new(DEFAULT_TORUS_MAJOR_RADIUS, DEFAULT_TORUS_MINOR_RADIUS)
    }
}

impl EncodablePrimitive for Torus {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Torus
    }

    fn encoded_params(&self) -> ParamSlots {
        [
            [self.major_radius, self.minor_radius, 0., 0.],
            [0.; 4],
            [0.; 4],
            [0.; 4],
        ]
    }

    fn validate(&self) -> Result<(), ShapeError> {
        ShapeError::check_range(
            "torus major radius",
            self.major_radius,
            ranges::TORUS_MAJOR_RADIUS,
        )?;
        ShapeError::check_range(
            "torus minor radius",
            self.minor_radius,
            ranges::TORUS_MINOR_RADIUS,
        )
    }
}
