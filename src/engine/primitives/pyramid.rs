use super::primitive::{EncodablePrimitive, ShapeKind};
use crate::{
    engine::config_engine::{ranges, DEFAULT_PYRAMID_HEIGHT},
    helper::more_errors::ShapeError,
    renderer::shader_interfaces::shape_buffer::ParamSlots,
};

/// Square based pyramid with a unit base, apex `height` above the base center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pyramid {
    pub height: f32,
}

impl Pyramid {
    pub const fn new(height: f32) -> Self {
        Self { height }
    }
}

impl Default for Pyramid {
    fn default() -> Self {
        Self::new(DEFAULT_PYRAMID_HEIGHT)
    }
}

impl EncodablePrimitive for Pyramid {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Pyramid
    }

    fn encoded_params(&self) -> ParamSlots {
        [[self.height, 0., 0., 0.], [0.; 4], [0.; 4], [0.; 4]]
    }

    fn validate(&self) -> Result<(), ShapeError> {
        ShapeError::check_range("pyramid height", self.height, ranges::PYRAMID_HEIGHT)
    }
}
