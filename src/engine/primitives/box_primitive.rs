use super::primitive::{EncodablePrimitive, ShapeKind};
use crate::{
    engine::config_engine::DEFAULT_BOX_HALF_EXTENTS, helper::more_errors::ShapeError,
    renderer::shader_interfaces::shape_buffer::ParamSlots,
};
use glam::Vec3;

/// Axis aligned (in shape space) box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxPrimitive {
    /// Distance from the center to each face
    pub half_extents: Vec3,
}

impl BoxPrimitive {
    pub const fn new(half_extents: Vec3) -> Self {
        Self { half_extents }
    }
}

impl Default for BoxPrimitive {
    fn default() -> Self {
        Self::new(DEFAULT_BOX_HALF_EXTENTS)
    }
}

impl EncodablePrimitive for BoxPrimitive {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Box
    }

    fn encoded_params(&self) -> ParamSlots {
        [
            self.half_extents.extend(0.).to_array(),
            [0.; 4],
            [0.; 4],
            [0.; 4],
        ]
    }

    fn validate(&self) -> Result<(), ShapeError> {
        ShapeError::check_positive("box half extents", &self.half_extents.to_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_extents_in_first_slot() {
        let params = BoxPrimitive::new(Vec3::new(0.5, 1., 1.5)).encoded_params();
        assert_eq!(params[0], [0.5, 1., 1.5, 0.]);
    }

    #[test]
    fn flat_box_is_rejected() {
        let flat = BoxPrimitive::new(Vec3::new(1., 0., 1.));
        assert_eq!(
            flat.validate(),
            Err(ShapeError::NotPositive {
                parameter: "box half extents",
                value: 0.
            })
        );
    }
}
