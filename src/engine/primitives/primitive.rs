use super::{
    box_primitive::BoxPrimitive, capsule::Capsule, pyramid::Pyramid, sphere::Sphere, torus::Torus,
};
use crate::{
    helper::{from_enum_macro::impl_from_for_enum_variant, more_errors::ShapeError},
    renderer::shader_interfaces::shape_buffer::{shape_type_codes, ParamSlots, ShapeBufferUnit},
};

/// Implemented by every primitive variant.
pub trait EncodablePrimitive {
    fn kind(&self) -> ShapeKind;

    /// Kind specific parameters packed into the generic parameter slots. Unused components are
    /// zero.
    ///
    /// _Note: must match the decode process in the raymarching shader_
    fn encoded_params(&self) -> ParamSlots;

    /// Checks every parameter against its declared range.
    fn validate(&self) -> Result<(), ShapeError>;
}

// ~~ Shape Kind ~~

/// Tag for the closed set of primitive variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ShapeKind {
    #[default]
    Sphere,
    Box,
    Torus,
    Capsule,
    Pyramid,
}

impl ShapeKind {
    pub const VARIANTS: &'static [ShapeKind] = &[
        ShapeKind::Sphere,
        ShapeKind::Box,
        ShapeKind::Torus,
        ShapeKind::Capsule,
        ShapeKind::Pyramid,
    ];

    /// Ordinal written to the `_ShapeTypes` array.
    pub fn type_code(&self) -> ShapeBufferUnit {
        match self {
            Self::Sphere => shape_type_codes::SPHERE,
            Self::Box => shape_type_codes::BOX,
            Self::Torus => shape_type_codes::TORUS,
            Self::Capsule => shape_type_codes::CAPSULE,
            Self::Pyramid => shape_type_codes::PYRAMID,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sphere => "Sphere",
            Self::Box => "Box",
            Self::Torus => "Torus",
            Self::Capsule => "Capsule",
            Self::Pyramid => "Pyramid",
        }
    }

    /// A primitive of this kind with default parameters.
    pub fn default_primitive(&self) -> Primitive {
        match self {
            Self::Sphere => Sphere::default().into(),
            Self::Box => BoxPrimitive::default().into(),
            Self::Torus => Torus::default().into(),
            Self::Capsule => Capsule::default().into(),
            Self::Pyramid => Pyramid::default().into(),
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ~~ Primitive ~~

/// Kind-specific shape parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Box(BoxPrimitive),
    Torus(Torus),
    Capsule(Capsule),
    Pyramid(Pyramid),
}

impl_from_for_enum_variant!(Primitive, Sphere);
impl_from_for_enum_variant!(Primitive, Box, BoxPrimitive);
impl_from_for_enum_variant!(Primitive, Torus);
impl_from_for_enum_variant!(Primitive, Capsule);
impl_from_for_enum_variant!(Primitive, Pyramid);

impl Primitive {
    fn inner(&self) -> &dyn EncodablePrimitive {
        match self {
            Self::Sphere(p) => p,
            Self::Box(p) => p,
            Self::Torus(p) => p,
            Self::Capsule(p) => p,
            Self::Pyramid(p) => p,
        }
    }
}

impl EncodablePrimitive for Primitive {
    fn kind(&self) -> ShapeKind {
        self.inner().kind()
    }

    fn encoded_params(&self) -> ParamSlots {
        self.inner().encoded_params()
    }

    fn validate(&self) -> Result<(), ShapeError> {
        self.inner().validate()
    }
}

impl Default for Primitive {
    fn default() -> Self {
        ShapeKind::default().default_primitive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_ordinals_follow_declaration_order() {
        let codes: Vec<ShapeBufferUnit> = ShapeKind::VARIANTS
            .iter()
            .map(|kind| kind.type_code())
            .collect();
        assert_eq!(codes, vec![0., 1., 2., 3., 4.]);
    }

    #[test]
    fn default_primitives_match_their_kind() {
        for &kind in ShapeKind::VARIANTS {
            let primitive = kind.default_primitive();
            assert_eq!(primitive.kind(), kind);
            assert!(primitive.validate().is_ok(), "default {} is invalid", kind);
        }
    }

    #[test]
    fn kind_displays_its_name() {
        let names: Vec<String> = ShapeKind::VARIANTS
            .iter()
            .map(|kind| kind.to_string())
            .collect();
        assert_eq!(names, vec!["Sphere", "Box", "Torus", "Capsule", "Pyramid"]);
    }
}
