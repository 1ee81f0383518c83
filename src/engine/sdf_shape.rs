use super::{
    config_engine::{ranges, DEFAULT_BLEND_SMOOTHNESS, DEFAULT_COLOR},
    operation::BlendOperation,
    primitives::primitive::{EncodablePrimitive, Primitive, ShapeKind},
    scene_node::SceneNodeRef,
};
use crate::helper::more_errors::ShapeError;
use glam::Vec4;
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

/// Strong handle held by whoever hosts the shape. Dropping the last one destroys the shape.
pub type SdfShapeRef = Rc<RefCell<SdfShape>>;
/// Non-owning handle, as held by the shape registry.
pub type WeakSdfShapeRef = Weak<RefCell<SdfShape>>;

// ~~ Shape Descriptor ~~

/// Everything about a shape except where it is, which comes from its scene node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeDescriptor {
    pub primitive: Primitive,
    /// RGBA. Only a rendering hint, doesn't affect geometry.
    pub color: Vec4,
    pub blend_operation: BlendOperation,
    /// Width of the smooth transition with the accumulated result, in [0, 1]
    pub blend_smoothness: f32,
}

impl ShapeDescriptor {
    pub fn new(primitive: impl Into<Primitive>) -> Self {
        Self {
            primitive: primitive.into(),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    pub fn with_blend(mut self, blend_operation: BlendOperation, blend_smoothness: f32) -> Self {
        self.blend_operation = blend_operation;
        self.blend_smoothness = blend_smoothness;
        self
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.primitive.kind()
    }

    pub fn validate(&self) -> Result<(), ShapeError> {
        self.primitive.validate()?;
        ShapeError::check_finite("color", &self.color.to_array())?;
        ShapeError::check_range(
            "blend smoothness",
            self.blend_smoothness,
            ranges::BLEND_SMOOTHNESS,
        )
    }
}

impl Default for ShapeDescriptor {
    fn default() -> Self {
        Self {
            primitive: Primitive::default(),
            color: DEFAULT_COLOR,
            blend_operation: BlendOperation::default(),
            blend_smoothness: DEFAULT_BLEND_SMOOTHNESS,
        }
    }
}

// ~~ SDF Shape ~~

/// A shape descriptor attached to the scene node that hosts it. Always holds a valid descriptor:
/// every setter validates first and leaves the shape unchanged on error.
#[derive(Debug)]
pub struct SdfShape {
    node: SceneNodeRef,
    descriptor: ShapeDescriptor,
}

impl SdfShape {
    pub fn new(node: SceneNodeRef, descriptor: ShapeDescriptor) -> Result<Self, ShapeError> {
        descriptor.validate()?;
        Ok(Self { node, descriptor })
    }

    /// Same as [`Self::new`] but wrapped in a [`SdfShapeRef`] ready for registration.
    pub fn new_ref(
        node: SceneNodeRef,
        descriptor: ShapeDescriptor,
    ) -> Result<SdfShapeRef, ShapeError> {
        Ok(Rc::new(RefCell::new(Self::new(node, descriptor)?)))
    }

    pub fn node(&self) -> &SceneNodeRef {
        &self.node
    }

    pub fn descriptor(&self) -> &ShapeDescriptor {
        &self.descriptor
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.descriptor.kind()
    }

    /// Whether the owning node (and its parents) are enabled.
    pub fn is_active(&self) -> bool {
        self.node.borrow().is_active_in_hierarchy()
    }

    pub fn set_descriptor(&mut self, descriptor: ShapeDescriptor) -> Result<(), ShapeError> {
        descriptor.validate()?;
        self.descriptor = descriptor;
        Ok(())
    }

    /// Also changes the shape kind if `primitive` is a different variant.
    pub fn set_primitive(&mut self, primitive: impl Into<Primitive>) -> Result<(), ShapeError> {
        self.set_descriptor(ShapeDescriptor {
            primitive: primitive.into(),
            ..self.descriptor
        })
    }

    pub fn set_color(&mut self, color: Vec4) -> Result<(), ShapeError> {
        self.set_descriptor(ShapeDescriptor {
            color,
            ..self.descriptor
        })
    }

    pub fn set_blend_operation(&mut self, blend_operation: BlendOperation) {
        self.descriptor.blend_operation = blend_operation;
    }

    pub fn set_blend_smoothness(&mut self, blend_smoothness: f32) -> Result<(), ShapeError> {
        self.set_descriptor(ShapeDescriptor {
            blend_smoothness,
            ..self.descriptor
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{
        primitives::{pyramid::Pyramid, sphere::Sphere, torus::Torus},
        scene_node::{new_scene_node_ref, SceneNode},
    };

    #[test]
    fn default_descriptor_is_white_sphere_union() {
        let descriptor = ShapeDescriptor::default();
        assert_eq!(descriptor.kind(), ShapeKind::Sphere);
        assert_eq!(descriptor.color, Vec4::ONE);
        assert_eq!(descriptor.blend_operation, BlendOperation::Union);
        assert_eq!(descriptor.blend_smoothness, 0.5);
        assert!(descriptor.validate().is_ok());
    }

    #[test]
    fn invalid_descriptor_is_never_attached() {
        let node = new_scene_node_ref(SceneNode::new("node"));
        let res = SdfShape::new(node, ShapeDescriptor::new(Sphere::new(5.)));
        assert!(matches!(
            res,
            Err(ShapeError::OutOfRange {
                parameter: "sphere radius",
                ..
            })
        ));
    }

    #[test]
    fn rejected_setter_leaves_shape_unchanged() {
        let node = new_scene_node_ref(SceneNode::new("node"));
        let mut shape = SdfShape::new(node, ShapeDescriptor::new(Torus::default())).unwrap();
        let before = *shape.descriptor();

        assert!(shape.set_blend_smoothness(1.5).is_err());
        assert!(shape.set_primitive(Torus::new(0.5, 3.)).is_err());
        assert!(shape.set_color(Vec4::new(f32::NAN, 0., 0., 1.)).is_err());
        assert_eq!(*shape.descriptor(), before);

        shape.set_primitive(Pyramid::new(1.5)).unwrap();
        assert_eq!(shape.kind(), ShapeKind::Pyramid);
    }

    #[test]
    fn activity_follows_owner_node() {
        let node = new_scene_node_ref(SceneNode::new("node"));
        let shape = SdfShape::new(node.clone(), ShapeDescriptor::default()).unwrap();
        assert!(shape.is_active());
        node.borrow_mut().set_enabled(false);
        assert!(!shape.is_active());
    }
}
